// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Export of accumulated dose-influence tables.
//!
//! A Monte Carlo dose engine scores `(voxel, spot) -> dose` contributions
//! into a fixed-capacity open-addressing table (see [`table`]). This crate
//! reduces such a table into two kinds of artifact:
//!
//! - a compressed-sparse-row influence matrix, one row per spot or one row
//!   per masked voxel ([`sparse`]);
//! - a dense voxel grid quantized to 16-bit samples with a reconstruction
//!   factor ([`dense`]).
//!
//! The [`encode`] module lays the reduced arrays out as NumPy `.npz`
//! archives, MetaImage files and raw dumps, and hands quantized grids to an
//! external dataset encoder.
//!
//! Every export scans the whole table and returns an [`ExportReport`]
//! describing what was emitted and what was skipped.

pub mod codec;
pub mod config;
pub mod dense;
pub mod encode;
pub mod error;
pub mod report;
pub mod sparse;
pub mod table;

mod hash;

pub use self::report::ExportReport;
