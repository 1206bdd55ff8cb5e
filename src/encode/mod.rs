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

//! Byte-level writers for reduced arrays.
//!
//! Encoders only lay out bytes; all reduction happens in [`crate::sparse`]
//! and [`crate::dense`]. Every writer takes an output directory and an
//! artifact name and derives the file names from them. Writers borrow the
//! arrays they encode and never take ownership of them. A failed write is
//! reported as [`ErrorKind::IoFailure`](crate::error::ErrorKind::IoFailure)
//! and partial output is left in place.

mod dataset;
mod metaimage;
mod npz;
mod raw;

pub use self::dataset::EncodeOutcome;
pub use self::dataset::QuantizedExport;
pub use self::dataset::QuantizedGridEncoder;
pub use self::dataset::export_quantized;
pub use self::metaimage::write_mha;
pub use self::metaimage::write_mhd;
pub use self::npz::NpzMode;
pub use self::npz::npy_bytes;
pub use self::npz::write_csr_npz;
pub use self::npz::write_npz_entry;
pub use self::raw::write_key_value_dump;
pub use self::raw::write_raw_samples;

use std::path::Path;
use std::path::PathBuf;

/// `dir/name{suffix}`.
pub(crate) fn artifact_path(dir: &Path, name: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{name}{suffix}"))
}
