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

//! Dense reduction of the accumulation table into a voxel grid.
//!
//! Every live entry adds its dose to the cell of its voxel, regardless of
//! spot. Unlike the sparse path, an entry whose voxel lies outside the grid
//! is dropped and counted rather than failing the export.
//!
//! # Usage
//!
//! ```rust
//! # use dose_export::config::GridDims;
//! # use dose_export::dense::export_quantized_grid;
//! # use dose_export::table::Entry;
//! let slots = vec![Entry::new(0, 0, 1.0), Entry::new(0, 1, 1.0), Entry::new(1, 0, 4.0)];
//! let (grid, report) = export_quantized_grid(&slots[..], GridDims::new(2, 1, 1), 1.0).unwrap();
//! assert_eq!(grid.samples(), &[32767, 65535]);
//! assert_eq!(report.emitted, 3);
//! ```

mod accumulate;
mod quantize;

pub use self::accumulate::DenseGrid;
pub use self::accumulate::accumulate_dense;
pub use self::quantize::QUANTIZED_MAX;
pub use self::quantize::QuantizedGrid;

use crate::config::GridDims;
use crate::error::Error;
use crate::report::ExportReport;
use crate::table::ScoreTable;

/// Accumulates `table` over `dims` and quantizes the result.
pub fn export_quantized_grid<T: ScoreTable + ?Sized>(
    table: &T,
    dims: GridDims,
    scale: f64,
) -> Result<(QuantizedGrid, ExportReport), Error> {
    let (dense, report) = accumulate_dense(table, dims, scale)?;
    report.log_anomalies("dense");

    let grid = QuantizedGrid::from_dense(&dense);
    log::info!(
        "dense export: dims={}x{}x{} voxels={} max={} reconstruction_factor={:.10}",
        dims.x,
        dims.y,
        dims.z,
        dense.values().len(),
        dense.max(),
        grid.reconstruction_factor()
    );
    Ok((grid, report))
}
