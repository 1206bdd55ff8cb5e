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

//! Sparse extraction of the accumulation table into a CSR matrix.
//!
//! One pass scans every slot, routes each entry to a row chosen by the
//! [`SparseLayout`], runs the [`ValueTransform`] and concatenates the rows.
//!
//! The two layouts differ:
//!
//! - spot-major drops non-positive entries silently and leaves each row in
//!   scan order;
//! - voxel-major skips (and counts) voxels outside the mask, treats a
//!   non-positive value inside the mask as fatal, and sorts each row by spot.
//!
//! Any row, column or time-scale index outside its declared range aborts the
//! export; no partial matrix is returned.
//!
//! # Usage
//!
//! ```rust
//! # use dose_export::config::{ExportOptions, GridDims, SparseLayout};
//! # use dose_export::sparse::export_csr;
//! # use dose_export::table::Entry;
//! // (voxel, spot, dose)
//! let slots = vec![
//!     Entry::new(0, 0, 2.0),
//!     Entry::new(0, 1, 3.0),
//!     Entry::EMPTY,
//!     Entry::new(1, 0, 0.0),
//! ];
//! let layout = SparseLayout::spot_major(2, GridDims::new(2, 1, 1)).unwrap();
//! let options = ExportOptions::default().with_scale(2.0);
//! let export = export_csr(&slots[..], layout, &options).unwrap();
//! assert_eq!(export.matrix.indptr(), &[0, 1, 2]);
//! assert_eq!(export.matrix.indices(), &[0, 0]);
//! assert_eq!(export.matrix.data(), &[4.0, 6.0]);
//! ```

mod aggregate;
mod csr;
mod transform;

pub use self::csr::SparseMatrix;
pub use self::transform::ValueTransform;

use crate::config::ExportOptions;
use crate::config::SparseLayout;
use crate::error::Error;
use crate::report::ExportReport;
use crate::table::ScoreTable;

/// Result of one sparse export.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrExport {
    pub matrix: SparseMatrix,
    pub report: ExportReport,
}

/// Extracts `table` into a CSR matrix shaped by `layout`.
pub fn export_csr<T: ScoreTable + ?Sized>(
    table: &T,
    layout: SparseLayout<'_>,
    options: &ExportOptions,
) -> Result<CsrExport, Error> {
    if table.capacity() == 0 {
        return Err(Error::config_invalid("table capacity must be positive"));
    }
    options.validate()?;
    let shape = layout.shape()?;

    log::info!(
        "{} csr export: scanning {} slots into shape ({}, {})",
        layout.name(),
        table.capacity(),
        shape.0,
        shape.1
    );

    let transform = ValueTransform::new(options);
    let (rows, report) = aggregate::aggregate_rows(table, layout, shape, &transform)?;
    report.log_anomalies(layout.name());

    let matrix = SparseMatrix::from_rows(rows, shape.1)?;
    log::info!(
        "{} csr export: nnz={} occupied={} skipped_non_positive={}",
        layout.name(),
        matrix.nnz(),
        report.occupied,
        report.skipped_non_positive
    );
    Ok(CsrExport { matrix, report })
}
