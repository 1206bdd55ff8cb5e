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

use crate::config::GridDims;
use crate::error::Error;
use crate::report::ExportReport;
use crate::table::ScoreTable;

/// Per-voxel dose summed over every spot, indexed by voxel key.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseGrid {
    dims: GridDims,
    values: Vec<f64>,
}

impl DenseGrid {
    /// Wraps `values`, which must hold exactly one value per voxel of `dims`.
    pub fn from_values(dims: GridDims, values: Vec<f64>) -> Result<Self, Error> {
        let voxel_count = dims.voxel_count()? as usize;
        if values.len() != voxel_count {
            return Err(Error::config_invalid("value count does not match grid dimensions")
                .with_context("values", values.len())
                .with_context("voxel_count", voxel_count));
        }
        Ok(Self { dims, values })
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Largest cell value, or 0 for an all-zero grid.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Sums every live entry's `value * scale` into the cell of its voxel key.
///
/// Entries whose voxel lies outside the grid are logged, counted and dropped;
/// the pass always runs to completion.
pub fn accumulate_dense<T: ScoreTable + ?Sized>(
    table: &T,
    dims: GridDims,
    scale: f64,
) -> Result<(DenseGrid, ExportReport), Error> {
    if table.capacity() == 0 {
        return Err(Error::config_invalid("table capacity must be positive"));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(
            Error::config_invalid("scale must be finite and positive").with_context("scale", scale)
        );
    }
    let voxel_count = dims.voxel_count()?;

    let mut values = vec![0.0f64; voxel_count as usize];
    let mut report = ExportReport::default();
    for entry in table.slots_iter() {
        report.scanned += 1;
        if !entry.is_occupied() {
            continue;
        }
        report.occupied += 1;
        if !entry.is_live() {
            report.skipped_non_positive += 1;
            continue;
        }
        if entry.key1 >= voxel_count {
            log::debug!(
                "voxel key {} out of bounds (voxel count {}), entry dropped",
                entry.key1,
                voxel_count
            );
            report.dropped_out_of_bounds += 1;
            continue;
        }
        values[entry.key1 as usize] += entry.value * scale;
        report.emitted += 1;
    }

    Ok((DenseGrid { dims, values }, report))
}
