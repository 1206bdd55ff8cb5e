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

/// Counters collected during one export pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Slots visited; always the table capacity.
    pub scanned: usize,
    /// Slots whose keys are not the sentinel.
    pub occupied: usize,
    /// Values written to the output.
    pub emitted: usize,
    /// Occupied slots dropped for a non-positive value.
    pub skipped_non_positive: usize,
    /// Voxel-major entries whose voxel lies outside the mask.
    pub skipped_outside_mask: usize,
    /// Dense-path entries whose voxel lies outside the grid.
    pub dropped_out_of_bounds: usize,
}

impl ExportReport {
    /// Returns true if any entry was skipped for an anomaly worth flagging.
    pub fn has_anomalies(&self) -> bool {
        self.skipped_outside_mask > 0 || self.dropped_out_of_bounds > 0
    }

    pub(crate) fn log_anomalies(&self, path: &str) {
        if self.skipped_outside_mask > 0 {
            log::warn!(
                "{path}: skipped {} entries whose voxel lies outside the mask",
                self.skipped_outside_mask
            );
        }
        if self.dropped_out_of_bounds > 0 {
            log::warn!(
                "{path}: dropped {} entries whose voxel lies outside the grid",
                self.dropped_out_of_bounds
            );
        }
    }
}
