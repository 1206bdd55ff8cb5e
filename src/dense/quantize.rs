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

use crate::codec;
use crate::config::GridDims;
use crate::dense::DenseGrid;

/// Largest stored sample; the grid maximum maps here.
pub const QUANTIZED_MAX: f64 = u16::MAX as f64;

/// A dense grid quantized to 16-bit unsigned samples.
///
/// `original ≈ stored * reconstruction_factor`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedGrid {
    dims: GridDims,
    samples: Vec<u16>,
    scale_factor: f64,
    reconstruction_factor: f64,
}

impl QuantizedGrid {
    /// Quantizes `grid` so that its maximum maps to 65535.
    ///
    /// Each sample is `trunc(value * scale_factor)`. An all-zero grid keeps
    /// both factors at 1.
    pub fn from_dense(grid: &DenseGrid) -> Self {
        let max = grid.max();
        let scale_factor = if max > 0.0 { QUANTIZED_MAX / max } else { 1.0 };
        let reconstruction_factor = if max > 0.0 { 1.0 / scale_factor } else { 1.0 };

        // `as` truncates toward zero and saturates at u16::MAX
        let samples = grid
            .values()
            .iter()
            .map(|&value| (value * scale_factor) as u16)
            .collect();

        Self {
            dims: grid.dims(),
            samples,
            scale_factor,
            reconstruction_factor,
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn reconstruction_factor(&self) -> f64 {
        self.reconstruction_factor
    }

    /// Approximate original values, `stored * reconstruction_factor`.
    pub fn dequantize(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|&s| s as f64 * self.reconstruction_factor)
            .collect()
    }

    /// An owned little-endian copy of the samples.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        codec::to_le_bytes(&self.samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_grid() {
        let grid = DenseGrid::from_values(GridDims::new(2, 2, 1), vec![0.0; 4]).unwrap();
        let quantized = QuantizedGrid::from_dense(&grid);
        assert_eq!(quantized.scale_factor(), 1.0);
        assert_eq!(quantized.reconstruction_factor(), 1.0);
        assert_eq!(quantized.samples(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_truncates_not_rounds() {
        // scale factor 65535 / 2; 1.99999 * 32767.5 = 65534.67...
        let grid = DenseGrid::from_values(GridDims::new(3, 1, 1), vec![2.0, 1.99999, 1.0]).unwrap();
        let quantized = QuantizedGrid::from_dense(&grid);
        assert_eq!(quantized.samples(), &[65535, 65534, 32767]);
        assert_eq!(quantized.reconstruction_factor(), 1.0 / (65535.0 / 2.0));
    }

    #[test]
    fn test_le_bytes_copy() {
        let grid = DenseGrid::from_values(GridDims::new(2, 1, 1), vec![0.0, 1.0]).unwrap();
        let quantized = QuantizedGrid::from_dense(&grid);
        assert_eq!(quantized.to_le_bytes(), vec![0, 0, 0xFF, 0xFF]);
    }
}
