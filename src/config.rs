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

//! Parameters shared by the sparse and dense export paths.

use crate::error::Error;
use crate::table::VoxelMask;

/// Per-call value options.
///
/// Defaults leave values untouched: scale 1, no threshold, no time scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    scale: f64,
    threshold: Option<f64>,
    time_scale: Option<Vec<f64>>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            threshold: None,
            time_scale: None,
        }
    }
}

impl ExportOptions {
    /// Multiplies every value by `scale`.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Subtracts twice `threshold` from every scaled value, clamping at zero.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Divides every value by `time_scale[spot]`.
    pub fn with_time_scale(mut self, time_scale: Vec<f64>) -> Self {
        self.time_scale = Some(time_scale);
        self
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn time_scale(&self) -> Option<&[f64]> {
        self.time_scale.as_deref()
    }

    /// Checks that every option holds a usable value.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::config_invalid("scale must be finite and positive")
                .with_context("scale", self.scale));
        }
        if let Some(threshold) = self.threshold {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(
                    Error::config_invalid("threshold must be finite and non-negative")
                        .with_context("threshold", threshold),
                );
            }
        }
        if let Some(time_scale) = &self.time_scale {
            if let Some((spot, value)) = time_scale
                .iter()
                .enumerate()
                .find(|(_, v)| !v.is_finite() || **v <= 0.0)
            {
                return Err(
                    Error::config_invalid("time scale entries must be finite and positive")
                        .with_context("spot", spot)
                        .with_context("time_scale", value),
                );
            }
        }
        Ok(())
    }
}

/// Voxel grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDims {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridDims {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Total number of voxels, `x * y * z`.
    ///
    /// Fails if any axis is zero or the product does not fit a voxel key.
    pub fn voxel_count(&self) -> Result<u32, Error> {
        if self.x == 0 || self.y == 0 || self.z == 0 {
            return Err(Error::config_invalid("grid dimensions must be positive")
                .with_context("dims", format!("{}x{}x{}", self.x, self.y, self.z)));
        }
        self.x
            .checked_mul(self.y)
            .and_then(|xy| xy.checked_mul(self.z))
            .ok_or_else(|| {
                Error::config_invalid("voxel count overflows u32")
                    .with_context("dims", format!("{}x{}x{}", self.x, self.y, self.z))
            })
    }
}

/// Physical placement of a voxel grid, used by image headers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub dims: GridDims,
    /// Voxel size along x, y and z.
    pub spacing: [f64; 3],
    /// Center of the first voxel.
    pub origin: [f64; 3],
}

impl GridGeometry {
    /// Unit spacing at the coordinate origin.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            spacing: [1.0; 3],
            origin: [0.0; 3],
        }
    }

    pub fn with_spacing(mut self, spacing: [f64; 3]) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_origin(mut self, origin: [f64; 3]) -> Self {
        self.origin = origin;
        self
    }
}

/// Selects which table key becomes the CSR row.
#[derive(Clone, Copy)]
pub enum SparseLayout<'a> {
    /// One row per spot (`key2`), one column per voxel (`key1`).
    ///
    /// Shape is `(num_spots, voxel_count)`. Rows are not sorted.
    SpotMajor { num_spots: u32, voxel_count: u32 },
    /// One row per masked voxel, one column per spot.
    ///
    /// Shape is `(mask.size(), num_spots)`. Each row is sorted by spot.
    VoxelMajor {
        mask: &'a dyn VoxelMask,
        num_spots: u32,
    },
}

impl<'a> SparseLayout<'a> {
    /// Spot-major layout over a full voxel grid.
    pub fn spot_major(num_spots: u32, dims: GridDims) -> Result<Self, Error> {
        Ok(SparseLayout::SpotMajor {
            num_spots,
            voxel_count: dims.voxel_count()?,
        })
    }

    /// Voxel-major layout restricted to `mask`.
    pub fn voxel_major(mask: &'a dyn VoxelMask, num_spots: u32) -> Self {
        SparseLayout::VoxelMajor { mask, num_spots }
    }

    /// Human-readable layout name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            SparseLayout::SpotMajor { .. } => "spot-major",
            SparseLayout::VoxelMajor { .. } => "voxel-major",
        }
    }

    /// Returns `(rows, columns)`, rejecting empty axes.
    pub fn shape(&self) -> Result<(u32, u32), Error> {
        let (rows, cols) = match *self {
            SparseLayout::SpotMajor {
                num_spots,
                voxel_count,
            } => (num_spots, voxel_count),
            SparseLayout::VoxelMajor { mask, num_spots } => {
                let rows = u32::try_from(mask.size()).map_err(|_| {
                    Error::config_invalid("mask size exceeds u32 range")
                        .with_context("mask_size", mask.size())
                })?;
                (rows, num_spots)
            }
        };
        if rows == 0 || cols == 0 {
            return Err(Error::config_invalid("matrix shape must be positive")
                .with_context("layout", self.name())
                .with_context("shape", format!("({rows}, {cols})")));
        }
        Ok((rows, cols))
    }
}

impl std::fmt::Debug for SparseLayout<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SparseLayout::SpotMajor {
                num_spots,
                voxel_count,
            } => f
                .debug_struct("SpotMajor")
                .field("num_spots", num_spots)
                .field("voxel_count", voxel_count)
                .finish(),
            SparseLayout::VoxelMajor { mask, num_spots } => f
                .debug_struct("VoxelMajor")
                .field("mask_size", &mask.size())
                .field("num_spots", num_spots)
                .finish(),
        }
    }
}
