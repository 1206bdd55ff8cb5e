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

use crate::error::Error;

/// Partial injective map from full voxel indices to compact row indices.
pub trait VoxelMask {
    /// Size of the compacted domain.
    fn size(&self) -> usize;

    /// Returns the compact index of `voxel`, or `None` if it is excluded.
    fn lookup(&self, voxel: u32) -> Option<u32>;
}

/// Region-of-interest mask backed by a dense lookup array.
///
/// Included voxels are numbered in ascending voxel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMask {
    compact: Vec<Option<u32>>,
    size: usize,
}

impl RegionMask {
    /// Builds a mask from one inclusion flag per voxel.
    pub fn from_flags(flags: &[bool]) -> Result<Self, Error> {
        let mut compact = Vec::with_capacity(flags.len());
        let mut next = 0u32;
        for &included in flags {
            if included {
                compact.push(Some(next));
                next = next
                    .checked_add(1)
                    .ok_or_else(|| Error::config_invalid("mask size exceeds u32 range"))?;
            } else {
                compact.push(None);
            }
        }
        Ok(Self {
            compact,
            size: next as usize,
        })
    }

    /// Builds a mask over `voxel_count` voxels including exactly `voxels`.
    ///
    /// Duplicates are ignored; any voxel `>= voxel_count` is rejected.
    pub fn from_voxels(voxel_count: usize, voxels: &[u32]) -> Result<Self, Error> {
        let mut flags = vec![false; voxel_count];
        for &voxel in voxels {
            let Some(flag) = flags.get_mut(voxel as usize) else {
                return Err(Error::config_invalid("mask voxel outside the grid")
                    .with_context("voxel", voxel)
                    .with_context("voxel_count", voxel_count));
            };
            *flag = true;
        }
        Self::from_flags(&flags)
    }

    /// Size of the full voxel domain the mask was built over.
    pub fn domain_size(&self) -> usize {
        self.compact.len()
    }
}

impl VoxelMask for RegionMask {
    fn size(&self) -> usize {
        self.size
    }

    fn lookup(&self, voxel: u32) -> Option<u32> {
        self.compact.get(voxel as usize).copied().flatten()
    }
}
