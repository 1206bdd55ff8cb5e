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

//! Read-only view of the (voxel, spot, dose) accumulation table.
//!
//! The table is a fixed-capacity array of slots. A slot whose two keys both
//! differ from [`EMPTY_KEY`] is occupied; an occupied slot with a positive
//! value is live. Exports always scan every slot in `0..capacity` and filter
//! them, so correctness never depends on a logical entry count or on the
//! order in which the hash placed entries.
//!
//! # Usage
//!
//! ```rust
//! # use dose_export::table::{AccumulationTable, ScoreTable};
//! let mut table = AccumulationTable::new(8).unwrap();
//! table.accumulate(12, 0, 1.5).unwrap();
//! table.accumulate(12, 0, 0.5).unwrap();
//! assert_eq!(table.get(12, 0), Some(2.0));
//! assert_eq!(table.live_entries().count(), 1);
//! ```

mod hash_table;
mod mask;

pub use self::hash_table::AccumulationTable;
pub use self::mask::RegionMask;
pub use self::mask::VoxelMask;

/// Key value marking an empty slot, on both keys.
pub const EMPTY_KEY: u32 = u32::MAX;

/// One slot of the accumulation table.
///
/// `key1` is the voxel index, `key2` the spot index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub key1: u32,
    pub key2: u32,
    pub value: f64,
}

impl Entry {
    /// An empty slot.
    pub const EMPTY: Entry = Entry {
        key1: EMPTY_KEY,
        key2: EMPTY_KEY,
        value: 0.0,
    };

    pub const fn new(key1: u32, key2: u32, value: f64) -> Self {
        Self { key1, key2, value }
    }

    /// Returns true if neither key is the sentinel.
    pub fn is_occupied(&self) -> bool {
        self.key1 != EMPTY_KEY && self.key2 != EMPTY_KEY
    }

    /// Returns true if the slot is occupied and carries a positive value.
    pub fn is_live(&self) -> bool {
        self.is_occupied() && self.value > 0.0
    }
}

impl Default for Entry {
    fn default() -> Self {
        Entry::EMPTY
    }
}

/// The slot-level contract every exporter reads through.
pub trait ScoreTable {
    /// Number of slots, fixed at creation.
    fn capacity(&self) -> usize;

    /// Returns the slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity()`.
    fn slot(&self, index: usize) -> Entry;

    /// Iterates over every slot in scan order.
    fn slots_iter(&self) -> SlotIter<'_, Self> {
        SlotIter {
            table: self,
            index: 0,
        }
    }

    /// Iterates over the live slots in scan order.
    fn live_entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.slots_iter().filter(Entry::is_live)
    }
}

impl ScoreTable for [Entry] {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn slot(&self, index: usize) -> Entry {
        self[index]
    }
}

impl ScoreTable for Vec<Entry> {
    fn capacity(&self) -> usize {
        self.len()
    }

    fn slot(&self, index: usize) -> Entry {
        self[index]
    }
}

/// Iterator over all slots of a [`ScoreTable`].
pub struct SlotIter<'a, T: ScoreTable + ?Sized> {
    table: &'a T,
    index: usize,
}

impl<T: ScoreTable + ?Sized> Iterator for SlotIter<'_, T> {
    type Item = Entry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.table.capacity() {
            return None;
        }
        let entry = self.table.slot(self.index);
        self.index += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.capacity().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}
