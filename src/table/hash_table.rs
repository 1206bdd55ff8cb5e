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
use crate::hash::hash_key_pair;
use crate::table::EMPTY_KEY;
use crate::table::Entry;
use crate::table::ScoreTable;

/// Fixed-capacity open-addressing table accumulating dose per (voxel, spot).
///
/// Slots are probed linearly starting at the MurmurHash3 of the key pair. The
/// table never grows: once every slot holds a distinct pair, accumulating a new
/// pair fails. Empty slots hold [`Entry::EMPTY`].
#[derive(Debug, Clone)]
pub struct AccumulationTable {
    slots: Vec<Entry>,
    num_occupied: usize,
}

impl AccumulationTable {
    /// Creates a table with `capacity` empty slots.
    pub fn new(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::config_invalid("table capacity must be positive"));
        }
        Ok(Self {
            slots: vec![Entry::EMPTY; capacity],
            num_occupied: 0,
        })
    }

    /// Wraps an existing slot array as-is, without rehashing.
    ///
    /// Slots keep their positions, so a table captured from a device or a file
    /// scans in the same order it was stored in. `get` and `accumulate` may not
    /// find pairs that were not placed at their probe position.
    pub fn from_slots(slots: Vec<Entry>) -> Result<Self, Error> {
        if slots.is_empty() {
            return Err(Error::config_invalid("table capacity must be positive"));
        }
        let num_occupied = slots.iter().filter(|e| e.is_occupied()).count();
        Ok(Self {
            slots,
            num_occupied,
        })
    }

    /// Adds `value` to the slot of (`key1`, `key2`), claiming an empty slot if
    /// the pair is not present yet.
    pub fn accumulate(&mut self, key1: u32, key2: u32, value: f64) -> Result<(), Error> {
        if key1 == EMPTY_KEY || key2 == EMPTY_KEY {
            return Err(Error::config_invalid("key collides with the empty-slot sentinel")
                .with_context("key1", key1)
                .with_context("key2", key2));
        }

        let Some(index) = self.probe(key1, key2) else {
            return Err(Error::config_invalid("accumulation table is full")
                .with_context("capacity", self.slots.len()));
        };

        let slot = &mut self.slots[index];
        if slot.is_occupied() {
            slot.value += value;
        } else {
            *slot = Entry::new(key1, key2, value);
            self.num_occupied += 1;
        }
        Ok(())
    }

    /// Returns the accumulated value of (`key1`, `key2`), if present.
    pub fn get(&self, key1: u32, key2: u32) -> Option<f64> {
        let index = self.probe(key1, key2)?;
        let slot = &self.slots[index];
        slot.is_occupied().then_some(slot.value)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.num_occupied
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.num_occupied == 0
    }

    /// Raw slot array in scan order.
    pub fn slots(&self) -> &[Entry] {
        &self.slots
    }

    /// Resets every slot to empty, keeping the capacity.
    pub fn clear(&mut self) {
        self.slots.fill(Entry::EMPTY);
        self.num_occupied = 0;
    }

    /// Finds the slot holding the pair, or the first empty slot on its probe
    /// sequence. Returns `None` when the sequence wraps around a full table.
    fn probe(&self, key1: u32, key2: u32) -> Option<usize> {
        let size = self.slots.len();
        let start = (hash_key_pair(key1, key2) % size as u64) as usize;
        let mut index = start;
        loop {
            let slot = &self.slots[index];
            if !slot.is_occupied() || (slot.key1 == key1 && slot.key2 == key2) {
                return Some(index);
            }
            index += 1;
            if index == size {
                index = 0;
            }
            if index == start {
                return None;
            }
        }
    }
}

impl ScoreTable for AccumulationTable {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: usize) -> Entry {
        self.slots[index]
    }
}
