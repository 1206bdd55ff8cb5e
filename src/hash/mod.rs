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

//! Slot hashing for the accumulation table.

pub(crate) const DEFAULT_SEED: u32 = 9001;

/// Hashes a (voxel, spot) key pair with MurmurHash3 x64/128.
///
/// The pair is hashed as eight little-endian bytes, `key1` first.
#[inline]
pub(crate) fn hash_key_pair(key1: u32, key2: u32) -> u64 {
    let mut buf = [0u8; 8];
    buf[..4].copy_from_slice(&key1.to_le_bytes());
    buf[4..].copy_from_slice(&key2.to_le_bytes());
    let (h1, _) = mur3::murmurhash3_x64_128(&buf, DEFAULT_SEED);
    h1
}
