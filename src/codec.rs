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

//! Little-endian sample packing shared by every encoder.

use byteorder::ByteOrder;
use byteorder::LittleEndian;

mod private {
    pub trait Sealed {}

    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A fixed-width numeric sample that can be written as raw little-endian bytes.
pub trait SampleType: Copy + private::Sealed {
    /// Width of one sample in bytes.
    const SIZE: usize;
    /// NumPy array-protocol type string, e.g. `<f8`.
    const NPY_DESCR: &'static str;
    /// MetaImage `ElementType` value, e.g. `MET_DOUBLE`.
    const MET_ELEMENT_TYPE: &'static str;

    /// Packs `src` into `dst`, which must be exactly `src.len() * SIZE` bytes.
    fn write_le_into(src: &[Self], dst: &mut [u8]);
}

impl SampleType for u16 {
    const SIZE: usize = 2;
    const NPY_DESCR: &'static str = "<u2";
    const MET_ELEMENT_TYPE: &'static str = "MET_USHORT";

    fn write_le_into(src: &[Self], dst: &mut [u8]) {
        LittleEndian::write_u16_into(src, dst);
    }
}

impl SampleType for u32 {
    const SIZE: usize = 4;
    const NPY_DESCR: &'static str = "<u4";
    const MET_ELEMENT_TYPE: &'static str = "MET_UINT";

    fn write_le_into(src: &[Self], dst: &mut [u8]) {
        LittleEndian::write_u32_into(src, dst);
    }
}

impl SampleType for f32 {
    const SIZE: usize = 4;
    const NPY_DESCR: &'static str = "<f4";
    const MET_ELEMENT_TYPE: &'static str = "MET_FLOAT";

    fn write_le_into(src: &[Self], dst: &mut [u8]) {
        LittleEndian::write_f32_into(src, dst);
    }
}

impl SampleType for f64 {
    const SIZE: usize = 8;
    const NPY_DESCR: &'static str = "<f8";
    const MET_ELEMENT_TYPE: &'static str = "MET_DOUBLE";

    fn write_le_into(src: &[Self], dst: &mut [u8]) {
        LittleEndian::write_f64_into(src, dst);
    }
}

/// Copies `samples` into a freshly allocated little-endian byte buffer.
pub fn to_le_bytes<T: SampleType>(samples: &[T]) -> Vec<u8> {
    let mut bytes = vec![0u8; samples.len() * T::SIZE];
    T::write_le_into(samples, &mut bytes);
    bytes
}

/// A growable byte buffer for assembling headers and payloads.
pub(crate) struct SampleBytes {
    bytes: Vec<u8>,
}

impl SampleBytes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn write(&mut self, buf: &[u8]) {
        self.bytes.extend_from_slice(buf);
    }

    pub fn write_u8(&mut self, n: u8) {
        self.bytes.push(n);
    }

    pub fn write_u16_le(&mut self, n: u16) {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, n);
        self.write(&buf);
    }

    pub fn write_samples<T: SampleType>(&mut self, samples: &[T]) {
        let start = self.bytes.len();
        self.bytes.resize(start + samples.len() * T::SIZE, 0);
        T::write_le_into(samples, &mut self.bytes[start..]);
    }
}
