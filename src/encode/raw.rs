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

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use byteorder::LittleEndian;
use byteorder::WriteBytesExt;

use crate::encode::artifact_path;
use crate::error::Error;
use crate::table::ScoreTable;

struct RawFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RawFile {
    fn create(path: PathBuf) -> Result<Self, Error> {
        let file = File::create(&path).map_err(|e| Error::io_failure(&path, e))?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    fn write_u32(&mut self, n: u32) -> Result<(), Error> {
        self.writer
            .write_u32::<LittleEndian>(n)
            .map_err(|e| Error::io_failure(&self.path, e))
    }

    fn write_f64(&mut self, n: f64) -> Result<(), Error> {
        self.writer
            .write_f64::<LittleEndian>(n)
            .map_err(|e| Error::io_failure(&self.path, e))
    }

    fn finish(mut self) -> Result<PathBuf, Error> {
        self.writer
            .flush()
            .map_err(|e| Error::io_failure(&self.path, e))?;
        Ok(self.path)
    }
}

/// Dumps every live entry as three parallel headerless arrays.
///
/// Writes `<name>_key1.raw` and `<name>_key2.raw` as little-endian `u32` and
/// `<name>_value.raw` as little-endian `f64` holding `value * scale`. Returns
/// the number of entries written.
pub fn write_key_value_dump<T: ScoreTable + ?Sized>(
    table: &T,
    scale: f64,
    dir: &Path,
    name: &str,
) -> Result<usize, Error> {
    let mut key1 = RawFile::create(artifact_path(dir, name, "_key1.raw"))?;
    let mut key2 = RawFile::create(artifact_path(dir, name, "_key2.raw"))?;
    let mut value = RawFile::create(artifact_path(dir, name, "_value.raw"))?;

    let mut written = 0;
    for entry in table.live_entries() {
        key1.write_u32(entry.key1)?;
        key2.write_u32(entry.key2)?;
        value.write_f64(entry.value * scale)?;
        written += 1;
    }

    key1.finish()?;
    key2.finish()?;
    let path = value.finish()?;
    log::info!(
        "wrote {} live entries of {} slots next to {}",
        written,
        table.capacity(),
        path.display()
    );
    Ok(written)
}

/// Writes `samples * scale` as one headerless little-endian `f64` array.
pub fn write_raw_samples(
    dir: &Path,
    name: &str,
    samples: &[f64],
    scale: f64,
) -> Result<PathBuf, Error> {
    let mut out = RawFile::create(artifact_path(dir, name, ".raw"))?;
    for sample in samples {
        out.write_f64(sample * scale)?;
    }
    out.finish()
}
