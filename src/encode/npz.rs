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
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::codec::SampleBytes;
use crate::codec::SampleType;
use crate::encode::artifact_path;
use crate::error::Error;
use crate::sparse::SparseMatrix;

const NPY_MAGIC: &[u8] = b"\x93NUMPY";
const NPY_VERSION: [u8; 2] = [1, 0];
/// Magic, version and header length.
const NPY_PREAMBLE_BYTES: usize = 10;
const NPY_HEADER_ALIGN: usize = 64;

/// How an entry is added to an `.npz` archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpzMode {
    /// Create the archive, truncating any existing file.
    Create,
    /// Add the entry to an existing archive.
    Append,
}

/// Encodes `samples` as a one-dimensional `.npy` array.
pub fn npy_bytes<T: SampleType>(samples: &[T]) -> Vec<u8> {
    let shape = format!("({},)", samples.len());
    let mut bytes = npy_header(T::NPY_DESCR, &shape, samples.len() * T::SIZE);
    bytes.write_samples(samples);
    bytes.into_bytes()
}

/// Encodes `tag` as a zero-dimensional fixed-width byte string (`|S<n>`).
fn npy_tag_bytes(tag: &str) -> Vec<u8> {
    let descr = format!("|S{}", tag.len());
    let mut bytes = npy_header(&descr, "()", tag.len());
    bytes.write(tag.as_bytes());
    bytes.into_bytes()
}

fn npy_header(descr: &str, shape: &str, payload_len: usize) -> SampleBytes {
    let dict = format!("{{'descr': '{descr}', 'fortran_order': False, 'shape': {shape}, }}");
    // header text ends with '\n' and pads the preamble + text to the alignment
    let unpadded = NPY_PREAMBLE_BYTES + dict.len() + 1;
    let padding = (NPY_HEADER_ALIGN - unpadded % NPY_HEADER_ALIGN) % NPY_HEADER_ALIGN;
    let header_len = dict.len() + padding + 1;

    let mut bytes = SampleBytes::with_capacity(NPY_PREAMBLE_BYTES + header_len + payload_len);
    bytes.write(NPY_MAGIC);
    bytes.write(&NPY_VERSION);
    // dict text is short and fixed in shape, far below u16::MAX
    bytes.write_u16_le(header_len as u16);
    bytes.write(dict.as_bytes());
    bytes.write(&vec![b' '; padding]);
    bytes.write_u8(b'\n');
    bytes
}

/// Stores `npy` as `<name>.npy` inside the archive at `path`, uncompressed.
pub fn write_npz_entry(path: &Path, name: &str, npy: &[u8], mode: NpzMode) -> Result<(), Error> {
    let mut archive = match mode {
        NpzMode::Create => {
            let file = File::create(path).map_err(|e| Error::io_failure(path, e))?;
            ZipWriter::new(file)
        }
        NpzMode::Append => {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(path)
                .map_err(|e| Error::io_failure(path, e))?;
            ZipWriter::new_append(file).map_err(|e| Error::io_failure(path, e))?
        }
    };

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .large_file(npy.len() as u64 >= u32::MAX as u64);
    archive
        .start_file(format!("{name}.npy"), options)
        .map_err(|e| Error::io_failure(path, e))?;
    archive
        .write_all(npy)
        .map_err(|e| Error::io_failure(path, e))?;
    archive.finish().map_err(|e| Error::io_failure(path, e))?;
    Ok(())
}

/// Writes `matrix` to `dir/name.npz` in the layout `scipy.sparse.load_npz` reads.
///
/// Entries are written in the order `indices`, `indptr`, `shape`, `data`,
/// `format`; the first one creates the archive.
pub fn write_csr_npz(dir: &Path, name: &str, matrix: &SparseMatrix) -> Result<PathBuf, Error> {
    let path = artifact_path(dir, name, ".npz");
    write_npz_entry(&path, "indices", &npy_bytes(matrix.indices()), NpzMode::Create)?;
    write_npz_entry(&path, "indptr", &npy_bytes(matrix.indptr()), NpzMode::Append)?;
    write_npz_entry(&path, "shape", &npy_bytes(&matrix.shape()), NpzMode::Append)?;
    write_npz_entry(&path, "data", &npy_bytes(matrix.data()), NpzMode::Append)?;
    write_npz_entry(&path, "format", &npy_tag_bytes(matrix.format()), NpzMode::Append)?;
    log::info!(
        "wrote csr archive {} (shape {:?}, nnz {})",
        path.display(),
        matrix.shape(),
        matrix.nnz()
    );
    Ok(path)
}
