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
use crate::sparse::aggregate::Rows;

/// Compressed-sparse-row matrix with `u32` indices and `f64` values.
///
/// `indptr` has `rows + 1` entries starting at zero and ending at `nnz`; the
/// columns and values of row `r` are `indices[indptr[r]..indptr[r + 1]]` and
/// the matching slice of `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    shape: [u32; 2],
    indptr: Vec<u32>,
    indices: Vec<u32>,
    data: Vec<f64>,
}

impl SparseMatrix {
    /// Format tag stored alongside the arrays.
    pub const FORMAT: &'static str = "csr";

    /// Concatenates `rows` in row order.
    pub(crate) fn from_rows(rows: Rows, num_cols: u32) -> Result<Self, Error> {
        let num_rows = u32::try_from(rows.len()).map_err(|_| {
            Error::config_invalid("row count exceeds u32 range").with_context("rows", rows.len())
        })?;
        let nnz: usize = rows.iter().map(Vec::len).sum();
        if u32::try_from(nnz).is_err() {
            return Err(
                Error::config_invalid("non-zero count exceeds u32 range").with_context("nnz", nnz)
            );
        }

        let mut indptr = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);
        indptr.push(0u32);
        for row in rows {
            for (column, value) in row {
                indices.push(column);
                data.push(value);
            }
            // nnz fits u32, so every prefix does too
            indptr.push(indices.len() as u32);
        }

        debug_assert_eq!(indices.len(), data.len());
        debug_assert_eq!(indptr.last().copied(), Some(nnz as u32));
        Ok(Self {
            shape: [num_rows, num_cols],
            indptr,
            indices,
            data,
        })
    }

    /// Returns `[rows, columns]`.
    pub fn shape(&self) -> [u32; 2] {
        self.shape
    }

    pub fn num_rows(&self) -> u32 {
        self.shape[0]
    }

    pub fn num_cols(&self) -> u32 {
        self.shape[1]
    }

    /// Number of stored values.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn format(&self) -> &'static str {
        Self::FORMAT
    }

    pub fn indptr(&self) -> &[u32] {
        &self.indptr
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Columns and values of `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows()`.
    pub fn row(&self, row: u32) -> (&[u32], &[f64]) {
        let start = self.indptr[row as usize] as usize;
        let end = self.indptr[row as usize + 1] as usize;
        (&self.indices[start..end], &self.data[start..end])
    }

    /// Iterates over every stored `(row, column, value)` triple in row order.
    pub fn triplets(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        (0..self.num_rows()).flat_map(move |row| {
            let (columns, values) = self.row(row);
            columns
                .iter()
                .zip(values.iter())
                .map(move |(&column, &value)| (row, column, value))
        })
    }
}
