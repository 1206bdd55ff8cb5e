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

use std::path::Path;

use crate::config::GridDims;
use crate::dense::QuantizedGrid;
use crate::dense::export_quantized_grid;
use crate::error::Error;
use crate::report::ExportReport;
use crate::table::ScoreTable;

/// Result reported by a [`QuantizedGridEncoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutcome {
    pub success: bool,
    /// Diagnostic text from the encoder, possibly empty.
    pub message: String,
}

impl EncodeOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Writes a quantized dose grid into a medical-image dataset.
///
/// `samples` is borrowed for the duration of the call only; an encoder that
/// needs the pixels afterwards copies them. Stored values multiplied by
/// `reconstruction_factor` give dose in output units.
pub trait QuantizedGridEncoder {
    fn encode(
        &self,
        samples: &[u16],
        reconstruction_factor: f64,
        dims: GridDims,
        output: &Path,
    ) -> EncodeOutcome;
}

/// A quantized grid together with what the encoder made of it.
#[derive(Debug, Clone)]
pub struct QuantizedExport {
    pub grid: QuantizedGrid,
    pub outcome: EncodeOutcome,
    pub report: ExportReport,
}

/// Runs the dense path over `table` and passes the quantized grid to `encoder`.
///
/// Reduction errors are returned as `Err`. An encoder failure is not an
/// error of this function: it is returned unmodified in
/// [`QuantizedExport::outcome`] and is not retried.
pub fn export_quantized<T, E>(
    table: &T,
    dims: GridDims,
    scale: f64,
    encoder: &E,
    output: &Path,
) -> Result<QuantizedExport, Error>
where
    T: ScoreTable + ?Sized,
    E: QuantizedGridEncoder + ?Sized,
{
    let (grid, report) = export_quantized_grid(table, dims, scale)?;
    let outcome = encoder.encode(
        grid.samples(),
        grid.reconstruction_factor(),
        grid.dims(),
        output,
    );
    if !outcome.success {
        log::error!(
            "quantized dataset encoder failed for {}: {}",
            output.display(),
            outcome.message
        );
    }
    Ok(QuantizedExport {
        grid,
        outcome,
        report,
    })
}
