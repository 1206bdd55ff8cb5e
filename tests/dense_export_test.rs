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

mod common;

use std::cell::RefCell;
use std::path::Path;
use std::path::PathBuf;

use common::XorShift;
use common::init_logging;
use common::slots_with;
use dose_export::config::GridDims;
use dose_export::dense::QUANTIZED_MAX;
use dose_export::dense::accumulate_dense;
use dose_export::dense::export_quantized_grid;
use dose_export::encode::EncodeOutcome;
use dose_export::encode::QuantizedGridEncoder;
use dose_export::encode::export_quantized;
use dose_export::error::ErrorKind;
use dose_export::table::AccumulationTable;
use dose_export::table::Entry;
use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::ge;
use googletest::prelude::le;
use googletest::prelude::near;

#[test]
fn test_sums_across_spots() {
    init_logging();
    let slots = slots_with(
        6,
        &[
            Entry::new(0, 0, 1.0),
            Entry::new(0, 3, 2.0),
            Entry::new(2, 1, 0.5),
            Entry::new(1, 0, 0.0),
        ],
    );
    let (grid, report) = accumulate_dense(&slots[..], GridDims::new(3, 1, 1), 2.0).unwrap();
    assert_eq!(grid.values(), &[6.0, 0.0, 1.0]);
    assert_that!(grid.max(), eq(6.0));
    assert_that!(grid.sum(), eq(7.0));
    assert_that!(report.emitted, eq(3));
    assert_that!(report.scanned, eq(6));
}

#[test]
fn test_out_of_grid_voxel_is_dropped() {
    init_logging();
    let slots = slots_with(4, &[Entry::new(0, 0, 1.0), Entry::new(10, 0, 5.0)]);
    let (grid, report) = accumulate_dense(&slots[..], GridDims::new(2, 2, 1), 1.0).unwrap();
    assert_eq!(grid.values(), &[1.0, 0.0, 0.0, 0.0]);
    assert_that!(report.dropped_out_of_bounds, eq(1));
    assert!(report.has_anomalies());
}

#[test]
fn test_all_zero_table() {
    let slots = slots_with(4, &[Entry::new(0, 0, 0.0), Entry::new(1, 1, -1.0)]);
    let (grid, report) = export_quantized_grid(&slots[..], GridDims::new(2, 1, 1), 1.0).unwrap();
    assert_eq!(grid.samples(), &[0, 0]);
    assert_that!(grid.scale_factor(), eq(1.0));
    assert_that!(grid.reconstruction_factor(), eq(1.0));
    assert_that!(report.emitted, eq(0));
}

#[test]
fn test_invalid_configuration() {
    let empty: Vec<Entry> = Vec::new();
    let err = accumulate_dense(&empty[..], GridDims::new(1, 1, 1), 1.0).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::ConfigInvalid));

    let slots = vec![Entry::EMPTY; 2];
    let err = accumulate_dense(&slots[..], GridDims::new(0, 1, 1), 1.0).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::ConfigInvalid));

    let err = accumulate_dense(&slots[..], GridDims::new(1, 1, 1), f64::NAN).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::ConfigInvalid));
}

#[test]
fn test_truncation_error_bound() {
    init_logging();
    let dims = GridDims::new(5, 4, 3);
    let voxel_count = dims.voxel_count().unwrap();
    let mut rng = XorShift::new(7);
    let mut table = AccumulationTable::new(512).unwrap();
    for _ in 0..300 {
        let dose = 0.001 + (rng.below(10_000) as f64) / 997.0;
        table
            .accumulate(rng.below(voxel_count), rng.below(9), dose)
            .unwrap();
    }

    let (dense, _) = accumulate_dense(&table, dims, 1.0).unwrap();
    let (grid, _) = export_quantized_grid(&table, dims, 1.0).unwrap();
    assert_that!(grid.scale_factor(), near(QUANTIZED_MAX / dense.max(), 1e-9));

    let step = 1.0 / grid.scale_factor();
    for (original, restored) in dense.values().iter().zip(grid.dequantize()) {
        // truncation only ever rounds down
        assert_that!(original - restored, ge(-1e-9));
        assert_that!(original - restored, le(step + 1e-9));
    }

    let quantized_sum: f64 = grid.samples().iter().map(|&s| s as f64).sum();
    let bound = voxel_count as f64 * step;
    assert_that!(
        (quantized_sum / grid.scale_factor() - dense.sum()).abs(),
        le(bound)
    );
}

struct RecordingEncoder {
    received: RefCell<Option<(Vec<u16>, f64, GridDims, PathBuf)>>,
}

impl QuantizedGridEncoder for RecordingEncoder {
    fn encode(
        &self,
        samples: &[u16],
        reconstruction_factor: f64,
        dims: GridDims,
        output: &Path,
    ) -> EncodeOutcome {
        *self.received.borrow_mut() = Some((
            samples.to_vec(),
            reconstruction_factor,
            dims,
            output.to_path_buf(),
        ));
        EncodeOutcome::success()
    }
}

struct FailingEncoder;

impl QuantizedGridEncoder for FailingEncoder {
    fn encode(&self, _: &[u16], _: f64, _: GridDims, _: &Path) -> EncodeOutcome {
        EncodeOutcome::failure("disk full")
    }
}

#[test]
fn test_encoder_receives_quantized_grid() {
    init_logging();
    let slots = slots_with(4, &[Entry::new(0, 0, 1.0), Entry::new(1, 0, 4.0)]);
    let dims = GridDims::new(2, 1, 1);
    let encoder = RecordingEncoder {
        received: RefCell::new(None),
    };

    let export =
        export_quantized(&slots[..], dims, 1.0, &encoder, Path::new("/tmp/dose.dcm")).unwrap();
    assert!(export.outcome.success);
    assert_eq!(export.grid.samples(), &[16383, 65535]);

    let (samples, factor, received_dims, output) = encoder.received.into_inner().unwrap();
    assert_eq!(samples, export.grid.samples());
    assert_that!(factor, eq(export.grid.reconstruction_factor()));
    assert_that!(received_dims, eq(dims));
    assert_eq!(output, PathBuf::from("/tmp/dose.dcm"));
}

#[test]
fn test_encoder_failure_is_returned_unmodified() {
    init_logging();
    let slots = slots_with(2, &[Entry::new(0, 0, 1.0)]);
    let export = export_quantized(
        &slots[..],
        GridDims::new(1, 1, 1),
        1.0,
        &FailingEncoder,
        Path::new("out.dcm"),
    )
    .unwrap();
    assert_eq!(export.outcome, EncodeOutcome::failure("disk full"));
    assert_eq!(export.grid.samples(), &[65535]);
}
