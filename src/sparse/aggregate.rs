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

use crate::config::SparseLayout;
use crate::error::Error;
use crate::report::ExportReport;
use crate::sparse::transform::ValueTransform;
use crate::table::ScoreTable;
use crate::table::VoxelMask;

/// Per-row `(column, value)` lists, indexed by row.
pub(crate) type Rows = Vec<Vec<(u32, f64)>>;

/// Groups the table's entries into rows according to `layout`.
///
/// Spot-major rows keep scan order. Voxel-major rows are stably sorted by
/// column before returning.
pub(crate) fn aggregate_rows<T: ScoreTable + ?Sized>(
    table: &T,
    layout: SparseLayout<'_>,
    shape: (u32, u32),
    transform: &ValueTransform<'_>,
) -> Result<(Rows, ExportReport), Error> {
    let mut rows: Rows = vec![Vec::new(); shape.0 as usize];
    let mut report = ExportReport::default();

    match layout {
        SparseLayout::SpotMajor { .. } => {
            aggregate_spot_major(table, shape, transform, &mut rows, &mut report)?;
        }
        SparseLayout::VoxelMajor { mask, .. } => {
            aggregate_voxel_major(table, mask, shape, transform, &mut rows, &mut report)?;
            sort_rows(&mut rows);
        }
    }

    Ok((rows, report))
}

fn aggregate_spot_major<T: ScoreTable + ?Sized>(
    table: &T,
    shape: (u32, u32),
    transform: &ValueTransform<'_>,
    rows: &mut Rows,
    report: &mut ExportReport,
) -> Result<(), Error> {
    for entry in table.slots_iter() {
        report.scanned += 1;
        if !entry.is_occupied() {
            continue;
        }
        report.occupied += 1;
        if !entry.is_live() {
            report.skipped_non_positive += 1;
            continue;
        }

        let (row, column) = (entry.key2, entry.key1);
        check_bounds(row, column, shape)?;
        let value = transform.apply(entry.value, entry.key2)?;
        rows[row as usize].push((column, value));
        report.emitted += 1;
    }
    Ok(())
}

fn aggregate_voxel_major<T: ScoreTable + ?Sized>(
    table: &T,
    mask: &dyn VoxelMask,
    shape: (u32, u32),
    transform: &ValueTransform<'_>,
    rows: &mut Rows,
    report: &mut ExportReport,
) -> Result<(), Error> {
    for entry in table.slots_iter() {
        report.scanned += 1;
        if !entry.is_occupied() {
            continue;
        }
        report.occupied += 1;

        let Some(row) = mask.lookup(entry.key1) else {
            log::debug!("voxel {} outside mask, entry skipped", entry.key1);
            report.skipped_outside_mask += 1;
            continue;
        };
        // the scorer only records positive dose inside the mask
        if !entry.is_live() {
            return Err(
                Error::invariant_violated("non-positive value inside the mask")
                    .with_context("voxel", entry.key1)
                    .with_context("spot", entry.key2)
                    .with_context("value", entry.value),
            );
        }

        let column = entry.key2;
        check_bounds(row, column, shape)?;
        let value = transform.apply(entry.value, entry.key2)?;
        rows[row as usize].push((column, value));
        report.emitted += 1;
    }
    Ok(())
}

fn check_bounds(row: u32, column: u32, shape: (u32, u32)) -> Result<(), Error> {
    if row >= shape.0 {
        return Err(Error::bounds_violation("row", row as u64, shape.0 as u64));
    }
    if column >= shape.1 {
        return Err(Error::bounds_violation("column", column as u64, shape.1 as u64));
    }
    Ok(())
}

/// Stable sort of every row by column; ties keep scan order.
fn sort_rows(rows: &mut Rows) {
    for row in rows.iter_mut().filter(|r| r.len() > 1) {
        row.sort_by_key(|&(column, _)| column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportOptions;
    use crate::error::ErrorKind;
    use crate::table::Entry;
    use crate::table::RegionMask;

    #[test]
    fn test_sort_is_stable() {
        let mut rows: Rows = vec![vec![(3, 0.1), (1, 0.2), (3, 0.3), (0, 0.4)]];
        sort_rows(&mut rows);
        assert_eq!(rows[0], vec![(0, 0.4), (1, 0.2), (3, 0.1), (3, 0.3)]);
    }

    #[test]
    fn test_spot_major_keeps_scan_order() {
        let slots = vec![
            Entry::new(5, 0, 1.0),
            Entry::new(2, 0, 2.0),
            Entry::new(4, 1, 3.0),
        ];
        let options = ExportOptions::default();
        let transform = ValueTransform::new(&options);
        let layout = SparseLayout::SpotMajor {
            num_spots: 2,
            voxel_count: 6,
        };
        let (rows, report) = aggregate_rows(&slots[..], layout, (2, 6), &transform).unwrap();
        assert_eq!(rows[0], vec![(5, 1.0), (2, 2.0)]);
        assert_eq!(rows[1], vec![(4, 3.0)]);
        assert_eq!(report.emitted, 3);
    }

    #[test]
    fn test_voxel_major_mask_without_positive_value() {
        let mask = RegionMask::from_voxels(4, &[0, 1]).unwrap();
        let slots = vec![Entry::new(3, 0, 0.0), Entry::new(1, 0, 0.0)];
        let options = ExportOptions::default();
        let transform = ValueTransform::new(&options);
        let layout = SparseLayout::voxel_major(&mask, 1);
        let err = aggregate_rows(&slots[..], layout, (2, 1), &transform).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolated);
        assert_eq!(err.context("voxel"), Some("1"));
    }
}
