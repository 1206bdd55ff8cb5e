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

use crate::codec::SampleType;
use crate::codec::to_le_bytes;
use crate::config::GridGeometry;
use crate::encode::artifact_path;
use crate::error::Error;

const LOCAL_DATA_FILE: &str = "LOCAL";

/// Writes `dir/name.mhd` plus the detached payload `dir/name.raw`.
pub fn write_mhd<T: SampleType>(
    dir: &Path,
    name: &str,
    geometry: &GridGeometry,
    samples: &[T],
) -> Result<PathBuf, Error> {
    check_sample_count(geometry, samples.len())?;

    let raw_name = format!("{name}.raw");
    let raw_path = dir.join(&raw_name);
    write_file(&raw_path, &[to_le_bytes(samples).as_slice()])?;

    let header_path = artifact_path(dir, name, ".mhd");
    let header = render_header::<T>(geometry, &raw_name);
    write_file(&header_path, &[header.as_bytes()])?;
    log::info!("wrote {} with payload {}", header_path.display(), raw_path.display());
    Ok(header_path)
}

/// Writes `dir/name.mha` with the samples following the header inline.
pub fn write_mha<T: SampleType>(
    dir: &Path,
    name: &str,
    geometry: &GridGeometry,
    samples: &[T],
) -> Result<PathBuf, Error> {
    check_sample_count(geometry, samples.len())?;

    let path = artifact_path(dir, name, ".mha");
    let header = render_header::<T>(geometry, LOCAL_DATA_FILE);
    write_file(&path, &[header.as_bytes(), to_le_bytes(samples).as_slice()])?;
    log::info!("wrote {}", path.display());
    Ok(path)
}

fn check_sample_count(geometry: &GridGeometry, len: usize) -> Result<(), Error> {
    let expected = geometry.dims.voxel_count()? as usize;
    if len != expected {
        return Err(
            Error::config_invalid("sample count does not match grid dimensions")
                .with_context("samples", len)
                .with_context("voxels", expected),
        );
    }
    Ok(())
}

fn render_header<T: SampleType>(geometry: &GridGeometry, data_file: &str) -> String {
    let [sx, sy, sz] = geometry.spacing;
    let [ox, oy, oz] = geometry.origin;
    let dims = geometry.dims;
    let lines = [
        "ObjectType = Image".to_string(),
        "NDims = 3".to_string(),
        "BinaryData = True".to_string(),
        "BinaryDataByteOrderMSB = False".to_string(),
        "CompressedData = False".to_string(),
        "TransformMatrix = 1 0 0 0 1 0 0 0 1".to_string(),
        format!("Offset = {ox} {oy} {oz}"),
        "CenterOfRotation = 0 0 0".to_string(),
        "AnatomicalOrientation = RAI".to_string(),
        format!("DimSize = {} {} {}", dims.x, dims.y, dims.z),
        format!("ElementType = {}", T::MET_ELEMENT_TYPE),
        format!("ElementSpacing = {sx} {sy} {sz}"),
        // must stay last: readers treat what follows as payload
        format!("ElementDataFile = {data_file}"),
    ];
    let mut header = lines.join("\n");
    header.push('\n');
    header
}

fn write_file(path: &Path, parts: &[&[u8]]) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| Error::io_failure(path, e))?;
    let mut writer = BufWriter::new(file);
    for part in parts {
        writer
            .write_all(part)
            .map_err(|e| Error::io_failure(path, e))?;
    }
    writer.flush().map_err(|e| Error::io_failure(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridDims;

    #[test]
    fn test_header_fields() {
        let geometry = GridGeometry::new(GridDims::new(4, 3, 2))
            .with_spacing([2.5, 2.5, 3.0])
            .with_origin([-10.0, 0.5, 7.0]);
        let header = render_header::<f32>(&geometry, "dose.raw");
        assert!(header.contains("NDims = 3\n"));
        assert!(header.contains("DimSize = 4 3 2\n"));
        assert!(header.contains("ElementType = MET_FLOAT\n"));
        assert!(header.contains("ElementSpacing = 2.5 2.5 3\n"));
        assert!(header.contains("Offset = -10 0.5 7\n"));
        assert!(header.ends_with("ElementDataFile = dose.raw\n"));
    }

    #[test]
    fn test_sample_count_mismatch() {
        let geometry = GridGeometry::new(GridDims::new(2, 2, 1));
        let err = check_sample_count(&geometry, 3).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ConfigInvalid);
        assert_eq!(err.context("voxels"), Some("4"));
    }
}
