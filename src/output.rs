//! Processed-data file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::PipelineResult;
use crate::models::ServiceRecord;

/// Write `records` to `path` as a pretty-printed JSON array (4-space indent).
///
/// Any existing file is overwritten; missing parent directories are created.
pub fn save_records(path: impl AsRef<Path>, records: &[ServiceRecord]) -> PipelineResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(path = %path.display(), records = records.len(), "saved processed data");
    Ok(())
}

/// Read a processed-data file written by [`save_records`].
pub fn load_records(path: impl AsRef<Path>) -> PipelineResult<Vec<ServiceRecord>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
