//! CSV ingestion implementation.

use std::path::Path;

use crate::error::PipelineResult;
use crate::types::{DataSet, Schema, Value};

use super::header;

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - The first record is the header row; every header column is kept.
/// - Blank headers are named `Unnamed: <column index>`, repeated headers get `.1`, `.2`, ...
/// - Short rows are padded with [`Value::Null`].
/// - Cell types are inferred per cell (see [`infer_value`]).
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> PipelineResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> PipelineResult<DataSet> {
    let raw_headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let schema = Schema::new(header::column_names(&raw_headers, 0));

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = (0..schema.len())
            .map(|idx| infer_value(record.get(idx).unwrap_or("")))
            .collect();
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

/// Infer a typed value from raw CSV text.
///
/// Empty/whitespace-only text is [`Value::Null`]; integers and floats become numeric values;
/// everything else is kept as trimmed text.
pub fn infer_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int64(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float64(f),
        _ => Value::Utf8(trimmed.to_owned()),
    }
}
