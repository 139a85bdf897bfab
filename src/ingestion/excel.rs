#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};
use crate::types::{DataSet, Schema, Value};

use super::header;

/// Load one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) into an in-memory `DataSet`.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row and keeps every column it spans
/// - Names blank header cells `Unnamed: <column index>`
/// - Reads remaining rows, trimming text and mapping empty cells and blank strings to
///   [`Value::Null`]
pub fn ingest_excel_from_path(path: impl AsRef<Path>, sheet_name: Option<&str>) -> PipelineResult<DataSet> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;

    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| PipelineError::schema("workbook has no sheets"))?,
    };

    let range = workbook.worksheet_range(&sheet)?;
    let ds = ingest_sheet_range(&range).map_err(|e| wrap_schema_err_with_sheet(&sheet, e))?;
    debug!(
        path = %path.display(),
        sheet = %sheet,
        rows = ds.row_count(),
        columns = ds.column_count(),
        "read worksheet"
    );
    Ok(ds)
}

fn ingest_sheet_range(range: &calamine::Range<Data>) -> PipelineResult<DataSet> {
    // The range starts at the first used cell, not at A1.
    let first_column = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut rows_iter = range.rows().skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));
    let header_cells: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| PipelineError::schema("sheet has no non-empty rows (no header row found)"))?
        .iter()
        .map(cell_to_header_string)
        .collect();
    let schema = Schema::new(header::column_names(&header_cells, first_column));

    let rows = rows_iter
        .map(|row| {
            (0..schema.len())
                .map(|idx| convert_cell(row.get(idx).unwrap_or(&Data::Empty)))
                .collect()
        })
        .collect();

    Ok(DataSet::new(schema, rows))
}

fn wrap_schema_err_with_sheet(sheet: &str, err: PipelineError) -> PipelineError {
    match err {
        PipelineError::Schema { message } => PipelineError::Schema {
            message: format!("sheet '{sheet}': {message}"),
        },
        other => other,
    }
}

fn cell_to_header_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn convert_cell(c: &Data) -> Value {
    match c {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) => match s.trim() {
            "" => Value::Null,
            text => Value::Utf8(text.to_string()),
        },
        Data::Int(i) => Value::Int64(*i),
        Data::Float(f) => Value::Float64(*f),
        Data::Bool(b) => Value::Bool(*b),
        other => Value::Utf8(other.to_string()),
    }
}
