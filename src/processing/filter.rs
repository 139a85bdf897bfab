//! Row filtering for [`crate::types::DataSet`].

use crate::error::PipelineResult;
use crate::types::DataSet;

/// Returns a new [`DataSet`] without the rows whose `column` cell is null.
///
/// Surviving rows keep their order. A missing `column` is a schema error.
pub fn drop_rows_with_null(dataset: &DataSet, column: &str) -> PipelineResult<DataSet> {
    let idx = dataset.schema.require(column)?;
    Ok(dataset.filter_rows(|row| row.get(idx).is_some_and(|v| !v.is_null())))
}

/// Applies [`drop_rows_with_null`] for every column in `columns`.
///
/// All columns are checked before any row is dropped.
pub fn drop_rows_missing_any<S: AsRef<str>>(dataset: &DataSet, columns: &[S]) -> PipelineResult<DataSet> {
    let idxs = columns
        .iter()
        .map(|c| dataset.schema.require(c.as_ref()))
        .collect::<PipelineResult<Vec<_>>>()?;
    Ok(dataset.filter_rows(|row| {
        idxs.iter()
            .all(|&idx| row.get(idx).is_some_and(|v| !v.is_null()))
    }))
}
