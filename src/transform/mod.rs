//! Cleaned table → ordered [`ServiceRecord`]s.
//!
//! [`RowMapper`] turns one row into a record; [`transform`] applies it to a whole table, in row
//! order, stopping at the first row that cannot be mapped.

pub mod mapper;
pub mod provider;

pub use mapper::{map_row, RowMapper, ServiceField};
pub use provider::ProviderColumn;

use tracing::debug;

use crate::error::PipelineResult;
use crate::models::ServiceRecord;
use crate::types::DataSet;

/// Map every row of `dataset` to a record, preserving row order.
///
/// Row numbers in errors are 1-based positions in `dataset`.
pub fn transform(dataset: &DataSet, provider_columns: &[ProviderColumn]) -> PipelineResult<Vec<ServiceRecord>> {
    let mapper = RowMapper::new(&dataset.schema, provider_columns);
    let records = dataset
        .rows
        .iter()
        .enumerate()
        .map(|(idx0, row)| mapper.map_row(idx0 + 1, row))
        .collect::<PipelineResult<Vec<_>>>()?;

    debug!(records = records.len(), "transformed table");
    Ok(records)
}
