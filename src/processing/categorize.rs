//! Forward-filled category tags.

use crate::error::PipelineResult;
use crate::types::{DataSet, Value};

/// Appends `tag_column`, tagging each row with the most recent `source_column` value that is a
/// member of `vocabulary`.
///
/// The scan runs top to bottom with a single current-tag accumulator, so row order matters.
/// Rows above the first match get [`Value::Null`]. Matching is exact on text cells; callers
/// normalize the table and the vocabulary first.
pub fn categorize<S: AsRef<str>>(
    dataset: &DataSet,
    source_column: &str,
    tag_column: &str,
    vocabulary: &[S],
) -> PipelineResult<DataSet> {
    let idx = dataset.schema.require(source_column)?;

    let mut current: Option<&str> = None;
    let tags: Vec<Value> = dataset
        .rows
        .iter()
        .map(|row| {
            if let Some(Value::Utf8(s)) = row.get(idx) {
                if let Some(tag) = vocabulary.iter().map(|t| t.as_ref()).find(|t| *t == s.as_str()) {
                    current = Some(tag);
                }
            }
            current.map_or(Value::Null, |t| Value::Utf8(t.to_string()))
        })
        .collect();

    dataset.with_column(tag_column, tags)
}
