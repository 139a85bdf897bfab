//! Cell normalization for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] with every text cell lower-cased.
///
/// Numbers, booleans and nulls pass through unchanged.
pub fn normalize_text(dataset: &DataSet) -> DataSet {
    dataset.map_values(|v| match v {
        Value::Utf8(s) => Value::Utf8(s.to_lowercase()),
        other => other.clone(),
    })
}
