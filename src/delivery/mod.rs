//! Record delivery.
//!
//! The pipeline hands its final records to a [`RecordSink`]. [`HttpSink`] posts them to the
//! configured API; tests and dry runs can plug in their own sink.

mod http;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::PipelineResult;
use crate::models::ServiceRecord;

pub use http::HttpSink;

/// What the downstream endpoint answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    /// Parsed JSON body, or the raw body as a JSON string when it is not JSON.
    pub body: serde_json::Value,
}

/// Destination for the final record sequence.
///
/// One call per run. Implementations report failures as [`crate::PipelineError::Delivery`] and
/// do not retry.
pub trait RecordSink {
    fn deliver(&self, records: &[ServiceRecord]) -> PipelineResult<DeliveryResponse>;
}
