//! One run of the job: load → clean → transform → save → deliver.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::config::PipelineConfig;
use crate::delivery::{DeliveryResponse, RecordSink};
use crate::error::PipelineResult;
use crate::ingestion::{ingest_from_path, TracingObserver};
use crate::models::ServiceRecord;
use crate::output::save_records;
use crate::processing::Cleaner;
use crate::transform::transform;

/// What a completed run did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub input_rows: usize,
    pub cleaned_rows: usize,
    pub records: usize,
    pub output_path: PathBuf,
    pub response: DeliveryResponse,
}

/// Load and clean the input, then map it to records. No files are written.
pub fn build_records(config: &PipelineConfig) -> PipelineResult<(usize, usize, Vec<ServiceRecord>)> {
    let mut options = config.ingestion_options();
    options.observer = Some(Arc::new(TracingObserver));

    let raw = ingest_from_path(&config.raw_data_path, &options)?;
    let cleaned = Cleaner::new(config.cleaning.clone()).clean(&raw)?;
    let records = transform(&cleaned, &config.provider_columns)?;
    Ok((raw.row_count(), cleaned.row_count(), records))
}

/// Run every stage once, in order. The first error ends the run.
pub fn run(config: &PipelineConfig, sink: &dyn RecordSink) -> PipelineResult<RunSummary> {
    info!(input = %config.raw_data_path.display(), "pipeline starting");

    let (input_rows, cleaned_rows, records) = build_records(config)?;
    save_records(&config.processed_data_path, &records)?;
    let response = sink.deliver(&records)?;

    info!(
        input_rows,
        cleaned_rows,
        records = records.len(),
        status = response.status,
        "pipeline finished"
    );
    Ok(RunSummary {
        input_rows,
        cleaned_rows,
        records: records.len(),
        output_path: config.processed_data_path.clone(),
        response,
    })
}
