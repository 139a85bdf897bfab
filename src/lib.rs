//! `service-pricing-pipeline` turns a medical service pricing spreadsheet into nested service
//! records and delivers them to an HTTP endpoint.
//!
//! A run is a single, synchronous batch:
//!
//! 1. [`ingestion`] loads the workbook (or CSV) into an in-memory [`types::DataSet`]
//! 2. [`processing::Cleaner`] lower-cases text, drops noise columns, appends a forward-filled
//!    body-part tag and drops rows missing an anchor column
//! 3. [`transform::transform`] maps each row to a [`models::ServiceRecord`] with its
//!    [`models::ProviderOffer`]s
//! 4. [`output::save_records`] writes the records as pretty-printed JSON
//! 5. a [`delivery::RecordSink`] (normally [`delivery::HttpSink`]) posts them downstream
//!
//! [`pipeline::run`] wires the stages together from a [`config::PipelineConfig`].
//!
//! ## Example: clean and transform an in-memory table
//!
//! ```rust
//! use service_pricing_pipeline::config::CleaningConfig;
//! use service_pricing_pipeline::processing::Cleaner;
//! use service_pricing_pipeline::transform::{transform, ProviderColumn};
//! use service_pricing_pipeline::types::{DataSet, Schema, Value};
//!
//! let raw = DataSet::new(
//!     Schema::new(["SERVICE", "PRODUCT INDEX", "DEPARTMENT", "SP. 1", "SP. 2", "Unnamed: 6"]),
//!     vec![vec![
//!         Value::Utf8("Service A".into()),
//!         Value::Utf8("HC-SER-0001".into()),
//!         Value::Utf8("Electrocardiography".into()),
//!         Value::Float64(100.0),
//!         Value::Null,
//!         Value::Null,
//!     ]],
//! );
//!
//! let cleaned = Cleaner::new(CleaningConfig::default()).clean(&raw)?;
//! let providers = vec![ProviderColumn::parse("SP. 1")?, ProviderColumn::parse("SP. 2")?];
//! let records = transform(&cleaned, &providers)?;
//!
//! assert_eq!(records[0].product_index, "hc-ser-0001");
//! assert_eq!(records[0].department.name, "electrocardiography");
//! assert_eq!(records[0].service_providers.len(), 1);
//! # Ok::<(), service_pricing_pipeline::PipelineError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: run configuration, built once from the environment
//! - [`ingestion`]: workbook/CSV loader
//! - [`processing`]: cleaning steps
//! - [`transform`]: row mapping and batch transformation
//! - [`models`]: output record types (the wire schema)
//! - [`output`]: processed-data file
//! - [`delivery`]: HTTP sink
//! - [`pipeline`]: end-to-end run
//! - [`error`]: error taxonomy

pub mod config;
pub mod delivery;
pub mod error;
pub mod ingestion;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod transform;
pub mod types;

pub use error::{PipelineError, PipelineResult};
