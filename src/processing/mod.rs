//! Cleaning transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by the loader.
//! Each function returns a new dataset and leaves its input untouched.
//!
//! - [`normalize_text()`]: lower-case every text cell
//! - [`categorize()`]: append a forward-filled tag column
//! - [`drop_rows_with_null()`] / [`drop_rows_missing_any()`]: anchor-column row filtering
//! - [`Cleaner`]: the fixed sequence of steps the pipeline runs
//!
//! ## Example
//!
//! ```rust
//! use service_pricing_pipeline::config::CleaningConfig;
//! use service_pricing_pipeline::processing::Cleaner;
//! use service_pricing_pipeline::types::{DataSet, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(["SERVICE", "PRODUCT INDEX", "SP. 1", "Unnamed: 6"]),
//!     vec![
//!         vec![Value::Utf8("Head".into()), Value::Null, Value::Null, Value::Null],
//!         vec![
//!             Value::Utf8("MRI Brain".into()),
//!             Value::Utf8("HC-SER-0001".into()),
//!             Value::Float64(100.0),
//!             Value::Null,
//!         ],
//!     ],
//! );
//!
//! let cleaner = Cleaner::new(CleaningConfig {
//!     tag_vocabulary: vec!["head".to_string()],
//!     ..Default::default()
//! });
//! let cleaned = cleaner.clean(&ds).unwrap();
//!
//! assert_eq!(cleaned.row_count(), 1);
//! assert_eq!(cleaned.value(0, "SERVICE"), Some(&Value::Utf8("mri brain".into())));
//! assert_eq!(cleaned.value(0, "BODY_PART"), Some(&Value::Utf8("head".into())));
//! ```

pub mod categorize;
pub mod clean;
pub mod filter;
pub mod map;

pub use categorize::categorize;
pub use clean::Cleaner;
pub use filter::{drop_rows_missing_any, drop_rows_with_null};
pub use map::normalize_text;
