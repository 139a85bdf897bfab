use thiserror::Error;

/// Convenience result type used across the pipeline.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type returned by every pipeline stage.
///
/// All variants are fatal for a run: the pipeline is a single-shot batch job and nothing is
/// recovered mid-way. Messages name the offending column, row or configuration key.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A referenced column does not exist (or already exists, when appending).
    #[error("schema error: {message}")]
    Schema { message: String },

    /// A configuration value is missing or malformed.
    #[error("config error: key '{key}': {message}")]
    Config { key: String, message: String },

    /// A row could not be turned into a well-formed record.
    #[error("validation error at row {row} column '{column}': {message}")]
    Validation {
        row: usize,
        column: String,
        message: String,
    },

    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Workbook could not be opened or read (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV input could not be read.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output could not be written or read back.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Delivery to the downstream endpoint failed (network error or non-2xx status).
    #[error("delivery error: {message}")]
    Delivery {
        /// HTTP status, when the server answered at all.
        status: Option<u16>,
        message: String,
    },
}

impl PipelineError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub(crate) fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            key: key.into(),
            message: message.into(),
        }
    }

    pub(crate) fn validation(row: usize, column: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            row,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        Self::Delivery {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
