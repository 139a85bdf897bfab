//! Run configuration.
//!
//! A [`PipelineConfig`] is built once at startup (usually from the process environment, see
//! [`PipelineConfig::from_env`]) and handed to each stage. Nothing below reads the environment on
//! its own.

use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};
use crate::ingestion::{ExcelSheetSelection, IngestionOptions};
use crate::transform::ProviderColumn;

pub const RAW_DATA: &str = "RAW_DATA";
pub const PROCESSED_DATA: &str = "PROCESSED_DATA";
pub const API_URL: &str = "MOCKY_API";
pub const HTTP_PROXY: &str = "POSTMAN_HTTP_PROXY";
pub const HTTPS_PROXY: &str = "POSTMAN_HTTPS_PROXY";
pub const PROXY_CERT: &str = "POSTMAN_CERT";
pub const ACCEPT_INVALID_CERTS: &str = "ACCEPT_INVALID_CERTS";
pub const BODY_PARTS: &str = "BODY_PARTS";
pub const SERVICE_PROVIDERS: &str = "SERVICE_PROVIDERS";
pub const NOISE_COLUMNS: &str = "NOISE_COLUMNS";
pub const ANCHOR_COLUMNS: &str = "ANCHOR_COLUMNS";
pub const SHEET_NAME: &str = "SHEET_NAME";

/// Settings for the cleaning stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningConfig {
    /// Columns removed before categorizing. Each must exist.
    pub noise_columns: Vec<String>,
    /// Column scanned for tag vocabulary matches.
    pub tag_source_column: String,
    /// Name of the appended tag column.
    pub tag_column: String,
    /// Tag vocabulary, trimmed and lower-cased.
    pub tag_vocabulary: Vec<String>,
    /// A row survives only if every anchor column is non-null.
    pub anchor_columns: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            noise_columns: vec!["Unnamed: 6".to_string()],
            tag_source_column: "SERVICE".to_string(),
            tag_column: "BODY_PART".to_string(),
            tag_vocabulary: Vec::new(),
            anchor_columns: vec!["PRODUCT INDEX".to_string(), "SP. 1".to_string()],
        }
    }
}

/// Connection settings for the HTTP sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub http: Option<String>,
    pub https: Option<String>,
    /// Extra PEM root certificate (e.g. an intercepting proxy's CA).
    pub ca_cert: Option<PathBuf>,
    /// Skip certificate verification entirely. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
}

impl ProxyConfig {
    /// Both proxy endpoints are set, so delivery should try the proxy path first.
    pub fn is_configured(&self) -> bool {
        self.http.is_some() && self.https.is_some()
    }
}

/// Everything a run needs, resolved up front.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub raw_data_path: PathBuf,
    pub processed_data_path: PathBuf,
    pub api_url: String,
    pub sheet_name: Option<String>,
    pub proxy: ProxyConfig,
    pub cleaning: CleaningConfig,
    pub provider_columns: Vec<ProviderColumn>,
}

impl PipelineConfig {
    /// Build from the process environment.
    pub fn from_env() -> PipelineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> PipelineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str| get(key).ok_or_else(|| PipelineError::config(key, "not set"));

        let mut cleaning = CleaningConfig::default();
        if let Some(v) = get(BODY_PARTS) {
            cleaning.tag_vocabulary = split_list(&v)
                .into_iter()
                .map(|s| s.to_lowercase())
                .collect();
        }
        if let Some(v) = get(NOISE_COLUMNS) {
            cleaning.noise_columns = split_list(&v);
        }
        if let Some(v) = get(ANCHOR_COLUMNS) {
            cleaning.anchor_columns = split_list(&v);
        }

        let provider_columns = match get(SERVICE_PROVIDERS) {
            Some(v) => split_list(&v)
                .iter()
                .map(|s| ProviderColumn::parse(s))
                .collect::<PipelineResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        let accept_invalid_certs = match get(ACCEPT_INVALID_CERTS) {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                PipelineError::config(ACCEPT_INVALID_CERTS, format!("expected true/false, got '{v}'"))
            })?,
            None => false,
        };

        Ok(Self {
            raw_data_path: PathBuf::from(require(RAW_DATA)?),
            processed_data_path: PathBuf::from(require(PROCESSED_DATA)?),
            api_url: require(API_URL)?,
            sheet_name: get(SHEET_NAME),
            proxy: ProxyConfig {
                http: get(HTTP_PROXY),
                https: get(HTTPS_PROXY),
                ca_cert: get(PROXY_CERT).map(PathBuf::from),
                accept_invalid_certs,
            },
            cleaning,
            provider_columns,
        })
    }

    /// Loader options matching this configuration.
    pub fn ingestion_options(&self) -> IngestionOptions {
        IngestionOptions {
            excel_sheet_selection: match &self.sheet_name {
                Some(name) => ExcelSheetSelection::Sheet(name.clone()),
                None => ExcelSheetSelection::First,
            },
            ..Default::default()
        }
    }
}

/// Split a comma-separated list, trimming entries and skipping empty ones.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Some(true),
        "false" | "f" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}
