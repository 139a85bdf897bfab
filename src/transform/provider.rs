use crate::config::SERVICE_PROVIDERS;
use crate::error::{PipelineError, PipelineResult};

/// A configured provider price column and the provider id encoded in its name.
///
/// Identifiers look like `SP. 1`: the id is whatever follows the first `.`, surrounding
/// whitespace ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderColumn {
    /// Source column name, verbatim.
    pub column: String,
    pub id: u32,
}

impl ProviderColumn {
    /// Parse a configured identifier. Anything without a numeric id after `.` is a config error.
    pub fn parse(identifier: &str) -> PipelineResult<Self> {
        let malformed = |why: &str| {
            PipelineError::config(
                SERVICE_PROVIDERS,
                format!("malformed provider column '{identifier}': {why}"),
            )
        };

        let (_, raw_id) = identifier
            .split_once('.')
            .ok_or_else(|| malformed("expected '<prefix>.<id>'"))?;
        let raw_id = raw_id.trim();
        if raw_id.is_empty() || !raw_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("provider id must be a non-negative integer"));
        }
        let id = raw_id
            .parse::<u32>()
            .map_err(|e| malformed(&e.to_string()))?;

        Ok(Self {
            column: identifier.to_string(),
            id,
        })
    }
}
