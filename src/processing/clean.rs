//! The cleaning stage: normalize, drop noise columns, categorize, filter anchors.

use tracing::debug;

use crate::config::CleaningConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::DataSet;

use super::{categorize, drop_rows_missing_any, normalize_text};

/// Runs the cleaning steps in a fixed order over an input table.
#[derive(Debug, Clone)]
pub struct Cleaner {
    config: CleaningConfig,
}

impl Cleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean `dataset` into a new table.
    ///
    /// Steps:
    /// 1. lower-case every text cell
    /// 2. drop the configured noise columns (each must exist)
    /// 3. append the forward-filled tag column
    /// 4. drop rows where any anchor column is null
    ///
    /// A table that already carries the tag column is taken to be cleaned output: steps 2 and 3
    /// are skipped (its heading rows are gone, so re-tagging would erase the tags) and only the
    /// row steps run again. Cleaning is therefore idempotent.
    ///
    /// Every column the steps reference is checked before any work is done, so a schema error
    /// never leaves a half-cleaned table behind.
    pub fn clean(&self, dataset: &DataSet) -> PipelineResult<DataSet> {
        let already_tagged = dataset.schema.contains(&self.config.tag_column);
        self.check_columns(dataset, already_tagged)?;

        let normalized = normalize_text(dataset);
        let tagged = if already_tagged {
            normalized
        } else {
            let pruned = normalized.drop_columns(&self.config.noise_columns)?;
            categorize(
                &pruned,
                &self.config.tag_source_column,
                &self.config.tag_column,
                &self.config.tag_vocabulary,
            )?
        };
        let out = drop_rows_missing_any(&tagged, &self.config.anchor_columns)?;

        debug!(
            input_rows = dataset.row_count(),
            output_rows = out.row_count(),
            dropped_rows = dataset.row_count() - out.row_count(),
            columns = out.column_count(),
            already_tagged,
            "cleaned table"
        );
        Ok(out)
    }

    fn check_columns(&self, dataset: &DataSet, already_tagged: bool) -> PipelineResult<()> {
        let cfg = &self.config;
        if !already_tagged {
            let missing: Vec<&str> = cfg
                .noise_columns
                .iter()
                .map(String::as_str)
                .filter(|c| !dataset.schema.contains(c))
                .collect();
            if !missing.is_empty() {
                return Err(PipelineError::schema(format!(
                    "columns not found: {}",
                    missing.join(", ")
                )));
            }
            dataset.schema.require(&cfg.tag_source_column)?;
        }
        for anchor in cfg.anchor_columns.iter().filter(|a| **a != cfg.tag_column) {
            dataset.schema.require(anchor)?;
        }
        Ok(())
    }
}
