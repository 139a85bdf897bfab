//! Single entrypoint for loading the input table.
//!
//! [`ingest_from_path`] picks the reader from [`IngestionOptions::format`], or from the file
//! extension when no format is forced, and reports the outcome to the configured observer.

use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::error::{PipelineError, PipelineResult};
use crate::types::DataSet;

use super::csv;
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};

/// Input file kinds the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    Csv,
    /// Any workbook calamine can open. Needs the `excel` feature.
    Excel,
}

impl IngestionFormat {
    /// Map a file extension to a format, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if ext == "csv" {
            return Some(Self::Csv);
        }
        ["xlsx", "xlsm", "xlsb", "xls", "ods"]
            .contains(&ext.as_str())
            .then_some(Self::Excel)
    }

    fn from_path(path: &Path) -> PipelineResult<Self> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Err(PipelineError::schema(format!(
                "{} has no extension; set the input format explicitly",
                path.display()
            )));
        };
        Self::from_extension(ext).ok_or_else(|| {
            PipelineError::schema(format!("unsupported input extension '.{ext}' ({})", path.display()))
        })
    }
}

/// Worksheet to read when the input is a workbook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExcelSheetSelection {
    #[default]
    First,
    Sheet(String),
}

/// How [`ingest_from_path`] should read its input.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Forced format. `None` means "go by the extension".
    pub format: Option<IngestionFormat>,
    pub excel_sheet_selection: ExcelSheetSelection,
    /// Receives success and failure notifications.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Failures at or above this severity also go to `on_alert`.
    pub alert_at_or_above: IngestionSeverity,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            excel_sheet_selection: ExcelSheetSelection::First,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("excel_sheet_selection", &self.excel_sheet_selection)
            .field("has_observer", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Load every column of the table at `path`.
///
/// A missing file is always [`PipelineError::Io`] with kind `NotFound`, whatever the format.
/// With an observer set, a success reports row and column counts; a failure reports its
/// [`IngestionSeverity`] and, past the alert threshold, raises an alert as well.
///
/// ```no_run
/// use service_pricing_pipeline::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), service_pricing_pipeline::PipelineError> {
/// let ds = ingest_from_path("data/raw/services.xlsx", &IngestionOptions::default())?;
/// println!("rows={} columns={:?}", ds.row_count(), ds.schema.columns);
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> PipelineResult<DataSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => IngestionFormat::from_path(path)?,
    };

    let result = load(path, format, &options.excel_sheet_selection);

    if let Some(observer) = &options.observer {
        let ctx = IngestionContext {
            path: path.to_path_buf(),
            format,
        };
        report(observer.as_ref(), &ctx, &result, options.alert_at_or_above);
    }
    result
}

fn load(path: &Path, format: IngestionFormat, sheet: &ExcelSheetSelection) -> PipelineResult<DataSet> {
    if !path.is_file() {
        return Err(PipelineError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("input file not found: {}", path.display()),
        )));
    }
    match format {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path),
        IngestionFormat::Excel => load_workbook(path, sheet),
    }
}

fn report(
    observer: &dyn IngestionObserver,
    ctx: &IngestionContext,
    result: &PipelineResult<DataSet>,
    alert_at_or_above: IngestionSeverity,
) {
    match result {
        Ok(ds) => observer.on_success(
            ctx,
            IngestionStats {
                rows: ds.row_count(),
                columns: ds.column_count(),
            },
        ),
        Err(err) => {
            let severity = IngestionSeverity::for_error(err);
            observer.on_failure(ctx, severity, err);
            if severity >= alert_at_or_above {
                observer.on_alert(ctx, severity, err);
            }
        }
    }
}

#[cfg(feature = "excel")]
fn load_workbook(path: &Path, sheet: &ExcelSheetSelection) -> PipelineResult<DataSet> {
    let name = match sheet {
        ExcelSheetSelection::First => None,
        ExcelSheetSelection::Sheet(name) => Some(name.as_str()),
    };
    super::excel::ingest_excel_from_path(path, name)
}

#[cfg(not(feature = "excel"))]
fn load_workbook(path: &Path, _sheet: &ExcelSheetSelection) -> PipelineResult<DataSet> {
    Err(PipelineError::schema(format!(
        "{} is a workbook but this build lacks the 'excel' feature",
        path.display()
    )))
}
