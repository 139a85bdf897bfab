use std::sync::{Arc, Mutex};

use service_pricing_pipeline::ingestion::{
    ingest_from_path, IngestionContext, IngestionFormat, IngestionObserver, IngestionOptions, IngestionSeverity,
    IngestionStats,
};
use service_pricing_pipeline::PipelineError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestionStats>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &PipelineError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &PipelineError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: Arc<RecordingObserver>) -> IngestionOptions {
    IngestionOptions {
        format: Some(IngestionFormat::Csv),
        observer: Some(obs),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> Io error -> Critical
    let _ = ingest_from_path("tests/fixtures/does_not_exist.csv", &options(obs.clone())).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_malformed_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    // Invalid UTF-8 in the header row
    std::fs::write(&path, b"SERVICE,\xff\xfe\nx,1\n").unwrap();

    let obs = Arc::new(RecordingObserver::default());
    let _ = ingest_from_path(&path, &options(obs.clone())).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_row_and_column_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ok.csv");
    std::fs::write(&path, "SERVICE,PRODUCT INDEX,SP. 1\na,hc-1,1\nb,hc-2,2\n").unwrap();

    let obs = Arc::new(RecordingObserver::default());
    ingest_from_path(&path, &options(obs.clone())).unwrap();

    assert_eq!(
        *obs.successes.lock().unwrap(),
        vec![IngestionStats { rows: 2, columns: 3 }]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
}
