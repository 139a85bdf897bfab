use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use service_pricing_pipeline::config::PipelineConfig;
use service_pricing_pipeline::delivery::HttpSink;
use service_pricing_pipeline::pipeline;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // A missing .env file is fine; the variables may come from the real environment.
    dotenv::dotenv().ok();

    let config = match PipelineConfig::from_env() {
        Ok(c) => c,
        Err(err) => {
            error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let sink = HttpSink::from_config(&config);
    match pipeline::run(&config, &sink) {
        Ok(summary) => {
            info!(
                records = summary.records,
                output = %summary.output_path.display(),
                status = summary.response.status,
                "run complete"
            );
            match serde_json::to_string_pretty(&summary.response) {
                Ok(text) => println!("{text}"),
                Err(err) => error!(%err, "could not render response"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}
