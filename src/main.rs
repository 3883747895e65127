use std::process::ExitCode;

use iam_dataset::{HttpFetcher, IngestError, Pipeline, PipelineConfig, RunReport};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// The one-line stderr message for a failed run.
fn diagnostic(err: &IngestError) -> String {
    format!("error: {} stage failed: {err}", err.stage())
}

fn run() -> Result<RunReport, IngestError> {
    let pipeline = Pipeline::new(PipelineConfig::default(), HttpFetcher::new()?);
    pipeline.run()
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(report) => {
            info!(
                event = "Run",
                phase = "Done",
                unique_actions = report.actions.unique_actions,
                managed_policies = report.managed_policies.policies
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", diagnostic(&err));
            ExitCode::FAILURE
        }
    }
}
