use anyhow::Result;
use impactrun::{
    api::{ClientConfig, NexosisClient},
    config::RunConfig,
    report::report_error,
    workflow,
};
use std::{io, process::ExitCode, thread};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<ExitCode> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
    info!("startup");

    // ─── 2) run, with one error boundary for every stage ─────────────
    let mut out = io::stdout().lock();
    let outcome = RunConfig::from_env().and_then(|config| {
        info!(data_dir = %config.data_dir.display(), "configured");
        let client = NexosisClient::new(ClientConfig::from_env()?)?;
        workflow::run(&config, &client, thread::sleep, &mut out)
    });

    // ─── 3) report ───────────────────────────────────────────────────
    match outcome {
        Ok(result) => {
            info!(session = %result.session_id, metrics = result.metrics.len(), "all done");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(error = %err, "impact run failed");
            report_error(&err, &mut out)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
