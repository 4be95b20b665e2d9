//! fetch_results.rs
//!
//! Collect the results of a session that was started earlier, e.g. by a
//! run that was killed while polling.
//!
//!     fetch_results <session-id> [output-path]
//!
//! Checks the status once. A finished session has its raw results saved
//! (default: the run's results file) and its metrics printed; anything else
//! just reports the current status.

use anyhow::{Context, Result};
use impactrun::{
    api::{ClientConfig, ImpactApi, NexosisClient, SessionId},
    config::RunConfig,
    report::report_error,
    session,
};
use std::{env, io, io::Write, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<ExitCode> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let id: SessionId = args
        .next()
        .context("usage: fetch_results <session-id> [output-path]")?
        .parse()
        .context("session id must be a UUID")?;
    let output = args.next().map(PathBuf::from);

    let mut out = io::stdout().lock();
    let outcome = RunConfig::from_env().and_then(|config| {
        let path = output.unwrap_or(config.results_file);
        let client = NexosisClient::new(ClientConfig::from_env()?)?;

        let status = client.session_status(id)?;
        info!(session = %id, %status, "checked session");
        if !status.is_terminal() {
            writeln!(out, "Session {id} is {status}; results are not ready")?;
            return Ok(false);
        }

        let result = session::retrieve_results(&client, id, &path, &mut out)?;
        session::print_metrics(&result, &mut out)?;
        Ok(true)
    });

    match outcome {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::from(2)),
        Err(err) => {
            error!(error = %err, "fetching results failed");
            report_error(&err, &mut out)?;
            Ok(ExitCode::FAILURE)
        }
    }
}
