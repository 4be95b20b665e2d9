// src/workflow.rs

use std::{io::Write, time::Duration};
use tracing::{info, instrument};

use crate::{
    api::{ImpactApi, SessionResult},
    config::RunConfig,
    dataset, load, session, Result,
};

/// Load → publish → trigger → poll → retrieve, in that order.
///
/// Every stage is all-or-nothing and the first failure ends the run. A
/// rerun starts over: the dataset is uploaded again and a new session is
/// requested.
#[instrument(
    level = "info",
    skip_all,
    fields(dataset = %config.dataset_name, event = %config.event_name)
)]
pub fn run<A, W>(
    config: &RunConfig,
    api: &A,
    sleep: impl FnMut(Duration),
    out: &mut W,
) -> Result<SessionResult>
where
    A: ImpactApi + ?Sized,
    W: Write,
{
    {
        let table = load::load_dataset_file(&config.source_file)?;
        info!(rows = table.data.len(), source = %config.source_file.display(), "dataset loaded");
        dataset::publish_dataset(api, &config.dataset_name, &table, out)?;
    }

    let id = session::run_impact_analysis(api, &session::impact_request(config))?;
    session::wait_for_completion(api, id, config.poll_interval, sleep, out)?;

    let result = session::retrieve_results(api, id, &config.results_file, out)?;
    session::print_metrics(&result, out)?;
    Ok(result)
}
