use tracing::{info, instrument};

use crate::{
    api::{ImpactApi, ImpactRequest, SessionId},
    config::RunConfig,
    dataset::Columns,
    Result,
};

/// The impact request for a run: analysis-time column roles over the
/// configured event and window.
pub fn impact_request(config: &RunConfig) -> ImpactRequest {
    ImpactRequest {
        dataset_name: config.dataset_name.clone(),
        event_name: config.event_name.clone(),
        columns: Columns::impact_schema(),
        start: config.start,
        end: config.end,
        interval: config.interval,
    }
}

/// Ask the service for an impact-analysis session and return its id.
///
/// Column names and the date window are validated remotely.
#[instrument(
    level = "info",
    skip_all,
    fields(dataset = %request.dataset_name, event = %request.event_name)
)]
pub fn run_impact_analysis<A: ImpactApi + ?Sized>(
    api: &A,
    request: &ImpactRequest,
) -> Result<SessionId> {
    let response = api.analyze_impact(request)?;
    info!(session = %response.session_id, status = %response.status, "impact session requested");
    Ok(response.session_id)
}
