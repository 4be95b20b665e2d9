// src/api/mod.rs

pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientConfig, NexosisClient};
pub use error::{ApiError, ApiResult};
pub use types::{
    DataSetList, DataSetSummary, ErrorResponse, ImpactRequest, ResultInterval, SessionId,
    SessionResponse, SessionResult, SessionStatus,
};

use std::io::Write;

use crate::dataset::DataSetData;

/// The remote calls the impact workflow makes. Every call blocks.
pub trait ImpactApi {
    /// Store `data` under `name`, replacing any dataset of that name.
    fn create_dataset(&self, name: &str, data: &DataSetData) -> ApiResult<()>;

    fn list_datasets(&self) -> ApiResult<DataSetList>;

    /// Start an impact-analysis session.
    fn analyze_impact(&self, request: &ImpactRequest) -> ApiResult<SessionResponse>;

    fn session_status(&self, id: SessionId) -> ApiResult<SessionStatus>;

    /// Copy the raw result payload into `out` and report the session status
    /// that came with it, if the service sent one.
    fn stream_session_results(
        &self,
        id: SessionId,
        out: &mut dyn Write,
    ) -> ApiResult<Option<SessionStatus>>;

    /// Fetch the results as a typed object.
    fn session_results(&self, id: SessionId) -> ApiResult<SessionResult>;
}
