//! Scripted stand-in for the remote service, shared by the unit tests.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    io::Write,
};
use uuid::Uuid;

use crate::{
    api::{
        ApiError, ApiResult, DataSetList, DataSetSummary, ImpactApi, ImpactRequest, SessionId,
        SessionResponse, SessionResult, SessionStatus,
    },
    dataset::DataSetData,
};

/// Status returned once the scripted statuses run out.
pub const EXHAUSTED_STATUS: u16 = 599;

pub fn session_id() -> SessionId {
    SessionId::new(Uuid::from_u128(0x015c_9a7f_0bd5_4e47_b2a5_ef5f_2b2b_1c9a))
}

#[derive(Default)]
pub struct StubApi {
    pub existing: Vec<String>,
    pub raw_results: String,
    pub result: SessionResult,
    /// Failure returned by the next `create_dataset` call.
    pub create_error: RefCell<Option<ApiError>>,
    statuses: RefCell<VecDeque<ApiResult<SessionStatus>>>,
    pub status_checks: Cell<usize>,
    pub calls: RefCell<Vec<&'static str>>,
    pub uploads: RefCell<Vec<(String, DataSetData)>>,
    pub requests: RefCell<Vec<ImpactRequest>>,
}

impl StubApi {
    pub fn with_statuses(statuses: impl IntoIterator<Item = SessionStatus>) -> Self {
        let stub = Self::default();
        stub.push_statuses(statuses);
        stub
    }

    pub fn push_statuses(&self, statuses: impl IntoIterator<Item = SessionStatus>) {
        self.statuses
            .borrow_mut()
            .extend(statuses.into_iter().map(Ok));
    }

    pub fn push_status_error(&self, err: ApiError) {
        self.statuses.borrow_mut().push_back(Err(err));
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }
}

impl ImpactApi for StubApi {
    fn create_dataset(&self, name: &str, data: &DataSetData) -> ApiResult<()> {
        self.record("create_dataset");
        if let Some(err) = self.create_error.borrow_mut().take() {
            return Err(err);
        }
        self.uploads
            .borrow_mut()
            .push((name.to_string(), data.clone()));
        Ok(())
    }

    fn list_datasets(&self) -> ApiResult<DataSetList> {
        self.record("list_datasets");
        let uploaded = self.uploads.borrow();
        let items = self
            .existing
            .iter()
            .cloned()
            .chain(uploaded.iter().map(|(name, _)| name.clone()))
            .map(|data_set_name| DataSetSummary { data_set_name })
            .collect();
        Ok(DataSetList { items })
    }

    fn analyze_impact(&self, request: &ImpactRequest) -> ApiResult<SessionResponse> {
        self.record("analyze_impact");
        self.requests.borrow_mut().push(request.clone());
        Ok(SessionResponse {
            session_id: session_id(),
            status: SessionStatus::Requested,
            data_set_name: Some(request.dataset_name.clone()),
            event_name: Some(request.event_name.clone()),
        })
    }

    fn session_status(&self, _id: SessionId) -> ApiResult<SessionStatus> {
        self.record("session_status");
        self.status_checks.set(self.status_checks.get() + 1);
        self.statuses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Err(ApiError::Remote {
                    status: EXHAUSTED_STATUS,
                    message: "status script exhausted".into(),
                    response: None,
                })
            })
    }

    fn stream_session_results(
        &self,
        _id: SessionId,
        out: &mut dyn Write,
    ) -> ApiResult<Option<SessionStatus>> {
        self.record("stream_session_results");
        out.write_all(self.raw_results.as_bytes())?;
        Ok(Some(SessionStatus::Completed))
    }

    fn session_results(&self, _id: SessionId) -> ApiResult<SessionResult> {
        self.record("session_results");
        Ok(self.result.clone())
    }
}
