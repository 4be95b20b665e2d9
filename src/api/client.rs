// src/api/client.rs

use chrono::SecondsFormat;
use reqwest::{
    blocking::{Client, RequestBuilder, Response},
    header::ACCEPT,
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::{env, fmt, io::Write, time::Duration};
use tracing::{debug, warn};
use url::Url;

use super::{
    error::{ApiError, ApiResult},
    types::{
        DataSetList, ErrorResponse, ImpactRequest, SessionId, SessionResponse, SessionResult,
        SessionStatus,
    },
    ImpactApi,
};
use crate::dataset::DataSetData;

pub const DEFAULT_BASE_URL: &str = "https://ml.nexosis.com/v1/";
pub const API_KEY_ENV: &str = "NEXOSIS_API_KEY";
pub const BASE_URL_ENV: &str = "NEXOSIS_BASE_URL";

const API_KEY_HEADER: &str = "api-key";
/// Carries the session status on HEAD and raw-results responses.
pub const SESSION_STATUS_HEADER: &str = "Nexosis-Session-Status";

#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub api_key: String,
    /// Per-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            api_key: api_key.into(),
            timeout: Some(Duration::from_secs(120)),
        })
    }

    /// Key from `NEXOSIS_API_KEY` (required), base URL from
    /// `NEXOSIS_BASE_URL` (optional).
    pub fn from_env() -> ApiResult<Self> {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{API_KEY_ENV} is not set")))?;
        let mut config = Self::new(api_key.trim())?;
        if let Ok(base) = env::var(BASE_URL_ENV) {
            config.base_url = parse_base_url(&base)?;
        }
        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::Config(format!("invalid base url {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ApiError::Config(format!("base url {raw:?} cannot hold a path")));
    }
    Ok(url)
}

/// Blocking HTTP client for the hosted ML API.
pub struct NexosisClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl NexosisClient {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("impactrun/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// `base_url` with `segments` appended, each percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "request");
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, &self.api_key)
    }

    fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let resp = builder.send()?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let err = remote_error(status.as_u16(), status.canonical_reason(), &body);
        warn!(status = status.as_u16(), error = %err, "request rejected");
        Err(err)
    }
}

fn decode<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
    let text = resp.text()?;
    Ok(serde_json::from_str(&text)?)
}

fn status_header(resp: &Response) -> Option<SessionStatus> {
    resp.headers()
        .get(SESSION_STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(SessionStatus::parse)
}

/// Build the error for a non-success response from its status and body.
/// The message prefers the structured body, then the raw body, then the
/// reason phrase.
pub(crate) fn remote_error(status: u16, reason: Option<&str>, body: &str) -> ApiError {
    let response: Option<ErrorResponse> = serde_json::from_str(body).ok();
    let message = response
        .as_ref()
        .and_then(|r| r.message.clone())
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| reason.unwrap_or("unknown error").to_string());
    ApiError::Remote {
        status,
        message,
        response,
    }
}

impl ImpactApi for NexosisClient {
    fn create_dataset(&self, name: &str, data: &DataSetData) -> ApiResult<()> {
        let url = self.endpoint(&["data", name]);
        let resp = self.send(self.request(Method::PUT, url).json(data))?;
        debug!(dataset = name, status = %resp.status(), "dataset stored");
        Ok(())
    }

    fn list_datasets(&self) -> ApiResult<DataSetList> {
        let url = self.endpoint(&["data"]);
        decode(self.send(self.request(Method::GET, url))?)
    }

    fn analyze_impact(&self, request: &ImpactRequest) -> ApiResult<SessionResponse> {
        let mut url = self.endpoint(&["sessions", "impact"]);
        url.query_pairs_mut()
            .append_pair("dataSetName", &request.dataset_name)
            .append_pair("eventName", &request.event_name)
            .append_pair(
                "startDate",
                &request.start.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair(
                "endDate",
                &request.end.to_rfc3339_opts(SecondsFormat::Secs, true),
            )
            .append_pair("resultInterval", request.interval.as_str());
        let body = json!({ "columns": request.columns });
        decode(self.send(self.request(Method::POST, url).json(&body))?)
    }

    fn session_status(&self, id: SessionId) -> ApiResult<SessionStatus> {
        let url = self.endpoint(&["sessions", &id.to_string()]);
        let resp = self.send(self.request(Method::HEAD, url))?;
        status_header(&resp).ok_or(ApiError::InvalidHeader(SESSION_STATUS_HEADER))
    }

    fn stream_session_results(
        &self,
        id: SessionId,
        out: &mut dyn Write,
    ) -> ApiResult<Option<SessionStatus>> {
        let url = self.endpoint(&["sessions", &id.to_string(), "results"]);
        let mut resp = self.send(self.request(Method::GET, url).header(ACCEPT, "text/csv"))?;
        let status = status_header(&resp);
        let bytes = std::io::copy(&mut resp, out)?;
        debug!(session = %id, bytes, ?status, "streamed raw results");
        Ok(status)
    }

    fn session_results(&self, id: SessionId) -> ApiResult<SessionResult> {
        let url = self.endpoint(&["sessions", &id.to_string(), "results"]);
        decode(self.send(
            self.request(Method::GET, url)
                .header(ACCEPT, "application/json"),
        )?)
    }
}
