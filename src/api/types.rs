// src/api/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt, str::FromStr};
use uuid::Uuid;

use crate::dataset::Columns;

/// Opaque identifier of a remote analysis session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Lifecycle state of a session as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionStatus {
    #[default]
    Requested,
    Started,
    Completed,
    Cancelled,
    Failed,
    Estimated,
    /// Anything outside the known vocabulary, kept verbatim.
    Unknown(String),
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Requested => "requested",
            SessionStatus::Started => "started",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Failed => "failed",
            SessionStatus::Estimated => "estimated",
            SessionStatus::Unknown(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "requested" => SessionStatus::Requested,
            "started" | "running" => SessionStatus::Started,
            "completed" => SessionStatus::Completed,
            "cancelled" | "canceled" => SessionStatus::Cancelled,
            "failed" => SessionStatus::Failed,
            "estimated" => SessionStatus::Estimated,
            _ => SessionStatus::Unknown(s.trim().to_string()),
        }
    }

    /// Upper-case console form, e.g. `COMPLETED`.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    /// Only completion and cancellation end a wait. `Failed` does not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Cancelled)
    }
}

impl From<String> for SessionStatus {
    fn from(s: String) -> Self {
        SessionStatus::parse(&s)
    }
}

impl From<SessionStatus> for String {
    fn from(status: SessionStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Granularity of the impact series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultInterval {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl ResultInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultInterval::Hour => "hour",
            ResultInterval::Day => "day",
            ResultInterval::Week => "week",
            ResultInterval::Month => "month",
            ResultInterval::Year => "year",
        }
    }
}

/// Everything needed to start one impact-analysis session.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactRequest {
    pub dataset_name: String,
    pub event_name: String,
    pub columns: Columns,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval: ResultInterval,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSetSummary {
    pub data_set_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSetList {
    #[serde(default)]
    pub items: Vec<DataSetSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: SessionId,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub data_set_name: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
}

/// Structured results of a finished session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    #[serde(default)]
    pub session_id: SessionId,
    #[serde(default)]
    pub status: SessionStatus,
    /// Named metrics; the service may report a metric as `null`.
    #[serde(default)]
    pub metrics: BTreeMap<String, Option<f64>>,
    /// Forecast/impact series, one object per interval.
    #[serde(default)]
    pub data: Vec<BTreeMap<String, Value>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Body of a non-success response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<BTreeMap<String, Value>>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
