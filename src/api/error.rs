use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use super::types::ErrorResponse;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("service returned {status}: {message}")]
    Remote {
        status: u16,
        message: String,
        response: Option<ErrorResponse>,
    },

    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("streaming response body")]
    Io(#[from] std::io::Error),

    #[error("decoding response body")]
    Decode(#[from] serde_json::Error),

    #[error("missing or unreadable header {0}")]
    InvalidHeader(&'static str),

    #[error("client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a remote failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            ApiError::Remote {
                response: Some(r), ..
            } => r.error_details.as_ref(),
            _ => None,
        }
    }
}
