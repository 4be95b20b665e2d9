use serde_json::Value;
use std::{error::Error as _, io, io::Write};

use crate::{api::ApiError, Error};

/// Print a failed run for the operator.
///
/// Service rejections show their status, message, every error detail and
/// the raw error body. Everything else shows its message and cause chain.
pub fn report_error<W: Write>(err: &Error, out: &mut W) -> io::Result<()> {
    match err {
        Error::Api(ApiError::Remote {
            status,
            message,
            response,
        }) => {
            writeln!(out, "Status: {status}")?;
            writeln!(out, "Message: {message}")?;
            if let Some(details) = response.as_ref().and_then(|r| r.error_details.as_ref()) {
                for (key, value) in details {
                    writeln!(out, "{key}: {}", render(value))?;
                }
            }
            if let Some(response) = response {
                writeln!(out, "Error Response: {response}")?;
            }
        }
        other => {
            if let Some(status) = api_status(other) {
                writeln!(out, "Status: {status}")?;
            }
            writeln!(out, "Error: {other}")?;
            let mut source = other.source();
            while let Some(cause) = source {
                writeln!(out, "  caused by: {cause}")?;
                source = cause.source();
            }
        }
    }
    Ok(())
}

fn api_status(err: &Error) -> Option<u16> {
    match err {
        Error::Api(api) => api.status_code(),
        _ => None,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
