// src/config.rs

use chrono::{DateTime, Utc};
use std::{env, path::PathBuf, time::Duration};

use crate::{api::ResultInterval, Error, Result};

/// Overrides the `<cwd>/data` default.
pub const DATA_DIR_ENV: &str = "IMPACT_DATA_DIR";

pub const DATASET_NAME: &str = "facebook-data-v2";
pub const EVENT_NAME: &str = "api-announcement-reloaded";
pub const SOURCE_FILE: &str = "facebook-data.csv";
pub const RESULTS_FILE: &str = "impact-results.csv";
pub const IMPACT_START: &str = "2017-03-15T00:00:00Z";
pub const IMPACT_END: &str = "2017-06-28T00:00:00Z";
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Everything one impact run needs, fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub dataset_name: String,
    pub event_name: String,
    pub source_file: PathBuf,
    pub results_file: PathBuf,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub interval: ResultInterval,
    pub poll_interval: Duration,
}

impl RunConfig {
    /// Defaults with input and output files resolved under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        Ok(Self {
            source_file: data_dir.join(SOURCE_FILE),
            results_file: data_dir.join(RESULTS_FILE),
            data_dir,
            dataset_name: DATASET_NAME.to_string(),
            event_name: EVENT_NAME.to_string(),
            start: parse_utc(IMPACT_START)?,
            end: parse_utc(IMPACT_END)?,
            interval: ResultInterval::Day,
            poll_interval: POLL_INTERVAL,
        })
    }

    pub fn from_env() -> Result<Self> {
        let data_dir = match env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => env::current_dir()
                .map_err(|e| Error::Config(format!("resolving working directory: {e}")))?
                .join("data"),
        };
        Self::new(data_dir)
    }
}

fn parse_utc(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse()
        .map_err(|e| Error::Config(format!("invalid timestamp {raw:?}: {e}")))
}
