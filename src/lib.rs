//! Upload a page-metrics CSV to a hosted ML service, run an impact analysis
//! over it and collect the results.

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod load;
pub mod report;
pub mod session;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
