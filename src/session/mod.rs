// src/session/mod.rs

pub mod poll;
pub mod results;
pub mod trigger;

pub use poll::wait_for_completion;
pub use results::{print_metrics, retrieve_results};
pub use trigger::{impact_request, run_impact_analysis};
