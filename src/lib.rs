//! abtest - statistically rigorous two-group A/B test analysis
//!
//! This library validates a tabular dataset into control and variant samples,
//! optionally winsorizes them, runs Welch's t-test and the Mann-Whitney U test,
//! and computes a reproducible bootstrap confidence interval for relative lift.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod report;

pub use analysis::{analyze, analyze_groups, split_groups, ABResult, AnalysisWarning};
pub use config::AnalysisConfig;
pub use dataset::Dataset;
pub use error::{AnalysisError, Result};
