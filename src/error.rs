//! Error taxonomy for the analysis engine
//!
//! Every failure is raised synchronously to the caller. Nothing is retried
//! internally and no partial result is ever returned.

use thiserror::Error;

/// Errors that can occur while validating input or computing statistics
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("No usable rows {stage}")]
    EmptyDataset { stage: &'static str },

    #[error("Expected exactly 2 groups in '{column}', found {found}")]
    GroupCardinality { column: String, found: usize },

    #[error("Group {group} has {n} observation(s); hypothesis tests need at least 2")]
    DegenerateSample { group: char, n: usize },

    #[error("Invalid analysis config: {0}")]
    InvalidConfig(String),

    #[error(
        "Only {retained} bootstrap lift values were defined (need at least {required}); \
         try a different seed or a larger bootstrap count"
    )]
    InsufficientBootstrapSamples { retained: usize, required: usize },

    #[error("Sample value at position {index} is not finite: {value}")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("Malformed input at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the engine
pub type Result<T> = std::result::Result<T, AnalysisError>;
