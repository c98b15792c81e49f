//! Error and warning types for capacity analysis runs.
//!
//! Fatal errors abort a run before any classified output is produced.
//! Warnings are recoverable conditions that are recorded on the result and
//! surfaced to the caller without interrupting computation.

use serde::Serialize;

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Fatal error for an analysis run
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// A required column is missing or a table has no usable value columns.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A value cell expected to be numeric (or a date) could not be parsed.
    #[error("Data error: {0}")]
    Data(String),

    /// Threshold configuration is invalid (sustain must be strictly below peak).
    #[error("Threshold error: {0}")]
    Threshold(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Recoverable condition recorded during an analysis run.
///
/// Warnings never interrupt computation. They are collected on the run
/// result so the caller can display them next to the analysis output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnalysisWarning {
    /// The hourly and minute series report different sector identities.
    /// The run continues with the hourly identity as canonical.
    IdentityMismatch { hourly: String, minute: String },

    /// The optional reference threshold table was missing a sector, malformed,
    /// or unreadable. Defaults (or explicit values) are kept.
    ReferenceLookup(String),

    /// A non-fatal data quality issue in one of the input series.
    DataQuality(String),
}

impl std::fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisWarning::IdentityMismatch { hourly, minute } => write!(
                f,
                "Different traffic volume detected: LOAD={}, OCC={}",
                hourly, minute
            ),
            AnalysisWarning::ReferenceLookup(msg) => write!(f, "Reference lookup: {}", msg),
            AnalysisWarning::DataQuality(msg) => write!(f, "Data quality: {}", msg),
        }
    }
}
