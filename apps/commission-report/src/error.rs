//! Error types for the commission report.

use opero_policy::PolicyError;

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Commission report errors.
///
/// Per-deal input problems are NOT errors at this level; they become
/// rejected lines in the report. These variants cover the run itself.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to read deals from {path}: {reason}")]
    DealsUnreadable { path: String, reason: String },

    #[error("Failed to write report: {0}")]
    OutputFailed(String),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("{rejected} of {total} deals were rejected")]
    RejectedDeals { rejected: usize, total: usize },
}
