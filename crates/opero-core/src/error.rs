//! # Error Types
//!
//! Domain-specific error types for opero-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  opero-core errors (this file)                                         │
//! │  ├── CoreError        - The single engine error kind: InvalidInput     │
//! │  └── ValidationError  - Which field failed, and with what value        │
//! │                                                                         │
//! │  opero-policy errors (separate crate)                                  │
//! │  └── PolicyError      - Config load/save/validate failures             │
//! │                                                                         │
//! │  commission-report errors (app)                                        │
//! │  └── ReportError      - Deal file and output failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → rejected report line / caller     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the field name and the offending value in every message
//! 3. Errors are enum variants, never String
//! 4. Out-of-range input is rejected, never clamped

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Commission engine errors.
///
/// The engine is a pure calculator, so the only thing that can go wrong is
/// the input itself. There is nothing to retry and no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A precondition on the input was violated.
    ///
    /// ## When This Occurs
    /// - Sale price is negative or above the supported maximum
    /// - A percentage (commission rate, agent share, co-broker split,
    ///   VAT rate) is outside 0%..=100%
    ///
    /// ## User Workflow
    /// ```text
    /// Agent share field: 150
    ///      │
    ///      ▼
    /// compute_commission()
    ///      │
    ///      ▼
    /// InvalidInput(OutOfRange { field: "agent_share", value: 15000, .. })
    ///      │
    ///      ▼
    /// UI shows: "agent_share is 150.00% but must be between 0.00% and 100.00%"
    /// ```
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

impl CoreError {
    /// Name of the input field that failed.
    pub fn field(&self) -> &str {
        match self {
            CoreError::InvalidInput(err) => err.field(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Values are reported in the unit the engine works in: cents for money,
/// basis points for percentages. The message renders them human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must not be negative.
    #[error("{field} must not be negative (got {value} cents)")]
    Negative { field: String, value: i64 },

    /// Amount is above the largest value the engine accepts.
    #[error("{field} must not exceed {max} cents (got {value} cents)")]
    TooLarge { field: String, value: i64, max: i64 },

    /// Percentage is outside its allowed range.
    #[error(
        "{field} is {} but must be between {} and {}",
        fmt_bps(.value),
        fmt_bps(.min),
        fmt_bps(.max)
    )]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl ValidationError {
    /// Name of the input field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Negative { field, .. } => field,
            ValidationError::TooLarge { field, .. } => field,
            ValidationError::OutOfRange { field, .. } => field,
        }
    }

    /// The rejected value (cents or basis points).
    pub fn value(&self) -> i64 {
        match self {
            ValidationError::Negative { value, .. } => *value,
            ValidationError::TooLarge { value, .. } => *value,
            ValidationError::OutOfRange { value, .. } => *value,
        }
    }
}

fn fmt_bps(bps: &i64) -> String {
    let sign = if *bps < 0 { "-" } else { "" };
    let abs = bps.unsigned_abs();
    format!("{}{}.{:02}%", sign, abs / 100, abs % 100)
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
