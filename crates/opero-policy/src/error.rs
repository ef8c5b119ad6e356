//! # Policy Error Types
//!
//! Error types for loading, validating and saving commission policy.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Policy Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Persistence   │  │     Lookup              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  ConfigLoad…    │  │  UnknownModel           │ │
//! │  │  Validation     │  │  ConfigSave…    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use opero_core::ValidationError;
use thiserror::Error;

/// Result type alias for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Policy error type covering every way a policy can be unusable.
#[derive(Debug, Error)]
pub enum PolicyError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Structurally invalid policy (unknown default model, no models, bad env value).
    #[error("Invalid commission policy: {0}")]
    InvalidConfig(String),

    /// A percentage in the policy is out of range.
    #[error("Invalid commission policy value: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    /// Failed to read or parse the policy file.
    #[error("Failed to load policy: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the policy file.
    #[error("Failed to save policy: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// A deal or caller asked for a commission model that is not configured.
    #[error("Unknown commission model '{name}'. Configured models: {available}")]
    UnknownModel { name: String, available: String },
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for PolicyError {
    fn from(err: std::io::Error) -> Self {
        PolicyError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for PolicyError {
    fn from(err: toml::de::Error) -> Self {
        PolicyError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for PolicyError {
    fn from(err: toml::ser::Error) -> Self {
        PolicyError::ConfigSaveFailed(err.to_string())
    }
}

impl PolicyError {
    /// Returns true if the policy content itself is wrong (as opposed to
    /// the file being unreadable).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PolicyError::InvalidConfig(_) | PolicyError::Validation(_)
        )
    }
}
