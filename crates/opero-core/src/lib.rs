//! # opero-core: Pure Commission Logic for OPERO
//!
//! This crate is the **heart** of the OPERO commission tooling. It contains
//! the commission engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      OPERO Commission Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Dashboard commission form / batch report             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                opero-policy (VAT rate, commission models)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ opero-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ commission │  │ validation│  │   │
//! │  │   │  Input    │  │   Money   │  │   Engine   │  │   rules   │  │   │
//! │  │   │  Result   │  │ apply_rate│  │            │  │   checks  │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CommissionInput, CommissionResult, Percentage)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`commission`] - The commission engine
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Reject, never clamp**: Out-of-range input is an error, not a default
//!
//! ## Example Usage
//!
//! ```rust
//! use opero_core::{CommissionEngine, CommissionInput, Money};
//!
//! // 18% VAT from policy, 2.5% commission, agent keeps 70%, co-broker takes 40% of that
//! let engine = CommissionEngine::new(1800).unwrap();
//! let input = CommissionInput::from_percentages(Money::from_major(400_000).cents(), 2.5, true, 70.0)
//!     .with_co_broker(40.0);
//!
//! let result = engine.compute(&input).unwrap();
//! assert_eq!(result.gross_commission, Money::from_major(11_800));
//! assert_eq!(result.office_amount, Money::from_major(3_540));
//! assert_eq!(result.co_broker_amount, Money::from_major(3_304));
//! assert_eq!(result.agent_amount, Money::from_major(4_956));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commission;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use commission::{compute_commission, CommissionEngine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default VAT rate added on top of the base commission (20%).
///
/// Jurisdictions differ; deployments override it through the policy file
/// or `OPERO_VAT_RATE_BPS`.
pub const DEFAULT_VAT_RATE_BPS: u32 = 2000;
