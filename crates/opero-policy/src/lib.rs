//! # opero-policy: Commission Policy for OPERO
//!
//! Data-driven configuration for the commission engine: the VAT rate and
//! the named commission models the brokerage offers. Nothing here is
//! hard-coded into the calculation; changing a rate is a config edit, not
//! a rebuild.
//!
//! ## Usage
//! ```rust,no_run
//! use opero_core::Money;
//! use opero_policy::PolicyConfig;
//!
//! let policy = PolicyConfig::load(None)?;
//! let engine = policy.engine()?;
//! let input = policy.default_model()?.input_for(Money::from_major(2_500_000));
//! let breakdown = engine.compute(&input)?;
//! println!("agent takes {}", breakdown.agent_amount);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;

pub use config::{CommissionModel, PolicyConfig, TaxSettings};
pub use error::{PolicyError, PolicyResult};
