//! # Validation Module
//!
//! Input validation for the commission engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form (TypeScript)                                  │
//! │  └── Immediate user feedback while typing                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Sale price must be within 0..=MAX_SALE_PRICE_CENTS                │
//! │  ├── Every percentage must be within 0%..=100%                         │
//! │  └── Raw integers become typed Money / Percentage                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Commission engine (arithmetic only, no checks)               │
//! │                                                                         │
//! │  Out-of-range values are REJECTED, never clamped                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use opero_core::validation::{validate_percentage_bps, validate_sale_price_cents};
//!
//! assert!(validate_sale_price_cents(250_000_000).is_ok());
//! assert!(validate_percentage_bps("agent_share", 15_000).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CommissionInput, Percentage, FULL_BPS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest accepted sale price in cents (one quadrillion currency units).
///
/// Every derived amount is at most twice the sale price (100% commission
/// plus 100% VAT), so the whole breakdown stays far inside `i64`.
pub const MAX_SALE_PRICE_CENTS: i64 = 100_000_000_000_000_000;

/// Field names used in validation errors.
pub mod fields {
    pub const SALE_PRICE: &str = "sale_price";
    pub const COMMISSION_RATE: &str = "commission_rate";
    pub const AGENT_SHARE: &str = "agent_share";
    pub const CO_BROKER_SPLIT: &str = "co_broker_split";
    pub const VAT_RATE: &str = "vat_rate";
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a sale price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (the commission is then zero)
/// - Must not exceed [`MAX_SALE_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use opero_core::validation::{validate_sale_price_cents, MAX_SALE_PRICE_CENTS};
///
/// assert!(validate_sale_price_cents(0).is_ok());
/// assert!(validate_sale_price_cents(-10_000).is_err());
/// assert!(validate_sale_price_cents(MAX_SALE_PRICE_CENTS + 1).is_err());
/// ```
pub fn validate_sale_price_cents(cents: i64) -> ValidationResult<Money> {
    if cents < 0 {
        return Err(ValidationError::Negative {
            field: fields::SALE_PRICE.to_string(),
            value: cents,
        });
    }
    if cents > MAX_SALE_PRICE_CENTS {
        return Err(ValidationError::TooLarge {
            field: fields::SALE_PRICE.to_string(),
            value: cents,
            max: MAX_SALE_PRICE_CENTS,
        });
    }

    Ok(Money::from_cents(cents))
}

/// Validates a percentage in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%), both inclusive
///
/// ## Example
/// ```rust
/// use opero_core::validation::validate_percentage_bps;
///
/// assert_eq!(validate_percentage_bps("commission_rate", 400).unwrap().bps(), 400);
/// assert!(validate_percentage_bps("commission_rate", -100).is_err());
/// assert!(validate_percentage_bps("agent_share", 10_001).is_err());
/// ```
pub fn validate_percentage_bps(field: &str, bps: i64) -> ValidationResult<Percentage> {
    if !(0..=FULL_BPS as i64).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: bps,
            min: 0,
            max: FULL_BPS as i64,
        });
    }

    Ok(Percentage::from_bps(bps as u32))
}

// =============================================================================
// Input Validator
// =============================================================================

/// A `CommissionInput` whose every field passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedInput {
    pub sale_price: Money,
    pub commission_rate: Percentage,
    pub include_vat: bool,
    pub agent_share: Percentage,
    pub co_broker_split: Option<Percentage>,
}

/// Validates every field of a commission input.
///
/// Fields are checked in declaration order and the first failure is
/// returned: sale price, commission rate, agent share, co-broker split.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Commission Calculator                                                  │
/// │                                                                         │
/// │  Sale price: 2,500,000   Rate: 4%   VAT: on   Agent share: 150%        │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_commission_input() ← THIS FUNCTION                           │
/// │       │                                                                 │
/// │       ├── price < 0?          → Negative { sale_price }                │
/// │       ├── price > max?        → TooLarge { sale_price }                │
/// │       ├── rate ∉ [0,100]%?    → OutOfRange { commission_rate }         │
/// │       ├── share ∉ [0,100]%?   → OutOfRange { agent_share }  ◄── here   │
/// │       ├── split ∉ [0,100]%?   → OutOfRange { co_broker_split }         │
/// │       │                                                                 │
/// │       └── OK → engine computes the breakdown                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_commission_input(input: &CommissionInput) -> ValidationResult<ValidatedInput> {
    let sale_price = validate_sale_price_cents(input.sale_price_cents)?;
    let commission_rate =
        validate_percentage_bps(fields::COMMISSION_RATE, input.commission_rate_bps)?;
    let agent_share = validate_percentage_bps(fields::AGENT_SHARE, input.agent_share_bps)?;
    let co_broker_split = input
        .co_broker
        .map(|c| validate_percentage_bps(fields::CO_BROKER_SPLIT, c.split_bps))
        .transpose()?;

    Ok(ValidatedInput {
        sale_price,
        commission_rate,
        include_vat: input.include_vat,
        agent_share,
        co_broker_split,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> CommissionInput {
        CommissionInput {
            sale_price_cents: 250_000_000,
            commission_rate_bps: 400,
            include_vat: true,
            agent_share_bps: 6000,
            co_broker: None,
        }
    }

    #[test]
    fn test_validate_sale_price() {
        assert_eq!(validate_sale_price_cents(0).unwrap(), Money::zero());
        assert_eq!(validate_sale_price_cents(1099).unwrap().cents(), 1099);

        let err = validate_sale_price_cents(-10_000).unwrap_err();
        assert_eq!(err.field(), "sale_price");
        assert_eq!(err.value(), -10_000);
    }

    #[test]
    fn test_validate_sale_price_ceiling() {
        assert!(validate_sale_price_cents(MAX_SALE_PRICE_CENTS).is_ok());

        let err = validate_sale_price_cents(MAX_SALE_PRICE_CENTS + 1).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLarge {
                field: "sale_price".to_string(),
                value: MAX_SALE_PRICE_CENTS + 1,
                max: MAX_SALE_PRICE_CENTS,
            }
        );
        assert!(validate_sale_price_cents(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_percentage_bounds() {
        assert!(validate_percentage_bps("x", 0).is_ok());
        assert!(validate_percentage_bps("x", 10_000).is_ok());
        assert!(validate_percentage_bps("x", -1).is_err());
        assert!(validate_percentage_bps("x", 10_001).is_err());
        assert!(validate_percentage_bps("x", i64::MAX).is_err());
    }

    #[test]
    fn test_validate_commission_input_ok() {
        let validated = validate_commission_input(&valid_input().with_co_broker_bps(5000)).unwrap();
        assert_eq!(validated.sale_price, Money::from_major(2_500_000));
        assert_eq!(validated.commission_rate, Percentage::from_bps(400));
        assert_eq!(validated.agent_share, Percentage::from_bps(6000));
        assert_eq!(validated.co_broker_split, Some(Percentage::from_bps(5000)));
    }

    #[test]
    fn test_validate_commission_input_names_failing_field() {
        let input = CommissionInput {
            commission_rate_bps: -100,
            ..valid_input()
        };
        assert_eq!(validate_commission_input(&input).unwrap_err().field(), "commission_rate");

        let input = CommissionInput {
            agent_share_bps: 15_000,
            ..valid_input()
        };
        let err = validate_commission_input(&input).unwrap_err();
        assert_eq!(err.field(), "agent_share");
        assert_eq!(err.value(), 15_000);

        let input = valid_input().with_co_broker_bps(10_500);
        assert_eq!(validate_commission_input(&input).unwrap_err().field(), "co_broker_split");
    }

    #[test]
    fn test_first_failure_wins() {
        let input = CommissionInput {
            sale_price_cents: -1,
            commission_rate_bps: -1,
            ..valid_input()
        };
        assert_eq!(validate_commission_input(&input).unwrap_err().field(), "sale_price");
    }
}
