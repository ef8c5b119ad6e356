//! # Commission Engine
//!
//! Turns a sale price and a set of percentages into a full commission
//! breakdown: base, VAT, gross, office cut, co-broker cut, agent take-home.
//!
//! ## Derivation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  base      = sale_price × commission_rate            (rounded)         │
//! │  vat       = include_vat ? base × vat_rate : 0       (rounded)         │
//! │  gross     = base + vat                                                 │
//! │  pre_split = gross × agent_share                     (rounded)         │
//! │  office    = gross − pre_split                                          │
//! │  co_broker = co_broker ? pre_split × split : 0       (rounded)         │
//! │  agent     = pre_split − co_broker                                      │
//! │                                                                         │
//! │  The co-broker is paid out of the agent's share AFTER the office cut.  │
//! │  office and agent are remainders, so                                   │
//! │      agent + co_broker + office == gross   holds to the cent.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use opero_core::{compute_commission, CommissionInput, Money};
//!
//! let input = CommissionInput::from_percentages(
//!     Money::from_major(2_500_000).cents(),
//!     4.0,
//!     true,
//!     60.0,
//! );
//! let result = compute_commission(&input).unwrap();
//!
//! assert_eq!(result.gross_commission, Money::from_major(120_000));
//! assert_eq!(result.agent_amount, Money::from_major(72_000));
//! assert_eq!(result.office_amount, Money::from_major(48_000));
//! ```

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{CommissionInput, CommissionResult, Percentage};
use crate::validation::{
    fields, validate_commission_input, validate_percentage_bps, ValidationResult,
};
use crate::DEFAULT_VAT_RATE_BPS;

/// The commission calculator.
///
/// Holds only the VAT policy; every call is independent and the engine is
/// freely shareable across threads. Built with [`CommissionEngine::new`],
/// which validates the VAT rate, or `Default` (20%).
///
/// ```compile_fail
/// use opero_core::{CommissionEngine, Percentage};
///
/// let engine = CommissionEngine::with_vat_rate(Percentage::from_bps(25_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionEngine {
    vat_rate: Percentage,
}

impl CommissionEngine {
    /// Creates an engine with the given VAT rate in basis points.
    ///
    /// ## Errors
    /// `OutOfRange { field: "vat_rate" }` when the rate is outside 0%..=100%.
    ///
    /// ```rust
    /// use opero_core::CommissionEngine;
    ///
    /// let engine = CommissionEngine::new(1800).unwrap(); // 18% VAT
    /// assert_eq!(engine.vat_rate().bps(), 1800);
    /// assert!(CommissionEngine::new(-5).is_err());
    /// ```
    pub fn new(vat_rate_bps: i64) -> ValidationResult<Self> {
        let vat_rate = validate_percentage_bps(fields::VAT_RATE, vat_rate_bps)?;
        Ok(CommissionEngine { vat_rate })
    }

    /// Creates an engine from an already-validated VAT rate.
    #[inline]
    pub(crate) const fn with_vat_rate(vat_rate: Percentage) -> Self {
        CommissionEngine { vat_rate }
    }

    /// The VAT rate applied when an input has `include_vat` set.
    #[inline]
    pub const fn vat_rate(&self) -> Percentage {
        self.vat_rate
    }

    /// Computes the commission breakdown.
    ///
    /// The input is fully validated first; on error nothing is computed.
    pub fn compute(&self, input: &CommissionInput) -> CoreResult<CommissionResult> {
        let input = validate_commission_input(input)?;

        let base_commission = input.sale_price.apply_rate(input.commission_rate);
        let vat = if input.include_vat {
            base_commission.apply_rate(self.vat_rate)
        } else {
            Money::zero()
        };
        let gross_commission = base_commission + vat;

        let pre_split_agent_amount = gross_commission.apply_rate(input.agent_share);
        let office_amount = gross_commission - pre_split_agent_amount;

        let co_broker_amount = match input.co_broker_split {
            Some(split) => pre_split_agent_amount.apply_rate(split),
            None => Money::zero(),
        };
        let agent_amount = pre_split_agent_amount - co_broker_amount;

        Ok(CommissionResult {
            base_commission,
            vat,
            gross_commission,
            pre_split_agent_amount,
            office_amount,
            co_broker_amount,
            agent_amount,
        })
    }
}

impl Default for CommissionEngine {
    fn default() -> Self {
        CommissionEngine::with_vat_rate(Percentage::from_bps(DEFAULT_VAT_RATE_BPS))
    }
}

/// Computes a commission breakdown with the default 20% VAT rate.
///
/// Use a configured [`CommissionEngine`] when the VAT rate comes from policy.
pub fn compute_commission(input: &CommissionInput) -> CoreResult<CommissionResult> {
    CommissionEngine::default().compute(input)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::validation::MAX_SALE_PRICE_CENTS;

    fn listing(sale_major: i64, rate_pct: f64, vat: bool, share_pct: f64) -> CommissionInput {
        CommissionInput::from_percentages(
            Money::from_major(sale_major).cents(),
            rate_pct,
            vat,
            share_pct,
        )
    }

    #[test]
    fn test_reference_scenario() {
        let result = compute_commission(&listing(2_500_000, 4.0, true, 60.0)).unwrap();

        assert_eq!(result.base_commission, Money::from_major(100_000));
        assert_eq!(result.vat, Money::from_major(20_000));
        assert_eq!(result.gross_commission, Money::from_major(120_000));
        assert_eq!(result.pre_split_agent_amount, Money::from_major(72_000));
        assert_eq!(result.agent_amount, Money::from_major(72_000));
        assert_eq!(result.office_amount, Money::from_major(48_000));
        assert!(result.co_broker_amount.is_zero());
    }

    #[test]
    fn test_reference_scenario_with_co_broker() {
        let input = listing(2_500_000, 4.0, true, 60.0).with_co_broker(50.0);
        let result = compute_commission(&input).unwrap();

        assert_eq!(result.pre_split_agent_amount, Money::from_major(72_000));
        assert_eq!(result.co_broker_amount, Money::from_major(36_000));
        assert_eq!(result.agent_amount, Money::from_major(36_000));
        assert_eq!(result.office_amount, Money::from_major(48_000));
    }

    #[test]
    fn test_co_broker_does_not_touch_office() {
        let solo = compute_commission(&listing(810_000, 3.0, true, 70.0)).unwrap();
        let shared =
            compute_commission(&listing(810_000, 3.0, true, 70.0).with_co_broker(35.0)).unwrap();

        assert_eq!(solo.office_amount, shared.office_amount);
        assert_eq!(solo.gross_commission, shared.gross_commission);
        assert_eq!(
            shared.agent_amount + shared.co_broker_amount,
            solo.agent_amount
        );
    }

    #[test]
    fn test_without_vat() {
        let result = compute_commission(&listing(1_000_000, 2.5, false, 50.0)).unwrap();
        assert!(result.vat.is_zero());
        assert_eq!(result.gross_commission, result.base_commission);
    }

    #[test]
    fn test_without_co_broker() {
        let result = compute_commission(&listing(1_000_000, 2.5, true, 50.0)).unwrap();
        assert!(result.co_broker_amount.is_zero());
        assert_eq!(result.agent_amount, result.pre_split_agent_amount);
    }

    #[test]
    fn test_zero_agent_share() {
        let result =
            compute_commission(&listing(1_000_000, 3.0, true, 0.0).with_co_broker(40.0)).unwrap();
        assert!(result.agent_amount.is_zero());
        assert!(result.co_broker_amount.is_zero());
        assert_eq!(result.office_amount, result.gross_commission);
    }

    #[test]
    fn test_full_agent_share() {
        let result = compute_commission(&listing(1_000_000, 3.0, true, 100.0)).unwrap();
        assert!(result.office_amount.is_zero());
        assert_eq!(result.agent_amount, result.gross_commission);
    }

    #[test]
    fn test_zero_sale_price() {
        let result = compute_commission(&listing(0, 4.0, true, 60.0)).unwrap();
        assert!(result.gross_commission.is_zero());
        assert!(result.is_balanced());
    }

    #[test]
    fn test_configured_vat_rate() {
        let engine = CommissionEngine::new(1800).unwrap();
        let result = engine.compute(&listing(2_500_000, 4.0, true, 60.0)).unwrap();
        assert_eq!(result.vat, Money::from_major(18_000));
        assert_eq!(result.gross_commission, Money::from_major(118_000));
        assert!(result.is_balanced());
    }

    #[test]
    fn test_vat_rate_out_of_range() {
        let err = CommissionEngine::new(10_001).unwrap_err();
        assert_eq!(err.field(), "vat_rate");
        assert_eq!(CommissionEngine::default().vat_rate().bps(), 2000);
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = compute_commission(&listing(2_500_000, -1.0, true, 60.0)).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput(ValidationError::OutOfRange {
                field: "commission_rate".to_string(),
                value: -100,
                min: 0,
                max: 10_000,
            })
        );
    }

    #[test]
    fn test_rejects_agent_share_above_full() {
        let err = compute_commission(&listing(2_500_000, 4.0, true, 150.0)).unwrap_err();
        assert_eq!(err.field(), "agent_share");
    }

    #[test]
    fn test_rejects_negative_sale_price() {
        let err = compute_commission(&listing(-100, 4.0, true, 60.0)).unwrap_err();
        assert_eq!(err.field(), "sale_price");
    }

    #[test]
    fn test_rejects_co_broker_split_out_of_range() {
        let input = listing(2_500_000, 4.0, true, 60.0).with_co_broker(-10.0);
        assert_eq!(compute_commission(&input).unwrap_err().field(), "co_broker_split");
    }

    #[test]
    fn test_rejects_non_finite_percentages() {
        let err = compute_commission(&listing(2_500_000, f64::NAN, true, 60.0)).unwrap_err();
        assert_eq!(err.field(), "commission_rate");

        let err = compute_commission(&listing(2_500_000, 4.0, true, f64::INFINITY)).unwrap_err();
        assert_eq!(err.field(), "agent_share");

        let input = listing(2_500_000, 4.0, true, 60.0).with_co_broker(f64::NAN);
        assert_eq!(compute_commission(&input).unwrap_err().field(), "co_broker_split");
    }

    #[test]
    fn test_largest_sale_price_at_full_rates() {
        let engine = CommissionEngine::new(10_000).unwrap();
        let input = CommissionInput {
            sale_price_cents: MAX_SALE_PRICE_CENTS,
            commission_rate_bps: 10_000,
            include_vat: true,
            agent_share_bps: 10_000,
            co_broker: Some(crate::CoBroker { split_bps: 5000 }),
        };

        let result = engine.compute(&input).unwrap();
        assert_eq!(result.gross_commission.cents(), 2 * MAX_SALE_PRICE_CENTS);
        assert!(result.is_balanced());
        assert!(!result.agent_amount.is_negative());

        let too_large = CommissionInput {
            sale_price_cents: MAX_SALE_PRICE_CENTS + 1,
            ..input
        };
        assert!(matches!(
            engine.compute(&too_large).unwrap_err(),
            CoreError::InvalidInput(ValidationError::TooLarge { .. })
        ));

        let huge = CommissionInput {
            sale_price_cents: i64::MAX / 2 + 10,
            ..input
        };
        assert_eq!(engine.compute(&huge).unwrap_err().field(), "sale_price");
    }

    #[test]
    fn test_idempotent() {
        let input = listing(1_234_567, 3.33, true, 61.7).with_co_broker(27.5);
        let first = compute_commission(&input).unwrap();
        let second = compute_commission(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_always_balanced_on_awkward_numbers() {
        let engine = CommissionEngine::new(1999).unwrap();
        let prices = [1, 99, 12_345, 999_999, 123_456_789, 987_654_321_012];
        let percentages = [0, 1, 333, 3333, 4999, 5000, 6667, 9999, 10_000];

        for &price in &prices {
            for &rate in &percentages {
                for &share in &percentages {
                    for split in [None, Some(3333), Some(5001)] {
                        let input = CommissionInput {
                            sale_price_cents: price,
                            commission_rate_bps: rate,
                            include_vat: rate % 2 == 1,
                            agent_share_bps: share,
                            co_broker: split.map(|split_bps| crate::CoBroker { split_bps }),
                        };
                        let result = engine.compute(&input).unwrap();
                        assert!(result.is_balanced(), "unbalanced for {:?}", input);
                        assert!(!result.agent_amount.is_negative());
                        assert!(!result.office_amount.is_negative());
                        assert!(!result.co_broker_amount.is_negative());
                    }
                }
            }
        }
    }
}
