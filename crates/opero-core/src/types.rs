//! # Domain Types
//!
//! Commission types shared by the engine, the policy layer and the dashboard.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────┐          │
//! │  │   CommissionInput    │        │    CommissionResult      │          │
//! │  │  ──────────────────  │ engine │  ──────────────────────  │          │
//! │  │  sale_price_cents    │ ─────► │  base_commission         │          │
//! │  │  commission_rate_bps │        │  vat                     │          │
//! │  │  include_vat         │        │  gross_commission        │          │
//! │  │  agent_share_bps     │        │  pre_split_agent_amount  │          │
//! │  │  co_broker?          │        │  office_amount           │          │
//! │  └──────────────────────┘        │  co_broker_amount        │          │
//! │                                  │  agent_amount            │          │
//! │  ┌─────────────────┐             └──────────────────────────┘          │
//! │  │   Percentage    │                                                    │
//! │  │  bps (u32)      │                                                    │
//! │  │  400 = 4.00%    │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw vs. Validated
//! `CommissionInput` carries raw signed integers exactly as a form or a deal
//! file supplied them, so a negative rate can be reported back as invalid
//! instead of being unrepresentable. `Percentage` and `Money` are only built
//! from values that passed validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

/// Basis points in 100%.
pub const FULL_BPS: u32 = 10_000;

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (bps), always within 0%..=100%.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 400 bps = 4% commission, 6000 bps = 60% agent share
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a percentage from basis points.
    ///
    /// Values above 100% are not checked here; use
    /// [`crate::validation::validate_percentage_bps`] for untrusted input.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// 0%.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// 100%.
    #[inline]
    pub const fn full() -> Self {
        Percentage(FULL_BPS)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

/// Converts a decimal percentage (4.0 means 4%) to basis points,
/// rounding to the nearest basis point. The sign is preserved so that
/// validation can reject it.
///
/// NaN and infinities map to `i64::MIN`, which no percentage validator
/// accepts.
///
/// ```rust
/// use opero_core::types::percent_to_bps;
///
/// assert_eq!(percent_to_bps(4.0), 400);
/// assert_eq!(percent_to_bps(33.333), 3333);
/// assert_eq!(percent_to_bps(-1.0), -100);
/// assert_eq!(percent_to_bps(f64::NAN), i64::MIN);
/// ```
pub fn percent_to_bps(pct: f64) -> i64 {
    if !pct.is_finite() {
        return i64::MIN;
    }
    (pct * 100.0).round() as i64
}

// =============================================================================
// Commission Input
// =============================================================================

/// A co-broker taking a cut of the agent's share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CoBroker {
    /// Percentage of the agent's (post-office) amount paid to the co-broker.
    pub split_bps: i64,
}

/// Everything the engine needs to compute one commission breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionInput {
    /// Transaction price in cents.
    pub sale_price_cents: i64,

    /// Commission rate in basis points (400 = 4%).
    pub commission_rate_bps: i64,

    /// Add VAT on top of the base commission.
    pub include_vat: bool,

    /// Share of the gross commission kept by the listing agent, in bps.
    pub agent_share_bps: i64,

    /// Optional co-broker split.
    #[serde(default)]
    pub co_broker: Option<CoBroker>,
}

impl CommissionInput {
    /// Builds an input from decimal percentages, the way the commission
    /// form collects them.
    ///
    /// ```rust
    /// use opero_core::CommissionInput;
    ///
    /// let input = CommissionInput::from_percentages(250_000_000, 4.0, true, 60.0)
    ///     .with_co_broker(50.0);
    /// assert_eq!(input.commission_rate_bps, 400);
    /// assert_eq!(input.co_broker.map(|c| c.split_bps), Some(5000));
    /// ```
    pub fn from_percentages(
        sale_price_cents: i64,
        commission_rate_pct: f64,
        include_vat: bool,
        agent_share_pct: f64,
    ) -> Self {
        CommissionInput {
            sale_price_cents,
            commission_rate_bps: percent_to_bps(commission_rate_pct),
            include_vat,
            agent_share_bps: percent_to_bps(agent_share_pct),
            co_broker: None,
        }
    }

    /// Adds a co-broker split given as a decimal percentage.
    pub fn with_co_broker(self, split_pct: f64) -> Self {
        self.with_co_broker_bps(percent_to_bps(split_pct))
    }

    /// Adds a co-broker split given in basis points.
    pub fn with_co_broker_bps(mut self, split_bps: i64) -> Self {
        self.co_broker = Some(CoBroker { split_bps });
        self
    }

    /// Returns the sale price as Money (unvalidated).
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }
}

// =============================================================================
// Commission Result
// =============================================================================

/// The full breakdown of one commission.
///
/// Recomputed from scratch for every input; it has no identity and is
/// never updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionResult {
    /// `sale_price × commission_rate`.
    pub base_commission: Money,
    /// `base_commission × vat_rate`, or zero when VAT is off.
    pub vat: Money,
    /// `base_commission + vat`.
    pub gross_commission: Money,
    /// `gross_commission × agent_share`, before the co-broker is paid.
    pub pre_split_agent_amount: Money,
    /// `gross_commission - pre_split_agent_amount`.
    pub office_amount: Money,
    /// `pre_split_agent_amount × co_broker_split`, or zero.
    pub co_broker_amount: Money,
    /// `pre_split_agent_amount - co_broker_amount`.
    pub agent_amount: Money,
}

impl CommissionResult {
    /// Sum of what each party receives.
    #[inline]
    pub fn distributed_total(&self) -> Money {
        self.agent_amount + self.co_broker_amount + self.office_amount
    }

    /// True when the parties' amounts add up to the gross commission.
    #[inline]
    pub fn is_balanced(&self) -> bool {
        self.distributed_total() == self.gross_commission
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_from_bps() {
        let rate = Percentage::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
        assert_eq!(rate.to_string(), "8.25%");
        assert_eq!(Percentage::full().to_string(), "100.00%");
    }

    #[test]
    fn test_percent_to_bps_rounds() {
        assert_eq!(percent_to_bps(0.0), 0);
        assert_eq!(percent_to_bps(100.0), 10_000);
        assert_eq!(percent_to_bps(0.125), 13);
        assert_eq!(percent_to_bps(150.0), 15_000);
    }

    #[test]
    fn test_percent_to_bps_non_finite() {
        assert_eq!(percent_to_bps(f64::NAN), i64::MIN);
        assert_eq!(percent_to_bps(f64::INFINITY), i64::MIN);
        assert_eq!(percent_to_bps(f64::NEG_INFINITY), i64::MIN);
    }

    #[test]
    fn test_input_builders() {
        let input = CommissionInput::from_percentages(100, 3.5, false, 70.0);
        assert_eq!(input.commission_rate_bps, 350);
        assert_eq!(input.agent_share_bps, 7000);
        assert!(!input.include_vat);
        assert!(input.co_broker.is_none());

        let input = input.with_co_broker_bps(2500);
        assert_eq!(input.co_broker, Some(CoBroker { split_bps: 2500 }));
    }

    #[test]
    fn test_input_deserializes_without_co_broker() {
        let json = r#"{
            "sale_price_cents": 250000000,
            "commission_rate_bps": 400,
            "include_vat": true,
            "agent_share_bps": 6000
        }"#;
        let input: CommissionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.sale_price(), Money::from_major(2_500_000));
        assert!(input.co_broker.is_none());
    }

    #[test]
    fn test_result_balance_check() {
        let result = CommissionResult {
            base_commission: Money::from_cents(100),
            vat: Money::zero(),
            gross_commission: Money::from_cents(100),
            pre_split_agent_amount: Money::from_cents(60),
            office_amount: Money::from_cents(40),
            co_broker_amount: Money::from_cents(30),
            agent_amount: Money::from_cents(30),
        };
        assert!(result.is_balanced());

        let skewed = CommissionResult {
            agent_amount: Money::from_cents(31),
            ..result
        };
        assert!(!skewed.is_balanced());
    }
}
