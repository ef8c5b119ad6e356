//! # Batch Commission Report
//!
//! Runs every deal in a batch through the commission engine and collects
//! the breakdowns and per-party totals.
//!
//! ## Deal Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  DealRow { model: "exclusive", agent_share_bps: 8000 }                 │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  policy.model("exclusive")    → rate 3%, share 70%, VAT on             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  row overrides                → share 80%                              │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  engine.compute()             → Accepted { breakdown }                 │
//! │                                  or Rejected { error }                  │
//! │                                                                         │
//! │  Rejected lines stay in the report. Totals only count accepted lines.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use opero_core::{CommissionInput, CommissionResult, Money};
use opero_policy::{PolicyConfig, PolicyResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Input
// =============================================================================

/// One closed deal to compute a commission for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRow {
    /// Caller's identifier for the deal (contract number, CRM row id).
    pub reference: String,

    /// Sale price in cents.
    pub sale_price_cents: i64,

    /// Commission model name; the policy's default model when absent.
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub commission_rate_bps: Option<i64>,

    #[serde(default)]
    pub agent_share_bps: Option<i64>,

    #[serde(default)]
    pub include_vat: Option<bool>,

    #[serde(default)]
    pub co_broker_split_bps: Option<i64>,
}

impl DealRow {
    /// Name of the model this deal is computed under.
    pub fn model_name<'a>(&'a self, policy: &'a PolicyConfig) -> &'a str {
        self.model.as_deref().unwrap_or(&policy.default_model)
    }

    /// Builds the engine input: model values first, row overrides on top.
    pub fn to_input(&self, policy: &PolicyConfig) -> PolicyResult<CommissionInput> {
        let model = policy.model(self.model_name(policy))?;
        let mut input = model.input_for(Money::from_cents(self.sale_price_cents));

        if let Some(rate) = self.commission_rate_bps {
            input.commission_rate_bps = rate;
        }
        if let Some(share) = self.agent_share_bps {
            input.agent_share_bps = share;
        }
        if let Some(vat) = self.include_vat {
            input.include_vat = vat;
        }
        if let Some(split) = self.co_broker_split_bps {
            input = input.with_co_broker_bps(split);
        }

        Ok(input)
    }
}

// =============================================================================
// Output
// =============================================================================

/// Result of computing one deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    Accepted { breakdown: CommissionResult },
    Rejected { error: String },
}

/// One report line per input deal, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub reference: String,
    pub model: String,
    pub sale_price: Money,
    #[serde(flatten)]
    pub outcome: LineOutcome,
}

impl ReportLine {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, LineOutcome::Accepted { .. })
    }

    pub fn breakdown(&self) -> Option<&CommissionResult> {
        match &self.outcome {
            LineOutcome::Accepted { breakdown } => Some(breakdown),
            LineOutcome::Rejected { .. } => None,
        }
    }
}

/// Column totals over accepted lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub sale_volume: Money,
    pub base_commission: Money,
    pub vat: Money,
    pub gross_commission: Money,
    pub office_amount: Money,
    pub co_broker_amount: Money,
    pub agent_amount: Money,
}

impl ReportTotals {
    /// Totals with one more line added, or `None` if any column would
    /// overflow.
    fn checked_add(&self, sale_price: Money, breakdown: &CommissionResult) -> Option<Self> {
        Some(ReportTotals {
            sale_volume: self.sale_volume.checked_add(sale_price)?,
            base_commission: self.base_commission.checked_add(breakdown.base_commission)?,
            vat: self.vat.checked_add(breakdown.vat)?,
            gross_commission: self.gross_commission.checked_add(breakdown.gross_commission)?,
            office_amount: self.office_amount.checked_add(breakdown.office_amount)?,
            co_broker_amount: self.co_broker_amount.checked_add(breakdown.co_broker_amount)?,
            agent_amount: self.agent_amount.checked_add(breakdown.agent_amount)?,
        })
    }
}

/// Error text for a deal whose amounts no longer fit in the batch totals.
const TOTALS_OVERFLOW: &str = "batch totals would overflow; split the batch";

/// A complete batch commission report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionReport {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// VAT rate the batch was computed with.
    pub vat_rate_bps: u32,
    pub accepted: usize,
    pub rejected: usize,
    pub totals: ReportTotals,
    pub lines: Vec<ReportLine>,
}

impl CommissionReport {
    /// Fails when any deal was rejected (strict mode).
    pub fn ensure_all_accepted(&self) -> ReportResult<()> {
        if self.rejected > 0 {
            return Err(ReportError::RejectedDeals {
                rejected: self.rejected,
                total: self.lines.len(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Computes every deal under the given policy.
///
/// Only a broken policy fails the whole batch. A deal with invalid input
/// or an unknown model becomes a rejected line carrying the reason, as does
/// a deal whose amounts would overflow the batch totals.
pub fn build_report(policy: &PolicyConfig, deals: &[DealRow]) -> ReportResult<CommissionReport> {
    let engine = policy.engine()?;
    let mut totals = ReportTotals::default();
    let mut lines = Vec::with_capacity(deals.len());

    for deal in deals {
        let model = deal.model_name(policy).to_string();
        let sale_price = Money::from_cents(deal.sale_price_cents);

        let outcome = match deal
            .to_input(policy)
            .map_err(|e| e.to_string())
            .and_then(|input| engine.compute(&input).map_err(|e| e.to_string()))
        {
            Ok(breakdown) => match totals.checked_add(sale_price, &breakdown) {
                Some(next) => {
                    debug!(reference = %deal.reference, gross = %breakdown.gross_commission, "Deal computed");
                    totals = next;
                    LineOutcome::Accepted { breakdown }
                }
                None => {
                    warn!(reference = %deal.reference, "Deal rejected: totals overflow");
                    LineOutcome::Rejected {
                        error: TOTALS_OVERFLOW.to_string(),
                    }
                }
            },
            Err(error) => {
                warn!(reference = %deal.reference, %error, "Deal rejected");
                LineOutcome::Rejected { error }
            }
        };

        lines.push(ReportLine {
            reference: deal.reference.clone(),
            model,
            sale_price,
            outcome,
        });
    }

    let accepted = lines.iter().filter(|l| l.is_accepted()).count();
    let rejected = lines.len() - accepted;
    info!(accepted, rejected, gross = %totals.gross_commission, "Commission report built");

    Ok(CommissionReport {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        vat_rate_bps: engine.vat_rate().bps(),
        accepted,
        rejected,
        totals,
        lines,
    })
}

/// Reads a JSON array of deals.
pub fn read_deals(path: &Path) -> ReportResult<Vec<DealRow>> {
    let unreadable = |reason: String| ReportError::DealsUnreadable {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| unreadable(e.to_string()))?;
    let deals: Vec<DealRow> =
        serde_json::from_str(&contents).map_err(|e| unreadable(e.to_string()))?;

    debug!(count = deals.len(), ?path, "Deals loaded");
    Ok(deals)
}

/// Writes the report as pretty JSON followed by a newline.
pub fn write_report<W: Write>(report: &CommissionReport, mut out: W) -> ReportResult<()> {
    serde_json::to_writer_pretty(&mut out, report)
        .map_err(|e| ReportError::OutputFailed(e.to_string()))?;
    writeln!(out).map_err(|e| ReportError::OutputFailed(e.to_string()))?;
    out.flush().map_err(|e| ReportError::OutputFailed(e.to_string()))
}
