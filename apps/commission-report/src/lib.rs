//! # OPERO Commission Report
//!
//! Batch commission calculation for closed deals.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Commission Report                                 │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  config        │  │  report        │  │  opero-policy              ││
//! │  │                │  │                │  │                            ││
//! │  │ • env (OPERO_*)│  │ • read_deals   │  │ • VAT rate                 ││
//! │  │ • CLI args     │  │ • build_report │  │ • commission models        ││
//! │  │                │  │ • write_report │  │                            ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod report;

pub use config::{Command, ReportConfig};
pub use error::{ReportError, ReportResult};
pub use report::{
    build_report, read_deals, write_report, CommissionReport, DealRow, LineOutcome, ReportLine,
    ReportTotals,
};
