//! # Commission Report CLI
//!
//! Computes commissions for a batch of deals and prints a JSON report.
//!
//! ## Usage
//! ```bash
//! # Report on stdout, policy from the platform config directory
//! cargo run -p opero-commission-report -- deals.json
//!
//! # Explicit policy and output file; fail on any rejected deal
//! cargo run -p opero-commission-report -- deals.json --policy commission.toml --output report.json --strict
//! ```
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show per-deal results
//! - Default: `info,opero=debug`
//!
//! Logs go to stderr so stdout stays clean JSON.

use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::Context;
use opero_commission_report::config::USAGE;
use opero_commission_report::{build_report, read_deals, write_report, Command, ReportConfig};
use opero_policy::PolicyConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut config = ReportConfig::load()?;
    match config.apply_args(std::env::args().skip(1)) {
        Ok(Command::Run) => {}
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    }

    let policy = PolicyConfig::load(config.policy_path.clone()).context("loading commission policy")?;
    info!(
        vat_rate_bps = policy.tax.vat_rate_bps,
        default_model = %policy.default_model,
        models = policy.models.len(),
        "Commission policy loaded"
    );

    let deals_path = config
        .deals_path
        .as_deref()
        .context("no deals file given")?;
    let deals = read_deals(deals_path)?;
    let report = build_report(&policy, &deals)?;

    match &config.output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report file {}", path.display()))?;
            write_report(&report, BufWriter::new(file))?;
            info!(?path, report_id = %report.id, "Report written");
        }
        None => write_report(&report, io::stdout().lock())?,
    }

    if config.strict {
        report.ensure_all_accepted()?;
    }

    Ok(())
}

/// Initializes the tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,opero=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
