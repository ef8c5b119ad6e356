//! End-to-end batch runs: policy file + deals file → report file.

use std::fs::File;

use opero_commission_report::{build_report, read_deals, write_report, CommissionReport, ReportError};
use opero_core::Money;
use opero_policy::PolicyConfig;

const POLICY: &str = r#"
default_model = "standard"

[tax]
vat_rate_bps = 2000

[models.standard]
label = "Standard listing"
commission_rate_bps = 400
agent_share_bps = 6000

[models.shared]
label = "Shared with co-broker"
commission_rate_bps = 400
agent_share_bps = 6000
co_broker_split_bps = 5000
"#;

const DEALS: &str = r#"[
    { "reference": "OPR-001", "sale_price_cents": 250000000 },
    { "reference": "OPR-002", "sale_price_cents": 250000000, "model": "shared" },
    { "reference": "OPR-003", "sale_price_cents": 250000000, "commission_rate_bps": -100 }
]"#;

#[test]
fn test_batch_run_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let deals_path = dir.path().join("deals.json");
    let report_path = dir.path().join("report.json");
    std::fs::write(&deals_path, DEALS).unwrap();

    let policy = PolicyConfig::from_toml_str(POLICY).unwrap();
    let deals = read_deals(&deals_path).unwrap();
    let report = build_report(&policy, &deals).unwrap();
    write_report(&report, File::create(&report_path).unwrap()).unwrap();

    let written: CommissionReport =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(written, report);

    assert_eq!(written.accepted, 2);
    assert_eq!(written.rejected, 1);

    let solo = written.lines[0].breakdown().unwrap();
    assert_eq!(solo.base_commission, Money::from_major(100_000));
    assert_eq!(solo.vat, Money::from_major(20_000));
    assert_eq!(solo.gross_commission, Money::from_major(120_000));
    assert_eq!(solo.agent_amount, Money::from_major(72_000));
    assert_eq!(solo.office_amount, Money::from_major(48_000));

    let shared = written.lines[1].breakdown().unwrap();
    assert_eq!(shared.pre_split_agent_amount, Money::from_major(72_000));
    assert_eq!(shared.co_broker_amount, Money::from_major(36_000));
    assert_eq!(shared.agent_amount, Money::from_major(36_000));
    assert_eq!(shared.office_amount, Money::from_major(48_000));

    assert!(written.lines[2].breakdown().is_none());
    assert_eq!(written.totals.office_amount, Money::from_major(96_000));
    assert!(matches!(
        written.ensure_all_accepted(),
        Err(ReportError::RejectedDeals { rejected: 1, total: 3 })
    ));
}

#[test]
fn test_unreadable_deals_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deals.json");

    assert!(matches!(
        read_deals(&path),
        Err(ReportError::DealsUnreadable { .. })
    ));

    std::fs::write(&path, r#"{ "reference": "not-an-array" }"#).unwrap();
    assert!(matches!(
        read_deals(&path),
        Err(ReportError::DealsUnreadable { .. })
    ));
}

#[test]
fn test_broken_policy_fails_whole_batch() {
    let mut policy = PolicyConfig::default();
    policy.tax.vat_rate_bps = -1;

    let err = build_report(&policy, &[]).unwrap_err();
    assert!(matches!(err, ReportError::Policy(_)));
}
