//! Commission report configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then command-line arguments override it.
//!
//! ## Usage
//! ```bash
//! commission-report deals.json
//! commission-report deals.json --policy ./commission.toml --output report.json
//! OPERO_REPORT_STRICT=true commission-report deals.json
//! ```

use std::path::PathBuf;

use crate::error::{ReportError, ReportResult};

/// Environment variable pointing at the policy file.
pub const ENV_POLICY_PATH: &str = "OPERO_POLICY_PATH";

/// Environment variable enabling strict mode.
pub const ENV_REPORT_STRICT: &str = "OPERO_REPORT_STRICT";

pub const USAGE: &str = "\
Usage: commission-report <DEALS_JSON> [OPTIONS]

Options:
  -p, --policy <PATH>   Commission policy file (default: $OPERO_POLICY_PATH or platform config dir)
  -o, --output <PATH>   Write the report here instead of stdout
      --strict          Fail if any deal is rejected (default: $OPERO_REPORT_STRICT or false)
  -h, --help            Print this help";

/// Report run configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportConfig {
    /// Deals file (JSON array of deal rows).
    pub deals_path: Option<PathBuf>,

    /// Policy file. `None` means the platform default location.
    pub policy_path: Option<PathBuf>,

    /// Report destination. `None` means stdout.
    pub output_path: Option<PathBuf>,

    /// Fail the run when any deal is rejected.
    pub strict: bool,
}

/// What the binary should do after argument parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run,
    Help,
}

impl ReportConfig {
    /// Load configuration from environment variables.
    pub fn load() -> ReportResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> ReportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strict = match lookup(ENV_REPORT_STRICT) {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ReportError::InvalidValue(ENV_REPORT_STRICT.to_string()))?,
            None => false,
        };

        Ok(ReportConfig {
            deals_path: None,
            policy_path: lookup(ENV_POLICY_PATH)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            output_path: None,
            strict,
        })
    }

    /// Applies command-line arguments (without the program name).
    pub fn apply_args<I>(&mut self, args: I) -> ReportResult<Command>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--policy" | "-p" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ReportError::InvalidValue("--policy".to_string()))?;
                    self.policy_path = Some(PathBuf::from(path));
                }
                "--output" | "-o" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ReportError::InvalidValue("--output".to_string()))?;
                    self.output_path = Some(PathBuf::from(path));
                }
                "--strict" => self.strict = true,
                "--help" | "-h" => return Ok(Command::Help),
                flag if flag.starts_with('-') => {
                    return Err(ReportError::InvalidValue(format!("unknown option {}", flag)));
                }
                path => {
                    if self.deals_path.is_some() {
                        return Err(ReportError::InvalidValue(format!(
                            "unexpected argument {}",
                            path
                        )));
                    }
                    self.deals_path = Some(PathBuf::from(path));
                }
            }
        }

        if self.deals_path.is_none() {
            return Err(ReportError::InvalidValue("<DEALS_JSON>".to_string()));
        }

        Ok(Command::Run)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
