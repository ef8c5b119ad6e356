//! # Commission Policy Configuration
//!
//! The VAT rate and the named commission models the brokerage offers.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     OPERO_VAT_RATE_BPS=1800                                            │
//! │     OPERO_DEFAULT_MODEL=exclusive                                      │
//! │                                                                         │
//! │  2. TOML Policy File                                                   │
//! │     ~/.config/crm/commission.toml (Linux)                              │
//! │     ~/Library/Application Support/com.opero.crm/commission.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     20% VAT, standard / exclusive / referral models                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Policy File Format
//! ```toml
//! default_model = "standard"
//!
//! [tax]
//! vat_rate_bps = 2000  # 20%
//!
//! [models.standard]
//! label = "Standard listing"
//! commission_rate_bps = 400   # 4%
//! agent_share_bps = 6000      # agent keeps 60% of gross
//! include_vat = true
//!
//! [models.referral]
//! label = "Referral with co-broker"
//! commission_rate_bps = 200
//! agent_share_bps = 5000
//! co_broker_split_bps = 5000  # co-broker takes half of the agent's share
//! ```
//!
//! A file that defines `[models.*]` replaces the default menu entirely.

use std::collections::BTreeMap;
use std::path::PathBuf;

use opero_core::validation::{fields, validate_percentage_bps};
use opero_core::{CommissionEngine, CommissionInput, Money, DEFAULT_VAT_RATE_BPS};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{PolicyError, PolicyResult};

/// Environment variable overriding the VAT rate (basis points).
pub const ENV_VAT_RATE_BPS: &str = "OPERO_VAT_RATE_BPS";

/// Environment variable overriding the default commission model.
pub const ENV_DEFAULT_MODEL: &str = "OPERO_DEFAULT_MODEL";

// =============================================================================
// Commission Model
// =============================================================================

/// A named commission preset, e.g. "standard" = 4% with the agent keeping 60%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionModel {
    /// Human-readable label shown in the commission form's model picker.
    #[serde(default)]
    pub label: String,

    /// Commission rate in basis points (400 = 4%).
    pub commission_rate_bps: i64,

    /// Share of gross commission kept by the agent, in basis points.
    pub agent_share_bps: i64,

    /// Whether VAT is added on top of the base commission.
    #[serde(default = "default_true")]
    pub include_vat: bool,

    /// Default co-broker split for deals under this model, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub co_broker_split_bps: Option<i64>,
}

fn default_true() -> bool {
    true
}

impl CommissionModel {
    /// Builds the engine input for a sale under this model.
    ///
    /// ```rust
    /// use opero_core::Money;
    /// use opero_policy::PolicyConfig;
    ///
    /// let policy = PolicyConfig::default();
    /// let input = policy.model("standard").unwrap().input_for(Money::from_major(2_500_000));
    /// assert_eq!(input.commission_rate_bps, 400);
    /// assert_eq!(input.agent_share_bps, 6000);
    /// ```
    pub fn input_for(&self, sale_price: Money) -> CommissionInput {
        let input = CommissionInput {
            sale_price_cents: sale_price.cents(),
            commission_rate_bps: self.commission_rate_bps,
            include_vat: self.include_vat,
            agent_share_bps: self.agent_share_bps,
            co_broker: None,
        };

        match self.co_broker_split_bps {
            Some(split) => input.with_co_broker_bps(split),
            None => input,
        }
    }

    /// Checks every percentage of the model.
    fn validate(&self, name: &str) -> PolicyResult<()> {
        let field = |f: &str| format!("models.{}.{}", name, f);

        validate_percentage_bps(&field(fields::COMMISSION_RATE), self.commission_rate_bps)?;
        validate_percentage_bps(&field(fields::AGENT_SHARE), self.agent_share_bps)?;
        if let Some(split) = self.co_broker_split_bps {
            validate_percentage_bps(&field(fields::CO_BROKER_SPLIT), split)?;
        }

        Ok(())
    }
}

/// The preset menu shipped with the dashboard.
fn default_models() -> BTreeMap<String, CommissionModel> {
    let mut models = BTreeMap::new();
    models.insert(
        "standard".to_string(),
        CommissionModel {
            label: "Standard listing".to_string(),
            commission_rate_bps: 400,
            agent_share_bps: 6000,
            include_vat: true,
            co_broker_split_bps: None,
        },
    );
    models.insert(
        "exclusive".to_string(),
        CommissionModel {
            label: "Exclusive listing".to_string(),
            commission_rate_bps: 300,
            agent_share_bps: 7000,
            include_vat: true,
            co_broker_split_bps: None,
        },
    );
    models.insert(
        "referral".to_string(),
        CommissionModel {
            label: "Referral with co-broker".to_string(),
            commission_rate_bps: 200,
            agent_share_bps: 5000,
            include_vat: true,
            co_broker_split_bps: Some(5000),
        },
    );
    models
}

fn default_model_name() -> String {
    "standard".to_string()
}

// =============================================================================
// Tax Settings
// =============================================================================

/// VAT settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// VAT rate in basis points, added on top of the base commission.
    #[serde(default = "default_vat_rate")]
    pub vat_rate_bps: i64,
}

fn default_vat_rate() -> i64 {
    DEFAULT_VAT_RATE_BPS as i64
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            vat_rate_bps: default_vat_rate(),
        }
    }
}

// =============================================================================
// Policy Configuration
// =============================================================================

/// Complete commission policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Model used for deals that don't name one.
    #[serde(default = "default_model_name")]
    pub default_model: String,

    /// VAT settings.
    #[serde(default)]
    pub tax: TaxSettings,

    /// Named commission models.
    #[serde(default = "default_models")]
    pub models: BTreeMap<String, CommissionModel>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            default_model: default_model_name(),
            tax: TaxSettings::default(),
            models: default_models(),
        }
    }
}

impl PolicyConfig {
    /// Loads the policy from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Policy file (commission.toml), if it exists
    /// 3. Environment variables
    ///
    /// The result is validated before it is returned.
    pub fn load(config_path: Option<PathBuf>) -> PolicyResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading commission policy from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Policy file not found, using defaults");
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parses and validates a policy from TOML text. No environment overrides.
    pub fn from_toml_str(contents: &str) -> PolicyResult<Self> {
        let config: PolicyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the policy or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load commission policy: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves the policy to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> PolicyResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| PolicyError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PolicyError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| PolicyError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Commission policy saved");
        Ok(())
    }

    /// Validates the policy.
    pub fn validate(&self) -> PolicyResult<()> {
        validate_percentage_bps(fields::VAT_RATE, self.tax.vat_rate_bps)?;

        if self.models.is_empty() {
            return Err(PolicyError::InvalidConfig(
                "at least one commission model must be configured".into(),
            ));
        }

        if !self.models.contains_key(&self.default_model) {
            return Err(PolicyError::InvalidConfig(format!(
                "default_model '{}' is not one of the configured models ({})",
                self.default_model,
                self.model_names().join(", ")
            )));
        }

        for (name, model) in &self.models {
            model.validate(name)?;
        }

        Ok(())
    }

    /// Applies `OPERO_*` environment variable overrides.
    fn apply_env_overrides(&mut self) -> PolicyResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup. Unparseable values are errors.
    fn apply_overrides_from<F>(&mut self, lookup: F) -> PolicyResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup(ENV_VAT_RATE_BPS) {
            let bps = rate.trim().parse::<i64>().map_err(|_| {
                PolicyError::InvalidConfig(format!(
                    "{} must be an integer number of basis points, got '{}'",
                    ENV_VAT_RATE_BPS, rate
                ))
            })?;
            debug!(vat_rate_bps = bps, "Overriding VAT rate from environment");
            self.tax.vat_rate_bps = bps;
        }

        if let Some(model) = lookup(ENV_DEFAULT_MODEL) {
            debug!(model = %model, "Overriding default commission model from environment");
            self.default_model = model.trim().to_string();
        }

        Ok(())
    }

    /// Returns the default policy file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "opero", "crm")
            .map(|dirs| dirs.config_dir().join("commission.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds a commission engine with this policy's VAT rate.
    pub fn engine(&self) -> PolicyResult<CommissionEngine> {
        Ok(CommissionEngine::new(self.tax.vat_rate_bps)?)
    }

    /// Looks up a commission model by name.
    pub fn model(&self, name: &str) -> PolicyResult<&CommissionModel> {
        self.models.get(name).ok_or_else(|| PolicyError::UnknownModel {
            name: name.to_string(),
            available: self.model_names().join(", "),
        })
    }

    /// The model used when a deal names none.
    pub fn default_model(&self) -> PolicyResult<&CommissionModel> {
        self.model(&self.default_model)
    }

    /// Configured model names, sorted.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }
}
