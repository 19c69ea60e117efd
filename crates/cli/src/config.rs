//! Environment-driven configuration for the teller console.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use teller_accounts::AccountRegistry;
use teller_core::Money;
use teller_observability::{LogFormat, LogSettings};

pub const ENV_LOG_FORMAT: &str = "TELLER_LOG_FORMAT";
pub const ENV_LOG_FILTER: &str = "TELLER_LOG_FILTER";
pub const ENV_MENU_PAUSE_MS: &str = "TELLER_MENU_PAUSE_MS";
pub const ENV_SEED_ACCOUNTS: &str = "TELLER_SEED_ACCOUNTS";

const DEFAULT_MENU_PAUSE: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("invalid TELLER_SEED_ACCOUNTS: {0}")]
    SeedJson(#[from] serde_json::Error),
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

/// Account created at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedAccount {
    pub id: String,
    pub secret: String,
    pub opening_balance: Money,
}

impl SeedAccount {
    fn new(id: &str, secret: &str, opening_units: u32) -> Self {
        Self {
            id: id.to_string(),
            secret: secret.to_string(),
            opening_balance: Money::from_units(opening_units),
        }
    }
}

/// Seed entry as written in `TELLER_SEED_ACCOUNTS`.
#[derive(Debug, Deserialize)]
struct RawSeedAccount {
    id: String,
    secret: String,
    #[serde(default)]
    balance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TellerConfig {
    pub log: LogSettings,
    /// Pause after leaving the account menu.
    pub menu_pause: Duration,
    pub seed_accounts: Vec<SeedAccount>,
}

impl Default for TellerConfig {
    fn default() -> Self {
        Self {
            log: LogSettings::default(),
            menu_pause: DEFAULT_MENU_PAUSE,
            seed_accounts: default_seed_accounts(),
        }
    }
}

impl TellerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (env-like).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            config.log.format = format
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(ENV_LOG_FORMAT, e.to_string()))?;
        }

        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            if !filter.trim().is_empty() {
                config.log.default_filter = filter;
            }
        }

        if let Some(pause) = lookup(ENV_MENU_PAUSE_MS) {
            let millis = pause
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid(ENV_MENU_PAUSE_MS, e.to_string()))?;
            config.menu_pause = Duration::from_millis(millis);
        }

        if let Some(seeds) = lookup(ENV_SEED_ACCOUNTS) {
            config.seed_accounts = parse_seed_accounts(&seeds)?;
        }

        Ok(config)
    }

    /// Create the registry and open every seed account in it.
    pub fn build_registry(&self) -> AccountRegistry {
        let mut registry = AccountRegistry::new();
        for seed in &self.seed_accounts {
            registry.create_account(seed.id.as_str(), seed.secret.as_str(), seed.opening_balance);
        }
        registry
    }
}

/// Sample accounts available when no seed list is configured.
pub fn default_seed_accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount::new("SHARATH", "1188", 1000),
        SeedAccount::new("atmuser1", "1111", 1500),
        SeedAccount::new("atmuser2", "1112", 500),
        SeedAccount::new("atmuser3", "1113", 2000),
    ]
}

fn parse_seed_accounts(json: &str) -> Result<Vec<SeedAccount>, ConfigError> {
    let raw: Vec<RawSeedAccount> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(|seed| {
            let opening_balance = match seed.balance.as_deref() {
                None => Money::ZERO,
                Some(text) => text.parse::<Money>().map_err(|e| {
                    ConfigError::invalid(ENV_SEED_ACCOUNTS, format!("account {:?}: {e}", seed.id))
                })?,
            };
            Ok(SeedAccount {
                id: seed.id,
                secret: seed.secret,
                opening_balance,
            })
        })
        .collect()
}
