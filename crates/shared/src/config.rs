//! Application configuration management.

use serde::Deserialize;

use crate::types::Money;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Settlement tolerances and policies.
    #[serde(default)]
    pub settlement: SettlementConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    2 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// How expenses paid by someone outside the trip roster enter the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalPayerPolicy {
    /// The external party gets its own ledger account and is owed the shares.
    #[default]
    VirtualAccount,
    /// Externally paid expenses are left out of the ledger.
    Exclude,
}

/// Settlement configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementConfig {
    /// Largest accepted gap between a manual split total and the expense amount.
    #[serde(default = "default_manual_split_tolerance")]
    pub manual_split_tolerance: Money,
    /// Accepted ledger imbalance per account before settlement is refused.
    #[serde(default)]
    pub imbalance_tolerance_per_account: Money,
    /// Net balances with magnitude at or below this are treated as settled.
    #[serde(default)]
    pub settled_threshold: Money,
    /// Treatment of expenses paid by non-participants.
    #[serde(default)]
    pub external_payer_policy: ExternalPayerPolicy,
}

fn default_manual_split_tolerance() -> Money {
    Money::MINOR_UNIT
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            manual_split_tolerance: default_manual_split_tolerance(),
            imbalance_tolerance_per_account: Money::ZERO,
            settled_threshold: Money::ZERO,
            external_payer_policy: ExternalPayerPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TRIPSPLIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.settlement.manual_split_tolerance, Money::from_minor(1));
        assert_eq!(config.settlement.imbalance_tolerance_per_account, Money::ZERO);
        assert_eq!(config.settlement.settled_threshold, Money::ZERO);
        assert_eq!(
            config.settlement.external_payer_policy,
            ExternalPayerPolicy::VirtualAccount
        );
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            ["TRIPSPLIT__SERVER__PORT", "TRIPSPLIT__SETTLEMENT__MANUAL_SPLIT_TOLERANCE"],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.settlement.manual_split_tolerance, Money::MINOR_UNIT);
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("TRIPSPLIT__SERVER__PORT", Some("9090")),
                ("TRIPSPLIT__SETTLEMENT__MANUAL_SPLIT_TOLERANCE", Some("0.02")),
                ("TRIPSPLIT__SETTLEMENT__EXTERNAL_PAYER_POLICY", Some("exclude")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.settlement.manual_split_tolerance, Money::from_minor(2));
                assert_eq!(
                    config.settlement.external_payer_policy,
                    ExternalPayerPolicy::Exclude
                );
            },
        );
    }
}
