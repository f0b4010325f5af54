//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Billing configuration.
    #[serde(default)]
    pub billing: BillingConfig,
}

/// Billing configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BillingConfig {
    /// Service fee percentage applied on top of the items total.
    ///
    /// A missing value means no service fee. Negative values are rejected
    /// by the engine at call time, not at load time.
    #[serde(default)]
    pub service_fee_percent: Decimal,
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
            .add_source(config::Environment::with_prefix("TABSPLIT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
