//! Exchange connection configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::infrastructure::exchange::{BinanceConfig, BinanceEnvironment};

/// Binance connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// API key. Usually `${BINANCE_API_KEY}`.
    #[serde(default)]
    pub api_key: String,
    /// API secret. Usually `${BINANCE_API_SECRET}`.
    #[serde(default)]
    pub api_secret: String,
    /// TESTNET or LIVE.
    #[serde(default)]
    pub environment: BinanceEnvironment,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Signed request validity window in milliseconds.
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            environment: BinanceEnvironment::default(),
            timeout_secs: default_timeout_secs(),
            recv_window_ms: default_recv_window_ms(),
        }
    }
}

impl ExchangeConfig {
    /// Build the adapter configuration.
    #[must_use]
    pub fn to_binance_config(&self) -> BinanceConfig {
        BinanceConfig::new(self.api_key.clone(), self.api_secret.clone(), self.environment)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_recv_window(self.recv_window_ms)
    }
}

impl std::fmt::Debug for ExchangeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeConfig")
            .field("api_key_set", &!self.api_key.is_empty())
            .field("api_secret_set", &!self.api_secret.is_empty())
            .field("environment", &self.environment)
            .field("timeout_secs", &self.timeout_secs)
            .field("recv_window_ms", &self.recv_window_ms)
            .finish()
    }
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_recv_window_ms() -> u64 {
    5000
}
