//! Binance adapter configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Binance environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BinanceEnvironment {
    /// Testnet (no real funds).
    #[default]
    Testnet,
    /// Live trading (real money).
    Live,
}

impl BinanceEnvironment {
    /// Base URL of the USDⓈ-M futures API.
    #[must_use]
    pub const fn futures_base_url(&self) -> &'static str {
        match self {
            Self::Testnet => "https://testnet.binancefuture.com",
            Self::Live => "https://fapi.binance.com",
        }
    }

    /// Base URL of the spot API, used for OCO order lists.
    #[must_use]
    pub const fn spot_base_url(&self) -> &'static str {
        match self {
            Self::Testnet => "https://testnet.binance.vision",
            Self::Live => "https://api.binance.com",
        }
    }

    /// Check if this is live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl std::fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Testnet => write!(f, "TESTNET"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Configuration for the Binance exchange adapter.
#[derive(Clone)]
pub struct BinanceConfig {
    /// API key.
    pub api_key: String,
    /// API secret used to sign requests.
    pub api_secret: String,
    /// Trading environment.
    pub environment: BinanceEnvironment,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Milliseconds a signed request stays valid after its timestamp.
    pub recv_window_ms: u64,
    futures_base_url: Option<String>,
    spot_base_url: Option<String>,
}

impl BinanceConfig {
    /// Create a new configuration.
    #[must_use]
    pub fn new(api_key: String, api_secret: String, environment: BinanceEnvironment) -> Self {
        Self {
            api_key,
            api_secret,
            environment,
            timeout: Duration::from_secs(10),
            recv_window_ms: 5000,
            futures_base_url: None,
            spot_base_url: None,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the receive window.
    #[must_use]
    pub const fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window_ms = recv_window_ms;
        self
    }

    /// Point both APIs at custom hosts instead of the environment's.
    #[must_use]
    pub fn with_base_urls(mut self, futures: impl Into<String>, spot: impl Into<String>) -> Self {
        self.futures_base_url = Some(futures.into());
        self.spot_base_url = Some(spot.into());
        self
    }

    /// Futures API base URL.
    #[must_use]
    pub fn futures_base_url(&self) -> &str {
        self.futures_base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.futures_base_url())
    }

    /// Spot API base URL.
    #[must_use]
    pub fn spot_base_url(&self) -> &str {
        self.spot_base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.spot_base_url())
    }
}

impl std::fmt::Debug for BinanceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceConfig")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .field("recv_window_ms", &self.recv_window_ms)
            .field("futures_base_url", &self.futures_base_url())
            .field("spot_base_url", &self.spot_base_url())
            .finish()
    }
}
