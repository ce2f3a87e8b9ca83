//! Symbol value object for exchange trading pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::ValidationError;

/// Quote assets recognised as the suffix of a pair name.
///
/// Longer suffixes come first so `FDUSD` wins over `USD`.
const QUOTE_ASSETS: &[&str] = &[
    "FDUSD", "USDT", "BUSD", "USDC", "TUSD", "BTC", "ETH", "BNB", "USD",
];

/// Longest symbol the exchange lists.
const MAX_SYMBOL_LEN: usize = 20;

/// A validated trading pair symbol (e.g. "BTCUSDT").
///
/// Unlike a ticker, the symbol is never normalized: lowercase input is
/// rejected rather than silently upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and validate a symbol.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidSymbol` if the symbol is empty,
    /// contains anything but uppercase ASCII letters and digits, or does not
    /// end in a known quote asset with a non-empty base.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidSymbol {
            symbol: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(invalid("symbol cannot be empty"));
        }

        if value.len() > MAX_SYMBOL_LEN {
            return Err(invalid("symbol exceeds maximum length"));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return Err(invalid("symbol must be uppercase alphanumeric"));
        }

        if split_pair(value).is_none() {
            return Err(invalid("symbol must be a BASEQUOTE pair such as BTCUSDT"));
        }

        Ok(Self(value.to_string()))
    }

    /// Get the symbol string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn split_pair(value: &str) -> Option<(&str, &str)> {
    QUOTE_ASSETS.iter().find_map(|quote| {
        value
            .strip_suffix(quote)
            .filter(|base| !base.is_empty())
            .map(|base| (base, &value[base.len()..]))
    })
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
