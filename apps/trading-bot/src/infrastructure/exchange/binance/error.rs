//! Binance-specific error types.

use thiserror::Error;

use crate::application::ports::ExchangeError;

/// Errors from the Binance adapter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BinanceError {
    /// Request did not produce a response.
    #[error("Network error: {0}")]
    Network(String),

    /// API returned an error status.
    #[error("API error {status} (code {code:?}): {message}")]
    Api {
        /// HTTP status.
        status: u16,
        /// Binance error code, when the body carried one.
        code: Option<i64>,
        /// Binance error message, or the raw body.
        message: String,
    },

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Missing credentials or unusable base URL.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Request signature could not be computed.
    #[error("Signing failed: {0}")]
    Signature(String),
}

impl From<BinanceError> for ExchangeError {
    fn from(err: BinanceError) -> Self {
        match err {
            BinanceError::Network(message) => Self::Transport { message },
            BinanceError::Api {
                status,
                code,
                message,
            } => Self::Api {
                status: Some(status),
                code,
                message,
            },
            BinanceError::JsonParse(message) => Self::Decode { message },
            BinanceError::InvalidConfig(message) | BinanceError::Signature(message) => {
                Self::Request { message }
            }
        }
    }
}

impl From<reqwest::Error> for BinanceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_error_is_transport() {
        let err: ExchangeError = BinanceError::Network("connection refused".to_string()).into();
        assert!(matches!(err, ExchangeError::Transport { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn api_error_keeps_status_and_code() {
        let err: ExchangeError = BinanceError::Api {
            status: 400,
            code: Some(-2019),
            message: "Margin is insufficient.".to_string(),
        }
        .into();

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.code(), Some(-2019));
        assert_eq!(err.message(), "Margin is insufficient.");
    }

    #[test]
    fn json_error_is_decode() {
        let err: ExchangeError = BinanceError::JsonParse("expected value".to_string()).into();
        assert!(matches!(err, ExchangeError::Decode { .. }));
    }

    #[test]
    fn local_failures_are_not_retryable() {
        let err: ExchangeError = BinanceError::Signature("bad key".to_string()).into();
        assert!(!err.is_retryable());
    }
}
