//! Environment validation at startup.

use super::Config;

/// Errors from environment validation at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupValidationError {
    /// Missing required credentials for the environment.
    #[error("Missing required credentials for {environment} mode: {details}")]
    MissingCredentials {
        /// The trading environment.
        environment: String,
        /// Details about which credentials are missing.
        details: String,
    },
}

/// Result of startup environment validation.
#[derive(Debug)]
pub struct StartupValidation {
    /// Warning messages (non-fatal).
    pub warnings: Vec<String>,
}

/// Validate credentials before any exchange call.
///
/// Every command talks to the exchange, so both key and secret are always
/// required. LIVE mode passes with a warning.
///
/// # Errors
///
/// Returns `StartupValidationError::MissingCredentials` naming the
/// environment variables that are unset.
pub fn validate_startup_environment(
    config: &Config,
) -> Result<StartupValidation, StartupValidationError> {
    let exchange = &config.exchange;

    let mut missing = Vec::new();
    if exchange.api_key.is_empty() {
        missing.push("BINANCE_API_KEY");
    }
    if exchange.api_secret.is_empty() {
        missing.push("BINANCE_API_SECRET");
    }

    if !missing.is_empty() {
        return Err(StartupValidationError::MissingCredentials {
            environment: exchange.environment.to_string(),
            details: format!(
                "Required environment variables not set: {}. \
                 Set these in your environment, .env or config.yaml under exchange.",
                missing.join(", ")
            ),
        });
    }

    let mut warnings = Vec::new();
    if exchange.environment.is_live() {
        warnings.push("LIVE mode: orders will execute with real funds".to_string());
    }

    Ok(StartupValidation { warnings })
}
