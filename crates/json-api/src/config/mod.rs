//! Server configuration module

use clap::Parser;

use crate::config::{
    checkout::CheckoutConfig, db::DatabaseConfig, observability::LoggingConfig,
    server::ListenConfig,
};

pub(crate) mod checkout;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Brewline JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "brewline-json", about = "Brewline JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Pricing and order workflow settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use brewline::promotions::PromoPolicy;
    use rust_decimal_macros::dec;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_without_arguments() -> TestResult {
        let config = ServerConfig::try_parse_from(["brewline-json"])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.logging.slow_request_threshold_ms, 1_000);
        assert_eq!(config.server.shutdown_grace().as_secs(), 10);

        let settings = config.checkout.settings();

        assert_eq!(settings.pricing.tax_rate, dec!(0.08));
        assert_eq!(settings.promo_policy, PromoPolicy::Lenient);

        Ok(())
    }

    #[test]
    fn strict_promo_policy_can_be_selected() -> TestResult {
        let config = ServerConfig::try_parse_from(["brewline-json", "--promo-policy", "strict"])?;

        assert_eq!(config.checkout.settings().promo_policy, PromoPolicy::Strict);

        Ok(())
    }
}
