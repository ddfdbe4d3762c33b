use serde::Deserialize;
use std::env;

use crate::confirmation::DEFAULT_PREFIX;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// Load the demo catalog when the store is built.
    pub seed_sample_flights: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BookingConfig {
    /// Two-letter marker in front of every confirmation code.
    pub confirmation_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            store: StoreConfig {
                seed_sample_flights: true,
            },
            booking: BookingConfig {
                confirmation_prefix: DEFAULT_PREFIX.to_string(),
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let defaults = Config::default();

        let s = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("store.seed_sample_flights", defaults.store.seed_sample_flights)?
            .set_default("booking.confirmation_prefix", defaults.booking.confirmation_prefix)?
            .add_source(config::File::with_name("config/default").required(false))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Developer-local file, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYWAY__SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("SKYWAY").separator("__"))
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let prefix = &self.booking.confirmation_prefix;
        if prefix.len() != 2 || !prefix.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(config::ConfigError::Message(format!(
                "booking.confirmation_prefix must be two uppercase letters, got `{}`",
                prefix
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.booking.confirmation_prefix, "FL");
        assert!(config.store.seed_sample_flights);
    }

    #[test]
    fn test_rejects_bad_prefix() {
        let mut config = Config::default();
        for bad in ["F", "fl", "FL1", "F1"] {
            config.booking.confirmation_prefix = bad.to_string();
            assert!(config.validate().is_err(), "prefix {bad} should be rejected");
        }
    }
}
