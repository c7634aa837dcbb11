use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    value: String,
    reason: String,
}

pub struct Config {
    pub host: String,
    pub port: u16,
    pub token_ttl_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            host: try_load("HOST", "127.0.0.1")?,
            port: try_load("PORT", "3000")?,
            token_ttl_secs: try_load("TOKEN_TTL_SECS", "86400")?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET: &str = "MOCK_SERVER_CONFIG_TEST_NEVER_SET";

    #[test]
    fn unset_key_falls_back_to_default() {
        let port: u16 = try_load(UNSET, "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn unparsable_value_is_reported() {
        let msg = try_load::<u16>(UNSET, "http").unwrap_err().to_string();
        assert!(msg.starts_with("invalid MOCK_SERVER_CONFIG_TEST_NEVER_SET value \"http\""), "{msg}");
    }

    #[test]
    fn address_joins_host_and_port() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 8080,
            token_ttl_secs: 60,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.token_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn default_token_lifetime_is_one_day() {
        let secs: u64 = try_load(UNSET, "86400").unwrap();
        assert_eq!(Duration::from_secs(secs), crate::DEFAULT_TOKEN_TTL);
    }
}
