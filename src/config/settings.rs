/// Application configuration structures

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub source: Source,
    pub services: Services,
    pub dashboard: Dashboard,
    pub wallet: Wallet,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Source {
    /// JSON body of the latest `allPassports` response
    pub snapshot_path: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Services {
    pub mint_url: String,
    pub oracle_url: String,
    pub chain_id: String,
    pub application_id: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Dashboard {
    pub poll_interval_secs: u64,
    pub refresh_delay_ms: u64,
    pub leaderboard_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Wallet {
    pub store_path: String,
    pub default_address: String,
}

impl Default for Source {
    fn default() -> Self {
        Self {
            snapshot_path: "data/passports.json".to_string(),
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self {
            mint_url: "http://localhost:8082/mint".to_string(),
            oracle_url: "http://localhost:8081/analyze".to_string(),
            chain_id: String::new(),
            application_id: String::new(),
            request_timeout_secs: 30,
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            refresh_delay_ms: 2000,
            leaderboard_size: 5,
        }
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            store_path: "wallets/session.json".to_string(),
            default_address: String::new(),
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load_from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid("dashboard.poll_interval_secs must be positive".into()));
        }
        if self.dashboard.leaderboard_size == 0 {
            return Err(ConfigError::Invalid("dashboard.leaderboard_size must be positive".into()));
        }
        if self.services.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid("services.request_timeout_secs must be positive".into()));
        }
        for (name, value) in [
            ("services.mint_url", &self.services.mint_url),
            ("services.oracle_url", &self.services.oracle_url),
        ] {
            Url::parse(value).map_err(|e| ConfigError::Invalid(format!("{} ({}): {}", name, value, e)))?;
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.dashboard.poll_interval_secs)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.dashboard.refresh_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.services.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.refresh_delay(), Duration::from_millis(2000));
        assert_eq!(config.dashboard.leaderboard_size, 5);
        assert!(AppConfig::load(None).is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[dashboard]
poll_interval_secs = 10

[wallet]
default_address = "0xabc"
"#
        )
        .unwrap();

        let config = AppConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.dashboard.poll_interval_secs, 10);
        assert_eq!(config.dashboard.leaderboard_size, 5);
        assert_eq!(config.wallet.default_address, "0xabc");
        assert_eq!(config.services.mint_url, "http://localhost:8082/mint");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = AppConfig::default();
        config.dashboard.poll_interval_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.services.oracle_url = "not a url".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dashboard\npoll_interval_secs = ").unwrap();
        assert!(matches!(AppConfig::load_from_file(file.path()), Err(ConfigError::Toml(_))));
    }
}
