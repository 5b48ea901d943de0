//! Application configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use auth::Latency;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the durable session entry
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,

    /// Keep the session in memory only (nothing survives a restart)
    #[serde(default)]
    pub in_memory_session: bool,

    /// Start with the demo requests and their clients
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,

    /// Simulated login round trip, in milliseconds
    #[serde(default = "default_login_latency")]
    pub login_latency_ms: u64,

    /// Simulated registration round trip, in milliseconds
    #[serde(default = "default_register_latency")]
    pub register_latency_ms: u64,

    /// Simulated profile update / deletion round trip, in milliseconds
    #[serde(default = "default_profile_latency")]
    pub profile_latency_ms: u64,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_session_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("ncservice"))
        .unwrap_or_else(|| PathBuf::from(".ncservice"))
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_login_latency() -> u64 {
    1000
}

fn default_register_latency() -> u64 {
    1500
}

fn default_profile_latency() -> u64 {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_dir: default_session_dir(),
            in_memory_session: false,
            seed_sample_data: default_seed_sample_data(),
            login_latency_ms: default_login_latency(),
            register_latency_ms: default_register_latency(),
            profile_latency_ms: default_profile_latency(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the optional config file, then the environment
    ///
    /// Environment variables take precedence over the file.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let mut config = match Self::find_config_file() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Override fields from `NCSERVICE_*` variables looked up through `var`
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("NCSERVICE_SESSION_DIR") {
            self.session_dir = PathBuf::from(dir);
        }

        if let Some(val) = var("NCSERVICE_IN_MEMORY_SESSION") {
            self.in_memory_session = parse_flag(&val);
        }

        if let Some(val) = var("NCSERVICE_SEED_SAMPLE_DATA") {
            self.seed_sample_data = parse_flag(&val);
        }

        if let Some(val) = var("NCSERVICE_LOGIN_LATENCY_MS") {
            self.login_latency_ms = parse_millis("NCSERVICE_LOGIN_LATENCY_MS", &val)?;
        }

        if let Some(val) = var("NCSERVICE_REGISTER_LATENCY_MS") {
            self.register_latency_ms = parse_millis("NCSERVICE_REGISTER_LATENCY_MS", &val)?;
        }

        if let Some(val) = var("NCSERVICE_PROFILE_LATENCY_MS") {
            self.profile_latency_ms = parse_millis("NCSERVICE_PROFILE_LATENCY_MS", &val)?;
        }

        if let Some(level) = var("NCSERVICE_LOG_LEVEL") {
            self.log_level = level;
        }

        Ok(())
    }

    /// Simulated round-trip durations for the auth store
    pub fn latency(&self) -> Latency {
        Latency {
            login: Duration::from_millis(self.login_latency_ms),
            register: Duration::from_millis(self.register_latency_ms),
            profile: Duration::from_millis(self.profile_latency_ms),
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        let locations = [
            PathBuf::from("ncservice.toml"),
            dirs::config_dir()
                .map(|p| p.join("ncservice").join("config.toml"))
                .unwrap_or_default(),
        ];

        locations.into_iter().find(|p| p.is_file())
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn parse_millis(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(!config.in_memory_session);
        assert!(config.seed_sample_data);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.latency(), Latency::default());
    }

    #[test]
    fn test_file_fills_missing_keys_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ncservice.toml");
        std::fs::write(&path, "login_latency_ms = 0\nseed_sample_data = false\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.login_latency_ms, 0);
        assert!(!config.seed_sample_data);
        assert_eq!(config.register_latency_ms, 1500);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ncservice.toml");
        std::fs::write(&path, "login_latency_ms = \"soon\"").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("NCSERVICE_SESSION_DIR", "/tmp/ncs"),
                ("NCSERVICE_IN_MEMORY_SESSION", "TRUE"),
                ("NCSERVICE_SEED_SAMPLE_DATA", "0"),
                ("NCSERVICE_PROFILE_LATENCY_MS", "250"),
                ("NCSERVICE_LOG_LEVEL", "debug"),
            ]))
            .unwrap();

        assert_eq!(config.session_dir, PathBuf::from("/tmp/ncs"));
        assert!(config.in_memory_session);
        assert!(!config.seed_sample_data);
        assert_eq!(config.latency().profile, Duration::from_millis(250));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_env_number() {
        let mut config = AppConfig::default();
        let result = config.apply_env(env(&[("NCSERVICE_LOGIN_LATENCY_MS", "fast")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "NCSERVICE_LOGIN_LATENCY_MS",
                ..
            })
        ));
    }
}
