//! Configuration module for wldrop-server.
//!
//! Handles loading configuration from the TOML file, CLI arguments and
//! environment variables.

pub mod file;

use crate::config::file::{DropsConfig, FileConfig, GatewayConfig};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use wldrop_core::config::DropPolicy;
use wldrop_core::drops::UserId;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("DATABASE_URL environment variable not set")]
    MissingDatabaseUrl,
}

/// Fully validated configuration.
pub struct LoadedConfig {
    pub listen: SocketAddr,
    pub service_secret: Box<[u8]>,
    pub gateway: GatewayConfig,
    pub policy: DropPolicy,
}

/// Reads and validates the config file. Reused on every SIGHUP.
pub struct ConfigLoader {
    config_path: std::path::PathBuf,
    listen_override: Option<SocketAddr>,
}

impl ConfigLoader {
    pub fn new(config_path: impl AsRef<Path>, listen_override: Option<SocketAddr>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            listen_override,
        }
    }

    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let config_content = std::fs::read_to_string(&self.config_path)?;
        parse_config(&config_content, self.listen_override)
    }
}

/// Parse and validate a config document.
pub fn parse_config(
    content: &str,
    listen_override: Option<SocketAddr>,
) -> Result<LoadedConfig, ConfigError> {
    let mut file_config: FileConfig = toml::from_str(content)?;
    if let Some(listen) = listen_override {
        file_config.server.listen = listen;
    }
    validate(&file_config)?;

    Ok(LoadedConfig {
        listen: file_config.server.listen,
        service_secret: file_config.service.secret.into_bytes().into_boxed_slice(),
        policy: drop_policy(file_config.drops),
        gateway: file_config.gateway,
    })
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    if config.service.secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "service.secret must not be empty".to_string(),
        ));
    }
    if config.gateway.secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "gateway.secret must not be empty".to_string(),
        ));
    }
    if config.gateway.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "gateway.timeout_secs must be positive".to_string(),
        ));
    }
    if config.drops.default_duration_hours == 0 {
        return Err(ConfigError::ValidationError(
            "drops.default_duration_hours must be positive".to_string(),
        ));
    }
    if config.drops.max_winner_count == 0 {
        return Err(ConfigError::ValidationError(
            "drops.max_winner_count must be positive".to_string(),
        ));
    }
    Ok(())
}

fn drop_policy(drops: DropsConfig) -> DropPolicy {
    DropPolicy {
        default_duration: time::Duration::hours(i64::from(drops.default_duration_hours)),
        max_winner_count: drops.max_winner_count,
        banlist: drops.banlist.into_iter().map(UserId::from).collect(),
    }
}

/// Get the database URL from the environment.
pub fn get_database_url() -> Result<String, ConfigError> {
    std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[service]
secret = "service-secret"

[gateway]
base_url = "http://localhost:9000"
secret = "gateway-secret"

[drops]
banlist = ["666"]
"#;

    #[test]
    fn test_policy_from_config() {
        let loaded = parse_config(CONFIG, None).unwrap();
        assert_eq!(loaded.policy.default_duration, time::Duration::hours(1));
        assert_eq!(loaded.policy.max_winner_count, 50);
        assert!(loaded.policy.is_banned(&UserId::from("666")));
        assert_eq!(&*loaded.service_secret, b"service-secret");
    }

    #[test]
    fn test_listen_override() {
        let listen: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        let loaded = parse_config(CONFIG, Some(listen)).unwrap();
        assert_eq!(loaded.listen, listen);
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = CONFIG.replace("service-secret", "");
        assert!(matches!(
            parse_config(&config, None),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
