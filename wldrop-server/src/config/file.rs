//! TOML file configuration structures.
//!
//! These structs directly map to the `wldrop-config.toml` file format.

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub service: ServiceConfig,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub drops: DropsConfig,
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The address and port to listen on (e.g., "0.0.0.0:8080").
    #[serde(default = "default_listen_addr")]
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen_addr(),
        }
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

/// Credentials of the command layer calling the service API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Secret for verifying request signatures.
    pub secret: String,
}

/// Chat gateway endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub base_url: url::Url,
    /// Secret for signing requests to the gateway.
    pub secret: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Drop policy section. Reloaded on SIGHUP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropsConfig {
    #[serde(default = "default_duration_hours")]
    pub default_duration_hours: u32,
    #[serde(default = "default_max_winner_count")]
    pub max_winner_count: u32,
    /// User ids whose entries are always refused.
    #[serde(default)]
    pub banlist: Vec<String>,
}

impl Default for DropsConfig {
    fn default() -> Self {
        Self {
            default_duration_hours: default_duration_hours(),
            max_winner_count: default_max_winner_count(),
            banlist: Vec::new(),
        }
    }
}

fn default_duration_hours() -> u32 {
    1
}

fn default_max_winner_count() -> u32 {
    50
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[server]
listen = "127.0.0.1:3000"

[service]
secret = "service-secret"

[gateway]
base_url = "http://gateway.internal:9000"
secret = "gateway-secret"
timeout_secs = 5

[drops]
default_duration_hours = 2
max_winner_count = 20
banlist = ["1001", "1002"]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen.port(), 3000);
        assert_eq!(config.gateway.base_url.host_str(), Some("gateway.internal"));
        assert_eq!(config.gateway.timeout_secs, 5);
        assert_eq!(config.drops.default_duration_hours, 2);
        assert_eq!(config.drops.banlist, vec!["1001", "1002"]);
    }

    #[test]
    fn test_defaults_apply() {
        let toml_str = r#"
[service]
secret = "s"

[gateway]
base_url = "http://localhost:9000"
secret = "g"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen, default_listen_addr());
        assert_eq!(config.gateway.timeout_secs, 10);
        assert_eq!(config.drops.default_duration_hours, 1);
        assert_eq!(config.drops.max_winner_count, 50);
        assert!(config.drops.banlist.is_empty());
    }
}
