//! Configuration types.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Templating options passed explicitly into the plan templater.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanConfig {
    /// Adds the struggle-linked step to each day and switches the plan
    /// version tag.
    pub multi_agent: bool,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind: IpAddr,
    /// HTTP port.
    pub port: u16,
    /// Plan templating options.
    pub plan: PlanConfig,
    /// libSQL database file. In-memory storage is used when unset.
    pub db_path: Option<PathBuf>,
    /// Directory for rolling log files. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            plan: PlanConfig::default(),
            db_path: None,
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PATHFINDER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PATHFINDER_PORT".to_string(),
                message: format!("{raw:?} is not a valid port: {e}"),
            })?,
            None => defaults.port,
        };

        let bind = match non_empty("PATHFINDER_BIND") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| ConfigError::InvalidValue {
                key: "PATHFINDER_BIND".to_string(),
                message: format!("{raw:?} is not a valid address: {e}"),
            })?,
            None => defaults.bind,
        };

        let multi_agent = match non_empty("PATHFINDER_MULTI_AGENT") {
            Some(raw) => parse_bool("PATHFINDER_MULTI_AGENT", &raw)?,
            None => false,
        };

        Ok(Self {
            bind,
            port,
            plan: PlanConfig { multi_agent },
            db_path: non_empty("PATHFINDER_DB_PATH").map(PathBuf::from),
            log_dir: non_empty("PATHFINDER_LOG_DIR").map(PathBuf::from),
        })
    }

    /// Socket address for the HTTP listener.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(!config.plan.multi_agent);
        assert!(config.db_path.is_none());
        assert!(config.log_dir.is_none());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_all_keys() {
        let config = config_from(&[
            ("PATHFINDER_PORT", "9191"),
            ("PATHFINDER_BIND", "127.0.0.1"),
            ("PATHFINDER_MULTI_AGENT", "yes"),
            ("PATHFINDER_DB_PATH", "/tmp/pathfinder.db"),
            ("PATHFINDER_LOG_DIR", "/tmp/logs"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9191");
        assert!(config.plan.multi_agent);
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/pathfinder.db")));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PATHFINDER_PORT", "  "), ("PATHFINDER_DB_PATH", "")]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.db_path.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = config_from(&[("PATHFINDER_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PATHFINDER_PORT"));
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let err = config_from(&[("PATHFINDER_MULTI_AGENT", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("PATHFINDER_MULTI_AGENT"));
    }

    #[test]
    fn flag_accepts_common_spellings() {
        for raw in ["1", "TRUE", "On"] {
            assert!(config_from(&[("PATHFINDER_MULTI_AGENT", raw)]).unwrap().plan.multi_agent);
        }
        for raw in ["0", "false", "OFF", "no"] {
            assert!(!config_from(&[("PATHFINDER_MULTI_AGENT", raw)]).unwrap().plan.multi_agent);
        }
    }
}
