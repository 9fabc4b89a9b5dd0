//! Where the users service lives.

use crate::error::ConfigError;

pub const HOST_VAR: &str = "USERS_API_HOST";
pub const PORT_VAR: &str = "USERS_API_PORT";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 8080;

/// Fixed host and port of the backend. Nothing is discovered at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ConfigError> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        Ok(Self { host, port })
    }

    /// Read `USERS_API_HOST` and `USERS_API_PORT`, falling back to
    /// `localhost:8080` for whichever is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(None, None)
    }

    /// Like `from_env`, but an explicit `host` or `port` wins and its
    /// variable is never read.
    pub fn from_env_with(host: Option<String>, port: Option<u16>) -> Result<Self, ConfigError> {
        Self::resolve(host, port, |var| std::env::var(var).ok())
    }

    fn resolve(
        host: Option<String>,
        port: Option<u16>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = match host {
            Some(host) => host,
            None => lookup(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string()),
        };
        let port = match port {
            Some(port) => port,
            None => match lookup(PORT_VAR) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|source| ConfigError::InvalidPort {
                        var: PORT_VAR,
                        value,
                        source,
                    })?,
                None => DEFAULT_PORT,
            },
        };
        Self::new(host, port)
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_to_localhost_8080() {
        let config = ClientConfig::resolve(None, None, lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn reads_host_and_port() {
        let config = ClientConfig::resolve(
            None,
            None,
            lookup(&[(HOST_VAR, "api.internal"), (PORT_VAR, "9000")]),
        )
        .unwrap();
        assert_eq!(config.base_url(), "http://api.internal:9000");
    }

    #[test]
    fn rejects_bad_port() {
        let err = ClientConfig::resolve(None, None, lookup(&[(PORT_VAR, "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { value, .. } if value == "eighty"));
    }

    #[test]
    fn rejects_empty_host() {
        let err = ClientConfig::resolve(None, None, lookup(&[(HOST_VAR, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyHost));
    }

    #[test]
    fn explicit_values_skip_broken_environment() {
        let env = lookup(&[(HOST_VAR, " "), (PORT_VAR, "eighty")]);
        let config = ClientConfig::resolve(Some("api.internal".to_string()), Some(9000), env).unwrap();
        assert_eq!(config.base_url(), "http://api.internal:9000");
    }

    #[test]
    fn explicit_port_keeps_host_from_environment() {
        let env = lookup(&[(HOST_VAR, "db.internal"), (PORT_VAR, "eighty")]);
        let config = ClientConfig::resolve(None, Some(7000), env).unwrap();
        assert_eq!(config.base_url(), "http://db.internal:7000");
    }
}
