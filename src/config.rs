use std::{env, net::SocketAddr};

use thiserror::Error;

const DEFAULT_MAIL_SERVER: &str = "localhost";
const DEFAULT_SERVICE_URI: &str = "https://%s/Microsoft-Server-ActiveSync";

#[derive(Debug, Clone)]
pub struct Config {
    pub mail_server: String,
    pub service_uri: String,
    pub bind_addr: String,
    pub bind_port: u16,
}

/// Values advertised to clients. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub mail_server: String,
    pub service_uri: String,
}

impl ServiceConfig {
    pub fn new(mail_server: impl Into<String>, service_uri: impl Into<String>) -> Self {
        Self {
            mail_server: mail_server.into(),
            service_uri: service_uri.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("AUTODISCOVER_SERVICE_URI must be an absolute http or https URI")]
    InvalidServiceUri,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mail_server = non_empty("AUTODISCOVER_MAIL_SERVER")
            .unwrap_or_else(|| DEFAULT_MAIL_SERVER.to_string());
        // A single `%s` stands for the mail server hostname.
        let service_uri = non_empty("AUTODISCOVER_SERVICE_URI")
            .unwrap_or_else(|| DEFAULT_SERVICE_URI.to_string())
            .replacen("%s", &mail_server, 1);
        if !(service_uri.starts_with("https://") || service_uri.starts_with("http://")) {
            return Err(ConfigError::InvalidServiceUri);
        }

        let bind_addr = non_empty("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());
        let bind_port = non_empty("BIND_PORT")
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(80);

        let config = Self {
            mail_server,
            service_uri,
            bind_addr,
            bind_port,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }

    pub fn service(&self) -> ServiceConfig {
        ServiceConfig::new(self.mail_server.clone(), self.service_uri.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn parse_defaults() {
        let config = load(&[]).expect("config should parse");
        assert_eq!(config.mail_server, "localhost");
        assert_eq!(
            config.service_uri,
            "https://localhost/Microsoft-Server-ActiveSync"
        );
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.bind_port, 80);
    }

    #[test]
    fn service_uri_placeholder_uses_mail_server() {
        let config = load(&[("AUTODISCOVER_MAIL_SERVER", " mail.example.com ")])
            .expect("config should parse");
        assert_eq!(config.mail_server, "mail.example.com");
        assert_eq!(
            config.service().service_uri,
            "https://mail.example.com/Microsoft-Server-ActiveSync"
        );
    }

    #[test]
    fn explicit_service_uri_is_kept() {
        let config = load(&[
            ("AUTODISCOVER_MAIL_SERVER", "mail.example.com"),
            ("AUTODISCOVER_SERVICE_URI", "https://sync.example.com/eas"),
        ])
        .expect("config should parse");
        assert_eq!(
            config.service(),
            ServiceConfig::new("mail.example.com", "https://sync.example.com/eas")
        );
    }

    #[test]
    fn relative_service_uri_fails() {
        let err = load(&[("AUTODISCOVER_SERVICE_URI", "/Microsoft-Server-ActiveSync")])
            .expect_err("expected service uri error");
        assert!(matches!(err, ConfigError::InvalidServiceUri));
    }

    #[test]
    fn invalid_port_fails() {
        let err = load(&[("BIND_PORT", "http")]).expect_err("expected invalid port error");
        assert!(matches!(err, ConfigError::InvalidPort));
    }

    #[test]
    fn invalid_bind_addr_fails() {
        let err = load(&[("BIND_ADDR", "not an address")]).expect_err("expected socket error");
        assert!(matches!(err, ConfigError::InvalidSocket));
    }
}
