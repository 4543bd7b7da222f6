use std::net::SocketAddr;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POLYGON_BASE_URL: &str = "https://api.polygon.io";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid HOST/PORT: {0}")]
    InvalidAddr(String),
    #[error("invalid POLYGON_BASE_URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },
    #[error("invalid POLYGON_TIMEOUT_SECS '{0}': expected a positive integer")]
    InvalidTimeout(String),
    #[error("invalid LOG_TZ '{0}': expected an IANA time zone name")]
    InvalidTimezone(String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PolygonConfig {
    /// `None` when the credential is unset or blank. The server still starts;
    /// every lookup then fails with the configuration error.
    pub api_key: Option<String>,
    pub base_url: Url,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub polygon: PolygonConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            server: ServerConfig::from_lookup(&lookup)?,
            polygon: PolygonConfig::from_lookup(&lookup)?,
        })
    }
}

impl ServerConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidAddr(format!("{}:{}", host, raw)))?,
            None => DEFAULT_PORT,
        };
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(format!("{}:{}", host, port)))?;

        let allowed_origins: Vec<String> = lookup("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        let allowed_origins = if allowed_origins.is_empty() {
            DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()
        } else {
            allowed_origins
        };

        Ok(Self {
            addr,
            allowed_origins,
        })
    }
}

impl PolygonConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("POLYGON_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let raw_url =
            lookup("POLYGON_BASE_URL").unwrap_or_else(|| DEFAULT_POLYGON_BASE_URL.to_string());
        let base_url = Url::parse(raw_url.trim()).map_err(|err| ConfigError::InvalidBaseUrl {
            value: raw_url.clone(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                value: raw_url,
                reason: "not a base URL".to_string(),
            });
        }

        let timeout_secs = match lookup("POLYGON_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.server.addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(cfg.server.allowed_origins, vec!["http://localhost:3000"]);
        assert!(cfg.polygon.api_key.is_none());
        assert_eq!(cfg.polygon.base_url.as_str(), "https://api.polygon.io/");
        assert_eq!(cfg.polygon.timeout, Duration::from_secs(15));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = load(&[("POLYGON_API_KEY", "   ")]).unwrap();
        assert!(cfg.polygon.api_key.is_none());

        let cfg = load(&[("POLYGON_API_KEY", "abc123")]).unwrap();
        assert_eq!(cfg.polygon.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn port_and_origins_are_read() {
        let cfg = load(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("ALLOWED_ORIGINS", "http://a.test, ,http://b.test"),
        ])
        .unwrap();
        assert_eq!(cfg.server.addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(
            cfg.server.allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            load(&[("PORT", "not-a-port")]),
            Err(ConfigError::InvalidAddr(_))
        ));
        assert!(matches!(
            load(&[("POLYGON_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            load(&[("POLYGON_BASE_URL", "not a url")]),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }
}
