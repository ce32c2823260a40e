use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_OPENSKY_BASE_URL: &str = "https://opensky-network.org/api";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub opensky_base_url: String,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Only the summary action needs it; fetching works without a key.
    pub openai_api_key: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = var("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            opensky_base_url: trim_base(var("OPENSKY_BASE_URL").unwrap_or_else(|| DEFAULT_OPENSKY_BASE_URL.to_string())),
            openai_base_url: trim_base(var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_api_key: var("OPENAI_API_KEY"),
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.server_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.opensky_base_url, DEFAULT_OPENSKY_BASE_URL);
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.openai_model, DEFAULT_OPENAI_MODEL);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("OPENSKY_BASE_URL", "http://localhost:9000/api/"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o-mini"),
        ]))
        .unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.opensky_base_url, "http://localhost:9000/api");
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai_model, "gpt-4o-mini");
    }

    #[test]
    fn blank_key_is_treated_as_missing() {
        let config = Config::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap();
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn invalid_port_and_host() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PORT", "http")])),
            Err(AppError::ConfigError(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("HOST", "localhost:1")])),
            Err(AppError::ConfigError(_))
        ));
    }
}
