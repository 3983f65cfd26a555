use crate::constants::DEFAULT_USERS_ENDPOINT;
use crate::error::{Result, ScrubError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_endpoint() -> String {
    DEFAULT_USERS_ENDPOINT.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file; with no path, defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => return Ok(Self::default()),
        };
        let content = fs::read_to_string(path).map_err(|e| {
            ScrubError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enrichment_section_and_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [enrichment]
            endpoint = "http://localhost:9999/users"
            "#,
        )
        .unwrap();
        assert_eq!(config.enrichment.endpoint, "http://localhost:9999/users");
        assert_eq!(config.enrichment.timeout_seconds, 10);
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.enrichment.endpoint, DEFAULT_USERS_ENDPOINT);
    }
}
