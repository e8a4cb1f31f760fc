use crate::core::cache::{CACHE_TTL, MAX_CACHE_SIZE};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Upstream fetches give up after this long.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClubApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DescriptionsConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub club_api: ClubApiConfig,
    pub descriptions: Option<DescriptionsConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_ttl_secs() -> u64 {
    CACHE_TTL.as_secs()
}

fn default_max_entries() -> usize {
    MAX_CACHE_SIZE
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "clubfin", "clubfin")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let yaml_str = r#"
providers:
  club_api:
    base_url: "http://localhost:8000/api/v1"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.club_api.base_url,
            "http://localhost:8000/api/v1"
        );
        assert!(config.providers.descriptions.is_none());
        assert_eq!(config.cache, CacheConfig::default());
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert_eq!(config.cache.max_entries, 50);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_full_config() {
        let yaml_str = r#"
providers:
  club_api:
    base_url: "http://example.com/api"
  descriptions:
    base_url: "http://example.com/cms"
cache:
  ttl_secs: 60
request_timeout_secs: 5
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(
            config.providers.descriptions.unwrap().base_url,
            "http://example.com/cms"
        );
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.cache.max_entries, 50);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_missing_club_api_is_an_error() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("providers: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_missing_path_fails_with_context() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = AppConfig::load_from_path(dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
