use crate::error::{DocScannerError, Result};
use doc_scanner_common::listing::DEFAULT_PLACEHOLDER_IMAGE;
use doc_scanner_common::retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_UPLOAD_ENDPOINT: &str = "http://127.0.0.1:8000/api/document/analyze/smart/";
pub const DEFAULT_LIST_ENDPOINT: &str = "http://127.0.0.1:8000/api/document/files/";

pub const UPLOAD_ENDPOINT_ENV: &str = "DOC_SCANNER_UPLOAD_ENDPOINT";
pub const LIST_ENDPOINT_ENV: &str = "DOC_SCANNER_LIST_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upload_endpoint: String,
    pub list_endpoint: String,
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub placeholder_image: String,
    /// Per-request timeout; no timeout when unset.
    pub timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Reads a config file, falling back to defaults when it does not exist.
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &std::path::Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DocScannerError::Config("diretório home não encontrado".into()))?;
        Ok(home.join(".config").join("doc-scanner").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.into(),
            list_endpoint: DEFAULT_LIST_ENDPOINT.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_ms: DEFAULT_BASE_DELAY.as_millis() as u64,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.into(),
            timeout_seconds: None,
        }
    }

    pub fn upload_endpoint(&self) -> String {
        // Environment takes precedence
        std::env::var(UPLOAD_ENDPOINT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.upload_endpoint.clone())
    }

    pub fn list_endpoint(&self) -> String {
        std::env::var(LIST_ENDPOINT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.list_endpoint.clone())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.filter(|secs| *secs > 0).map(Duration::from_secs)
    }

    pub fn set_upload_endpoint(&mut self, url: String) -> Result<()> {
        self.upload_endpoint = validate_url(url)?;
        self.save()
    }

    pub fn set_list_endpoint(&mut self, url: String) -> Result<()> {
        self.list_endpoint = validate_url(url)?;
        self.save()
    }
}

fn validate_url(url: String) -> Result<String> {
    let url = url.trim().to_string();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(DocScannerError::Config(format!(
            "URL inválida (esperado http:// ou https://): {}",
            url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.upload_endpoint, DEFAULT_UPLOAD_ENDPOINT);
        assert_eq!(config.list_endpoint, DEFAULT_LIST_ENDPOINT);
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            max_attempts: 5,
            base_delay_ms: 250,
            timeout_seconds: Some(30),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.timeout(), Some(Duration::from_secs(30)));
        assert_eq!(loaded.retry_policy().delays(), vec![
            Duration::from_millis(250),
            Duration::from_millis(500),
            Duration::from_millis(1000),
            Duration::from_millis(2000),
        ]);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "max_attempts": 1 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.list_endpoint, DEFAULT_LIST_ENDPOINT);
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://api.example.com/files/".into()).is_ok());
        assert!(matches!(
            validate_url("ftp://example.com".into()),
            Err(DocScannerError::Config(_))
        ));
    }
}
