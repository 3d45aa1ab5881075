use crate::shared::api_utils::{api_base, join_url};
use contracts::system::health::HEALTH_PATH;
use contracts::usecases::u508_import_csv::{IMPORT_PATH, PREVIEW_PATH};
use serde::Deserialize;

/// localStorage key holding TOML overrides of the embedded configuration
pub const CONFIG_STORAGE_KEY: &str = "ingest_config";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub ingest: IngestConfig,
}

/// Where the ingestion service lives
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Port on the page's host, used when `base_url` is not set
    #[serde(default = "default_port")]
    pub port: u16,

    /// Full origin of the service, e.g. "https://ingest.example.com"
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_preview_path")]
    pub preview_path: String,

    #[serde(default = "default_import_path")]
    pub import_path: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,
}

fn default_port() -> u16 {
    3000
}

fn default_preview_path() -> String {
    PREVIEW_PATH.to_string()
}

fn default_import_path() -> String {
    IMPORT_PATH.to_string()
}

fn default_health_path() -> String {
    HEALTH_PATH.to_string()
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[ingest]
port = 3000
"#;

impl IngestConfig {
    pub fn base_url(&self) -> String {
        match &self.base_url {
            Some(base) if !base.is_empty() => base.clone(),
            _ => api_base(self.port),
        }
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url(), path)
    }
}

pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

/// Load configuration
///
/// Search order:
/// 1. `overrides` (TOML text), when present and valid
/// 2. Falls back to embedded default config
pub fn load_config(overrides: Option<&str>) -> Config {
    if let Some(contents) = overrides {
        match parse_config(contents) {
            Ok(config) => {
                log::info!("Using ingest config overrides");
                return config;
            }
            Err(e) => log::warn!("Invalid ingest config overrides, using defaults: {}", e),
        }
    }

    match parse_config(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Embedded config is invalid: {}", e);
            Config {
                ingest: IngestConfig {
                    port: default_port(),
                    base_url: None,
                    preview_path: default_preview_path(),
                    import_path: default_import_path(),
                    health_path: default_health_path(),
                },
            }
        }
    }
}

/// Overrides saved in localStorage under `CONFIG_STORAGE_KEY`
pub fn stored_overrides() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.ingest.port, 3000);
        assert_eq!(config.ingest.base_url, None);
        assert_eq!(config.ingest.preview_path, "/api/preview_csv");
        assert_eq!(config.ingest.import_path, "/api/import_csv");
        assert_eq!(config.ingest.health_path, "/healthz");
    }

    #[test]
    fn test_overrides() {
        let config = load_config(Some(
            r#"
[ingest]
base_url = "https://ingest.example.com"
import_path = "/v2/import_csv"
"#,
        ));
        assert_eq!(config.ingest.port, 3000);
        assert_eq!(
            config.ingest.url(&config.ingest.import_path),
            "https://ingest.example.com/v2/import_csv"
        );
        assert_eq!(
            config.ingest.url(&config.ingest.preview_path),
            "https://ingest.example.com/api/preview_csv"
        );
    }

    #[test]
    fn test_invalid_overrides_fall_back_to_default() {
        let config = load_config(Some("[ingest]\nport = \"not a number\""));
        assert_eq!(config, parse_config(DEFAULT_CONFIG).unwrap());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(parse_config("port = 3000").is_err());
    }
}
