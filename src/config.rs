use serde::Deserialize;

use crate::catalog::CategoryCatalog;
use crate::{AppError, Result};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    // Checked per request, not at startup
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_api_base")]
    pub gemini_api_base: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default = "default_max_request_body")]
    pub max_request_body_mb: u64,

    // Comma-separated override for the clinic catalog
    pub clinic_categories: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_max_request_body() -> u64 {
    32
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_api_base: default_gemini_api_base(),
            static_dir: default_static_dir(),
            max_request_body_mb: default_max_request_body(),
            clinic_categories: None,
        }
    }
}

impl Config {
    pub fn from_env() -> std::result::Result<Self, envy::Error> {
        envy::from_env()
    }

    /// The Gemini credential, or a configuration error when it is unset or blank.
    pub fn api_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(AppError::missing_api_key)
    }

    pub fn max_request_body_bytes(&self) -> usize {
        (self.max_request_body_mb * 1024 * 1024) as usize
    }

    pub fn index_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.static_dir).join("index.html")
    }

    pub fn catalog(&self) -> CategoryCatalog {
        self.clinic_categories
            .as_deref()
            .and_then(CategoryCatalog::parse)
            .unwrap_or_default()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_missing_or_blank() {
        let mut config = Config::default();
        assert!(matches!(config.api_key(), Err(AppError::Configuration(_))));

        config.gemini_api_key = Some("   ".into());
        assert!(matches!(config.api_key(), Err(AppError::Configuration(_))));

        config.gemini_api_key = Some("secret".into());
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.max_request_body_bytes(), 32 * 1024 * 1024);
        assert_eq!(config.index_path(), std::path::Path::new("static/index.html"));
        assert_eq!(config.catalog(), CategoryCatalog::default());
    }

    #[test]
    fn test_catalog_override() {
        let config = Config {
            clinic_categories: Some("القلب, الصدر".into()),
            ..Config::default()
        };
        assert_eq!(config.catalog().ids(), ["القلب", "الصدر"]);
    }

    #[test]
    fn test_from_env_iter() {
        let config: Config = envy::from_iter(vec![
            ("PORT".to_string(), "9000".to_string()),
            ("GEMINI_API_KEY".to_string(), "k".to_string()),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.gemini_api_key.as_deref(), Some("k"));
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
    }
}
