use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub model: String,
    /// API key for the classification service. Falls back to the
    /// `GEMINI_API_KEY` environment variable when unset.
    pub api_key: Option<String>,
    /// Request timeout in seconds; a timed-out call is a classification
    /// failure.
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl ClassifierConfig {
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var("GEMINI_API_KEY")
            .context("No API key: set classifier.api_key in the config or GEMINI_API_KEY")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "crosswise", "crosswise")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("com", "crosswise", "crosswise")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
classifier:
  base_url: "http://localhost:8080"
  model: "gemini-1.5-flash"
  api_key: "k-123"
  timeout_secs: 10
data_path: "/tmp/crosswise-data"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.classifier.base_url, "http://localhost:8080");
        assert_eq!(config.classifier.api_key.as_deref(), Some("k-123"));
        assert_eq!(config.classifier.timeout_secs, 10);
        assert_eq!(config.data_path.as_deref(), Some("/tmp/crosswise-data"));
    }

    #[test]
    fn test_classifier_block_is_optional() {
        let config: AppConfig = serde_yaml::from_str("data_path: /tmp/x").unwrap();
        assert_eq!(
            config.classifier.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.classifier.timeout_secs, 30);
    }
}
