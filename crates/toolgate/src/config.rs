//! 策略配置加载
//!
//! Reads a [`PolicyConfig`] from JSON or YAML. The format is picked from the
//! file extension (`.json`, `.yaml`, `.yml`).

use std::path::Path;

use tracing::debug;

use crate::policy::PolicyConfig;

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Errors raised while loading a policy configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Parse a policy configuration from text
pub fn parse_policy_config(text: &str, format: ConfigFormat) -> Result<PolicyConfig, ConfigError> {
    let config = match format {
        ConfigFormat::Json => serde_json::from_str(text)?,
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(config)
}

/// Load a policy configuration from a file
pub fn load_policy_config(path: impl AsRef<Path>) -> Result<PolicyConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let config = parse_policy_config(&content, format)?;

    debug!(path = %path.display(), ?format, "Loaded tool policy config");
    Ok(config)
}
