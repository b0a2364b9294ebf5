use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Bootstrap settings.
///
/// ```toml
/// mount_point = "#app"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Selector of the host element, `#id` or a bare `id`.
    pub mount_point: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            mount_point: "#app".to_string(),
        }
    }
}

impl BootstrapConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BootstrapConfig =
            toml::from_str(content).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `BootstrapConfig::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "No bootstrap config, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Checks that the mount point names an element id.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.element_id().is_none() {
            return Err(ConfigError::Validation {
                message: format!("mount_point '{}' is not an element id", self.mount_point),
            });
        }
        Ok(())
    }

    /// The element id with any leading `#` stripped.
    pub fn element_id(&self) -> Option<&str> {
        element_id(&self.mount_point)
    }
}

pub(crate) fn element_id(selector: &str) -> Option<&str> {
    let selector = selector.trim();
    let id = selector.strip_prefix('#').unwrap_or(selector);
    if id.is_empty() || id.chars().any(|c| c.is_whitespace() || c == '#') {
        None
    } else {
        Some(id)
    }
}
