use crate::entities::Sensitive;
use crate::error::{ClientError, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// proxy6 API key.
    pub key: Sensitive<String>,
}

impl Config {
    /// Load config from a JSON file, or TOML when the extension is `.toml`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::general(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
        let parsed: std::result::Result<Self, String> = if is_toml {
            toml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|e| {
            ClientError::general(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
