use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint returning the problem collection as a JSON array.
    pub api_url: String,
    /// When set, a payload containing an unrecognized `Difficult` value is
    /// rejected at load time instead of being warned about and kept.
    #[serde(default)]
    pub strict_difficulties: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config at {}", path.display()))?;
                let config: Config = toml::from_str(&contents)
                    .with_context(|| "Failed to parse config.toml")?;
                return Ok(config);
            }
        }

        let api_url = std::env::var("CODETRACK_API_URL")
            .with_context(|| "CODETRACK_API_URL not set. Create a config file or set the env var.")?;

        Ok(Self {
            api_url,
            strict_difficulties: false,
        })
    }

    pub fn generate_default() -> Result<PathBuf> {
        let path = Self::config_path()
            .with_context(|| "Could not determine config directory")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let default = Config {
            api_url: "https://example.com/api/code/data".into(),
            strict_difficulties: false,
        };

        let toml_str = toml::to_string_pretty(&default)?;
        std::fs::write(&path, toml_str)?;
        Ok(path)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("codetrack-tui").join("config.toml"))
    }
}
