use std::path::PathBuf;

use directories::ProjectDirs;
use eyre::Result;
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: get_default_data_dir()
                .join("favorites")
                .to_string_lossy()
                .to_string(),
        }
    }
}

impl Config {
    pub fn get_config_path() -> PathBuf {
        get_default_config_dir().join("config.json")
    }

    pub async fn load() -> Result<Self> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save().await?;
            return Ok(default_config);
        }

        let content = fs::read_to_string(&config_path).await?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub async fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path();

        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content).await?;
        Ok(())
    }

    /// The directory the favorites file lives in.
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.path)
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["storage", "path"] => {
                self.storage.path = value.to_string();
            }
            _ => {
                return Err(eyre::eyre!("Unknown configuration key: {}", key));
            }
        }

        Ok(())
    }

    pub fn get_value(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();

        let value = match parts.as_slice() {
            ["storage", "path"] => self.storage.path.clone(),
            _ => {
                return Err(eyre::eyre!("Unknown configuration key: {}", key));
            }
        };

        Ok(value)
    }

    pub fn show_all(&self) -> String {
        format!(
            "Configuration:\n\
             Storage:\n\
             └─ path: {}",
            self.storage.path
        )
    }

    pub async fn reset() -> Result<Self> {
        let config = Self::default();
        config.save().await?;
        Ok(config)
    }
}

/// Get the default configuration directory
fn get_default_config_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "bookfinder", "bookfinder") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        // Fallback to current directory if we can't determine project dirs
        PathBuf::from(".bookfinder").join("config")
    }
}

/// Get the default data directory
pub fn get_default_data_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("org", "bookfinder", "bookfinder") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        // Fallback to current directory if we can't determine project dirs
        PathBuf::from(".bookfinder").join("data")
    }
}
