use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::errors::AnalysisError;
use crate::summary::SummaryOptions;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: consts::SERVER_HOST.to_string(),
            port: consts::SERVER_PORT,
        }
    }
}

/// `api_key` holds the name of an environment variable; the loader swaps in
/// its value.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub model_name: String,
    pub api_url: String,
    pub api_key: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model_name: consts::DEFAULT_MODEL_NAME.to_string(),
            api_url: consts::DEFAULT_API_URL.to_string(),
            api_key: consts::DEFAULT_API_KEY_ENV.to_string(),
            temperature: None,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: consts::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub summary: SummaryOptions,
    pub limits: LimitsConfig,
}

pub trait ConfigLoader: Send + Sync {
    fn load_config(&self) -> Result<Config, AnalysisError>;
}

pub struct FileConfigLoader {
    path: PathBuf,
}

impl FileConfigLoader {
    pub fn new() -> Self {
        let path = std::env::var("CA_CONFIG_FILE").unwrap_or("./config.json".to_string());
        Self::with_path(path)
    }

    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader for FileConfigLoader {
    fn load_config(&self) -> Result<Config, AnalysisError> {
        let mut config: Config = if self.path.exists() {
            let config_str = std::fs::read_to_string(&self.path)?;
            serde_json::from_str(&config_str)?
        } else {
            log::warn!(
                "config file {} not found, using defaults",
                self.path.display()
            );
            Config::default()
        };

        config.llm.api_key = std::env::var(&config.llm.api_key).unwrap_or_default();

        Ok(config)
    }
}

pub fn load_config() -> Result<Config, AnalysisError> {
    let loader = FileConfigLoader::new();
    loader.load_config()
}
