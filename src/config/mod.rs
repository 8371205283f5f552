//! Configuration for paperdrop.
//!
//! Read from `~/.config/paperdrop/config.toml` at startup. If the file
//! doesn't exist, a default configuration with comments is created.
//! Missing keys fall back to their defaults.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetcher::http_fetcher::DEFAULT_USER_AGENT;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory downloaded PDFs are written to.
    pub download_dir: PathBuf,
    /// Timeout in seconds for feed validation probes.
    pub short_timeout_secs: u64,
    /// Timeout in seconds for feed, page, and PDF retrieval.
    pub long_timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("downloaded_pdfs"),
            short_timeout_secs: 10,
            long_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run. An existing but invalid file is an error;
    /// missing fields use defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    pub fn short_timeout(&self) -> Duration {
        Duration::from_secs(self.short_timeout_secs)
    }

    pub fn long_timeout(&self) -> Duration {
        Duration::from_secs(self.long_timeout_secs)
    }

    /// Get the default config file path: `~/.config/paperdrop/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("paperdrop").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# paperdrop configuration

# Directory downloaded PDFs are written to. Relative paths are resolved
# against the working directory the command runs in.
download_dir = "downloaded_pdfs"

# Timeout in seconds for feed validation probes.
short_timeout_secs = 10

# Timeout in seconds for feed, page, and PDF retrieval.
long_timeout_secs = 30

# User-Agent header sent with every request.
user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
