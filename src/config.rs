use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use simplelog::LevelFilter;
use thiserror::Error;

use crate::paths;
use crate::usecase::services::table::{
    TableOptions, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE, PAGE_SIZE_OPTIONS,
};

pub const CONFIG_ENV: &str = "VOCAB_ADMIN_CONFIG";
const VALID_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Word store; defaults to the platform data directory.
    pub database_path: Option<PathBuf>,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub search_debounce_ms: u64,
    pub mock_latency_ms: u64,
    pub log_level: String,
    /// Fill an empty word store with demo rows on startup.
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE.as_millis() as u64,
            mock_latency_ms: 200,
            log_level: "info".to_string(),
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// Loads the config named by `VOCAB_ADMIN_CONFIG`, else the platform
    /// config file. A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(paths::config_file);
        match path {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                let mut config = Self::default();
                config.finalize()?;
                Ok(config)
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig = toml::from_str(content)?;
        config.finalize()?;
        Ok(config)
    }

    /// Fills derived defaults and validates.
    pub fn finalize(&mut self) -> Result<(), ConfigError> {
        self.log_level = self.log_level.trim().to_ascii_lowercase();
        if self.page_size_options.is_empty() {
            self.page_size_options = PAGE_SIZE_OPTIONS.to_vec();
        }
        if !self.page_size_options.contains(&self.page_size) {
            self.page_size_options.push(self.page_size);
            self.page_size_options.sort_unstable();
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size cannot be 0".to_string()));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::Invalid(
                "page_size_options cannot contain 0".to_string(),
            ));
        }
        if !VALID_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "invalid log level '{}'. Must be one of: {}",
                self.log_level,
                VALID_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(paths::default_database)
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }

    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            page_size: self.page_size,
            search_debounce: Duration::from_millis(self.search_debounce_ms),
        }
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}
