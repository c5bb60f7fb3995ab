//! Config Loader — read game configuration documents
//!
//! Parses JSON (primary) or YAML documents into a [`GameConfig`], enforces
//! size limits, and runs full configuration validation.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let loader = ConfigLoader::new();
//! let config = loader.load("config.json")?;
//! ```

use std::path::Path;

use crate::config::GameConfig;
use crate::error::{ScratchError, ScratchResult};

/// Configuration loader
pub struct ConfigLoader {
    /// Validation limits
    pub limits: LoaderLimits,
}

/// Size limits applied before the engine sees a configuration
#[derive(Debug, Clone)]
pub struct LoaderLimits {
    pub max_rows: usize,
    pub max_columns: usize,
    pub max_symbols: usize,
    pub max_combinations: usize,
}

impl Default for LoaderLimits {
    fn default() -> Self {
        Self {
            max_rows: 32,
            max_columns: 32,
            max_symbols: 256,
            max_combinations: 256,
        }
    }
}

/// Document formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Pick a format from a file extension; anything but yaml/yml is JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

impl ConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self {
            limits: LoaderLimits::default(),
        }
    }

    /// Create loader with custom limits
    pub fn with_limits(limits: LoaderLimits) -> Self {
        Self { limits }
    }

    /// Read, parse and validate a configuration file
    pub fn load(&self, path: impl AsRef<Path>) -> ScratchResult<GameConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = self.parse(&text, ConfigFormat::from_path(path))?;

        log::info!(
            "Loaded {}: {}x{} grid, {} symbols, {} win combinations",
            path.display(),
            config.rows,
            config.columns,
            config.symbols.len(),
            config.win_combinations.len()
        );
        Ok(config)
    }

    /// Parse and validate a document
    pub fn parse(&self, text: &str, format: ConfigFormat) -> ScratchResult<GameConfig> {
        let config: GameConfig = match format {
            ConfigFormat::Json => serde_json::from_str(text)
                .map_err(|e| ScratchError::Parse(format!("JSON: {e}")))?,
            ConfigFormat::Yaml => serde_yml::from_str(text)
                .map_err(|e| ScratchError::Parse(format!("YAML: {e}")))?,
        };

        self.check_limits(&config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn parse_json(&self, json: &str) -> ScratchResult<GameConfig> {
        self.parse(json, ConfigFormat::Json)
    }

    pub fn parse_yaml(&self, yaml: &str) -> ScratchResult<GameConfig> {
        self.parse(yaml, ConfigFormat::Yaml)
    }

    fn check_limits(&self, config: &GameConfig) -> ScratchResult<()> {
        if config.rows > self.limits.max_rows {
            return Err(ScratchError::config(format!(
                "Too many rows: {} > {}",
                config.rows, self.limits.max_rows
            )));
        }

        if config.columns > self.limits.max_columns {
            return Err(ScratchError::config(format!(
                "Too many columns: {} > {}",
                config.columns, self.limits.max_columns
            )));
        }

        if config.symbols.len() > self.limits.max_symbols {
            return Err(ScratchError::config(format!(
                "Too many symbols: {} > {}",
                config.symbols.len(),
                self.limits.max_symbols
            )));
        }

        if config.win_combinations.len() > self.limits.max_combinations {
            return Err(ScratchError::config(format!(
                "Too many win combinations: {} > {}",
                config.win_combinations.len(),
                self.limits.max_combinations
            )));
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
