//! `barrio.toml` loading.
//!
//! ```toml
//! [engine]
//! horizon_days = 180
//! timezone = "America/Santiago"
//! dst_policy = "shift_forward"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use barrio_engine::EngineConfig;
use serde::Deserialize;

/// File looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "barrio.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.engine.validate()?;
        Ok(settings)
    }

    /// Explicit path, else `./barrio.toml` if present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            tracing::info!("Loading config from: {}", fallback.display());
            return Self::from_file(&fallback);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Settings::default())
    }
}
