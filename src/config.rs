//! Configuration file support for vulnscan.
//!
//! Provides YAML-based configuration through `vulnscan.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::shared::Result;

const CONFIG_FILENAME: &str = "vulnscan.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// NVD API key; raises the catalog's rate limit.
    pub api_key: Option<String>,
    /// Default page size for catalog queries.
    pub page_size: Option<u32>,
    /// Bounded-term policy override for scan correlation.
    pub max_terms: Option<usize>,
    /// Backend collaborator base URL for scan submission.
    pub endpoint: Option<String>,
    /// Override for the pinned-set storage file.
    pub pin_file: Option<PathBuf>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(page_size) = config.page_size {
        if page_size == 0 {
            bail!(
                "Invalid config: page_size must be at least 1.\n\n\
                 💡 Hint: The NVD API rejects zero-sized pages."
            );
        }
    }
    if let Some(max_terms) = config.max_terms {
        if max_terms == 0 {
            bail!(
                "Invalid config: max_terms must be at least 1.\n\n\
                 💡 Hint: Setting max_terms to 0 would skip correlation entirely."
            );
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
