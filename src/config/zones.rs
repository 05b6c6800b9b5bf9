//! Zone configuration loading from config.toml
//!
//! This module provides functionality to load the zone directory from a
//! TOML configuration file. The zones defined in config.toml are used to
//! seed the database on first run or when zones are missing.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of zone configurations to seed
    pub zones: Vec<ZoneConfig>,
}

/// Configuration for a single zone
#[derive(Debug, Deserialize, Clone)]
pub struct ZoneConfig {
    /// Name of the zone
    pub name: String,
    /// Display position, ascending
    pub sort_order: i32,
}

/// Loads zone configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads zone configuration from the default location (./config.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}
