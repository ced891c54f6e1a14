// Copyright 2025 Apache Doris Community
// Licensed under the Apache License, Version 2.0

//! Configuration management for the delta_classic tool

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::DEFAULT_CATALOG_NAME;
use crate::error::DeltaClassicError;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// How the discovered catalog is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level
    pub log_level: String,

    /// Name the base path is attached under
    pub catalog_name: String,

    /// Ask the delegate to hold one table version per attachment
    pub pin_snapshot: bool,

    /// Output format of the listing
    pub output_format: OutputFormat,

    /// Also print internal delegate handle names
    pub show_internal_handles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            catalog_name: DEFAULT_CATALOG_NAME.to_string(),
            pin_snapshot: false,
            output_format: OutputFormat::Text,
            show_internal_handles: false,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| DeltaClassicError::Config(e.to_string()))
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.catalog_name.trim().is_empty() {
            return Err(DeltaClassicError::InvalidArgument(
                "catalog_name cannot be empty".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(DeltaClassicError::InvalidArgument(format!(
                "unknown log_level '{}'",
                self.log_level
            )));
        }
        Ok(())
    }
}
