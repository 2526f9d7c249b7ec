//! Configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use talent_log_parser::{ParserConfig, ELEMENT_ATTRIBUTES};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "default_attributes")]
    pub attributes: Vec<AttributeConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            parser: ParserConfig::default(),
            output: OutputConfig::default(),
            attributes: default_attributes(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Text table
    #[default]
    Txt,
    /// JSON array of records
    Json,
    /// NEW-format log sections
    Log,
}

/// One talent column: attribute id and its header label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttributeConfig {
    pub id: String,
    pub label: String,
}

fn default_attributes() -> Vec<AttributeConfig> {
    ELEMENT_ATTRIBUTES
        .iter()
        .map(|attr| AttributeConfig {
            id: attr.id.to_string(),
            label: attr.label.to_string(),
        })
        .collect()
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}
