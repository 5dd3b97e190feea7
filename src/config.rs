// SPDX-License-Identifier: PMPL-1.0-or-later

//! Store configuration loading.

use crate::loader::DEFAULT_DELIMITER;
use crate::storage::DEFAULT_SAVE_KEY;
use crate::types::Language;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json;
use serde_yaml;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no languages configured")]
    NoLanguages,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default, alias = "enableDebugLogging", alias = "debugMode")]
    pub enable_debug_logging: bool,

    #[serde(default = "default_true", alias = "autoLoadPreferredLanguage")]
    pub auto_load_preferred_language: bool,

    #[serde(
        default = "default_save_key",
        alias = "preferredLanguageSaveKey",
        alias = "preferredLanguagePath"
    )]
    pub preferred_language_save_key: String,

    #[serde(default, alias = "availableLanguages")]
    pub available_languages: Vec<Language>,

    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_true() -> bool {
    true
}

fn default_save_key() -> String {
    DEFAULT_SAVE_KEY.to_string()
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enable_debug_logging: false,
            auto_load_preferred_language: true,
            preferred_language_save_key: default_save_key(),
            available_languages: Vec::new(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl StoreConfig {
    pub fn with_languages<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_languages: names.into_iter().map(Language::new).collect(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: StoreConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("parsing json config {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml config {}", path.display()))?,
            _ => return Err(anyhow!("unsupported config extension for {}", path.display())),
        };
        config
            .validate()
            .with_context(|| format!("validating config {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.available_languages.is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        Ok(())
    }
}
