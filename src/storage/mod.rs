// SPDX-License-Identifier: PMPL-1.0-or-later

//! Persistent storage for the preferred language.
//!
//! The store only needs `get` with a default and `set`; anything that can
//! hold a string under a key will do. Two backends ship here: an
//! in-memory map and a JSON file on disk.

use anyhow::{anyhow, Context, Result};
use serde_json::{self, Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SAVE_KEY: &str = "preferred_language";

/// Key-value collaborator used to remember the selected language.
pub trait PreferenceStore {
    /// Stored value for `key`, or `default` when nothing is stored or the
    /// backend cannot be read.
    fn get(&self, key: &str, default: &str) -> String;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Configured key, or [`DEFAULT_SAVE_KEY`] when it is blank.
pub fn resolve_save_key(key: &str) -> &str {
    if key.trim().is_empty() {
        DEFAULT_SAVE_KEY
    } else {
        key
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str, default: &str) -> String {
        self.value(key).unwrap_or(default).to_string()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a JSON object in a file.
///
/// The file is read once on open and rewritten on every `set`. Values that
/// are not strings belong to someone else: they are kept on write and
/// never returned by `get`. A missing file starts empty. A file that cannot
/// be read or parsed is unavailable: reads fall back to their defaults and
/// writes are refused so the file is never clobbered.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: PathBuf,
    values: Result<Map<String, Value>, String>,
}

impl JsonFilePreferences {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = read_values(&path).map_err(|err| format!("{err:#}"));
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file was readable when opened.
    pub fn is_available(&self) -> bool {
        self.values.is_ok()
    }
}

fn read_values(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading preferences {}", path.display()))?;
    match serde_json::from_str::<Value>(&content)
        .with_context(|| format!("parsing preferences {}", path.display()))?
    {
        Value::Object(values) => Ok(values),
        _ => Err(anyhow!(
            "preferences {} is not a JSON object",
            path.display()
        )),
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get(&self, key: &str, default: &str) -> String {
        self.values
            .as_ref()
            .ok()
            .and_then(|values| values.get(key))
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut values = match &self.values {
            Ok(values) => values.clone(),
            Err(reason) => {
                return Err(anyhow!(
                    "refusing to overwrite unreadable preferences: {reason}"
                ))
            }
        };
        values.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let payload = serde_json::to_string_pretty(&values)?;
        fs::write(&self.path, payload)
            .with_context(|| format!("writing preferences {}", self.path.display()))?;

        self.values = Ok(values);
        Ok(())
    }
}
