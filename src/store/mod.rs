// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation store: resolves item identifiers against the selected
//! language and remembers that selection through a [`PreferenceStore`].
//!
//! The store is an ordinary value. Build one at startup and hand out
//! references to whatever needs translated text.
//!
//! Lookups never fail hard. Misses are reported on the debug channel and
//! come back as `None` (or a [`LookupError`] from the `try_` variants);
//! the selected language is left as it was.

use crate::config::{ConfigError, StoreConfig};
use crate::diagnostics::DebugChannel;
use crate::loader::{self, LoadError};
use crate::placeholder;
use crate::storage::{resolve_save_key, MemoryPreferences, PreferenceStore};
use crate::types::{Language, TranslationTable};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("no language named {0:?} is configured")]
    LanguageNotFound(String),

    #[error("no translation for {id:?} in {}", .language.as_deref().unwrap_or("(no language selected)"))]
    TranslationNotFound {
        id: String,
        language: Option<String>,
    },

    #[error("cannot resolve a column for language {0:?}")]
    LanguageIndexUnresolved(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("table has {columns} columns, {languages} languages need {}", .languages + 1)]
    MissingColumns { languages: usize, columns: usize },
}

#[derive(Debug)]
pub struct TranslationStore<P: PreferenceStore = MemoryPreferences> {
    table: TranslationTable,
    languages: Vec<Language>,
    current: Option<Language>,
    save_key: String,
    prefs: P,
    debug: DebugChannel,
}

impl<P: PreferenceStore> TranslationStore<P> {
    /// Build a store over a parsed table.
    ///
    /// Restores the preferred language straight away when
    /// `auto_load_preferred_language` is set. A stored name that no longer
    /// matches a configured language leaves the store unselected.
    pub fn new(table: TranslationTable, config: StoreConfig, prefs: P) -> Result<Self, StoreError> {
        config.validate()?;

        let languages = config.available_languages.len();
        if !table.is_empty() && table.column_count() < languages + 1 {
            return Err(StoreError::MissingColumns {
                languages,
                columns: table.column_count(),
            });
        }

        let mut store = Self {
            table,
            languages: config.available_languages,
            current: None,
            save_key: config.preferred_language_save_key,
            prefs,
            debug: DebugChannel::new(config.enable_debug_logging),
        };

        if config.auto_load_preferred_language {
            let _ = store.load_preferred_language();
        }
        Ok(store)
    }

    /// Parse `raw` with the configured delimiter and build a store over it.
    pub fn from_text(raw: &str, config: StoreConfig, prefs: P) -> Result<Self, StoreError> {
        let table = loader::parse(raw, config.delimiter)?;
        Self::new(table, config, prefs)
    }

    /// Read a table file and build a store over it.
    pub fn open(path: &Path, config: StoreConfig, prefs: P) -> Result<Self, StoreError> {
        let table = loader::read_table(path, config.delimiter)?;
        Self::new(table, config, prefs)
    }

    /// Select the first configured language called `name` and persist it.
    ///
    /// A failed write to the preference store is reported as a warning;
    /// the selection itself still takes effect.
    pub fn select_language(&mut self, name: &str) -> Result<(), LookupError> {
        let Some(language) = self.languages.iter().find(|l| l.name == name).cloned() else {
            self.debug.error(format!(
                "no language named {name:?}; add it to the configured languages"
            ));
            return Err(LookupError::LanguageNotFound(name.to_string()));
        };

        self.save_preferred_language(&language.name);
        self.debug
            .info(format!("language changed to {}", language.name));
        self.current = Some(language);
        Ok(())
    }

    /// Select the persisted language, defaulting to the first configured one.
    pub fn load_preferred_language(&mut self) -> Result<(), LookupError> {
        let key = self.current_save_path().to_string();
        let default = self
            .languages
            .first()
            .map(|language| language.name.clone())
            .unwrap_or_default();
        let loaded = self.prefs.get(&key, &default);

        self.select_language(&loaded)?;
        self.debug.info(format!("loaded {loaded} from {key}"));
        Ok(())
    }

    fn save_preferred_language(&mut self, name: &str) {
        let key = self.current_save_path().to_string();
        match self.prefs.set(&key, name) {
            Ok(()) => self.debug.info(format!("saved {name} to {key}")),
            Err(err) => self
                .debug
                .warning(format!("could not save {name} to {key}: {err:#}")),
        }
    }

    /// Translation of `id` in the selected language, placeholders decoded.
    pub fn translation(&self, id: &str) -> Option<String> {
        self.try_translation(id).ok()
    }

    pub fn try_translation(&self, id: &str) -> Result<String, LookupError> {
        let Some(current) = self.current.as_ref() else {
            self.debug
                .error(format!("no translation for {id:?}: no language selected"));
            return Err(LookupError::TranslationNotFound {
                id: id.to_string(),
                language: None,
            });
        };

        let column = self.column_for(current);
        match self.table.find_row(id).and_then(|row| row.get(column)) {
            Some(cell) => Ok(placeholder::decode(cell).into_owned()),
            None => {
                self.debug.error(format!(
                    "no translation for {id:?} in {}",
                    current.name
                ));
                Err(LookupError::TranslationNotFound {
                    id: id.to_string(),
                    language: Some(current.name.clone()),
                })
            }
        }
    }

    /// Position of the first configured language called `name`.
    pub fn language_index(&self, name: &str) -> Result<usize, LookupError> {
        match self.languages.iter().position(|l| l.name == name) {
            Some(index) => Ok(index),
            None => {
                self.debug.error(format!(
                    "cannot resolve an index for language {name:?}"
                ));
                Err(LookupError::LanguageIndexUnresolved(name.to_string()))
            }
        }
    }

    /// Table column holding `language`'s strings.
    ///
    /// An unresolvable language falls back to the first language's column
    /// so lookups still render something.
    fn column_for(&self, language: &Language) -> usize {
        self.language_index(&language.name).unwrap_or(0) + 1
    }

    pub fn current_language(&self) -> Option<&Language> {
        self.current.as_ref()
    }

    pub fn available_languages(&self) -> &[Language] {
        &self.languages
    }

    /// Preference key the selection is saved under.
    pub fn current_save_path(&self) -> &str {
        resolve_save_key(&self.save_key)
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn preferences(&self) -> &P {
        &self.prefs
    }

    pub fn diagnostics(&self) -> &DebugChannel {
        &self.debug
    }
}
