// SPDX-License-Identifier: PMPL-1.0-or-later

//! Core type definitions for transtable

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named translation column.
///
/// The name is both the human-readable label and the selection key.
/// Names are not required to be unique; lookups always take the first
/// declared match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "LanguageSpec")]
pub struct Language {
    pub name: String,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// Config files may list languages as bare strings or as `{ name: ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LanguageSpec {
    Bare(String),
    Named {
        #[serde(alias = "languageName")]
        name: String,
    },
}

impl From<LanguageSpec> for Language {
    fn from(spec: LanguageSpec) -> Self {
        match spec {
            LanguageSpec::Bare(name) | LanguageSpec::Named { name } => Language { name },
        }
    }
}

/// Parsed translation grid.
///
/// Column 0 of each row is the item identifier; columns `1..` line up
/// positionally with the configured language list. Every row has exactly
/// `columns` cells. Cells are stored raw, placeholders undecoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    rows: Vec<Vec<String>>,
    columns: usize,
}

impl TranslationTable {
    /// Build a table from rows already checked to be rectangular.
    pub(crate) fn from_rows(rows: Vec<Vec<String>>, columns: usize) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns));
        Self { rows, columns }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First row whose identifier equals `id`.
    pub fn find_row(&self, id: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|row| row.first().map(String::as_str) == Some(id))
            .map(Vec::as_slice)
    }

    /// Item identifiers in table order, duplicates included.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(|row| row.first().map(String::as_str))
    }
}

/// Kind of message sent through the debug channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    Info,
    Warning,
    Error,
}

impl DebugLevel {
    pub fn tag(&self) -> &'static str {
        match self {
            DebugLevel::Info => "INFO",
            DebugLevel::Warning => "WARN",
            DebugLevel::Error => "ERR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TranslationTable {
        TranslationTable::from_rows(
            vec![
                vec!["welcome".into(), "Hola".into(), "Hello".into()],
                vec!["bye".into(), "Adios".into(), "Bye".into()],
                vec!["welcome".into(), "Buenas".into(), "Howdy".into()],
            ],
            3,
        )
    }

    #[test]
    fn find_row_first_match_wins() {
        let table = table();
        let row = table.find_row("welcome").expect("row present");
        assert_eq!(row[1], "Hola");
    }

    #[test]
    fn find_row_missing() {
        assert!(table().find_row("missing_id").is_none());
    }

    #[test]
    fn ids_keep_duplicates() {
        let table = table();
        let ids: Vec<&str> = table.ids().collect();
        assert_eq!(ids, vec!["welcome", "bye", "welcome"]);
    }

    #[test]
    fn language_deserializes_from_both_shapes() {
        let langs: Vec<Language> =
            serde_json::from_str(r#"["Spanish", {"name": "English"}, {"languageName": "French"}]"#)
                .unwrap();
        assert_eq!(
            langs,
            vec![
                Language::new("Spanish"),
                Language::new("English"),
                Language::new("French")
            ]
        );
    }
}
