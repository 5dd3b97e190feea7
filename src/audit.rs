// SPDX-License-Identifier: PMPL-1.0-or-later

//! Table audit: coverage gaps a translator should fix before shipping.

use crate::types::{Language, TranslationTable};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyCell {
    pub id: String,
    pub language: String,
    /// 1-based row position in the table.
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableAudit {
    pub rows: usize,
    pub columns: usize,
    pub languages: Vec<String>,
    /// Identifiers that appear more than once; only the first row is ever served.
    pub duplicate_ids: Vec<String>,
    pub empty_cells: Vec<EmptyCell>,
    /// Columns beyond the configured languages, never served.
    pub unused_columns: usize,
}

impl TableAudit {
    pub fn is_clean(&self) -> bool {
        self.duplicate_ids.is_empty() && self.empty_cells.is_empty()
    }
}

pub fn audit_table(table: &TranslationTable, languages: &[Language]) -> TableAudit {
    let mut seen = HashSet::new();
    let mut duplicate_ids = Vec::new();
    let mut empty_cells = Vec::new();

    for (index, row) in table.rows().iter().enumerate() {
        let Some(id) = row.first() else { continue };
        if !seen.insert(id.as_str()) && !duplicate_ids.contains(id) {
            duplicate_ids.push(id.clone());
        }

        for (offset, language) in languages.iter().enumerate() {
            let blank = row
                .get(offset + 1)
                .map(|cell| cell.trim().is_empty())
                .unwrap_or(true);
            if blank {
                empty_cells.push(EmptyCell {
                    id: id.clone(),
                    language: language.name.clone(),
                    row: index + 1,
                });
            }
        }
    }

    TableAudit {
        rows: table.row_count(),
        columns: table.column_count(),
        languages: languages.iter().map(|l| l.name.clone()).collect(),
        duplicate_ids,
        empty_cells,
        unused_columns: table.column_count().saturating_sub(languages.len() + 1),
    }
}
