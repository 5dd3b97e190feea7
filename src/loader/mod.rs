// SPDX-License-Identifier: PMPL-1.0-or-later

//! Table loader: delimited text into a rectangular grid.
//!
//! Each line is one row and is trimmed before it is split on the
//! delimiter; fields themselves are left untouched. Blank lines are
//! skipped. Every row must have the same number of columns as the first
//! row, otherwise loading fails with [`LoadError::RaggedRow`] instead of
//! truncating or padding.

use crate::types::TranslationTable;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_DELIMITER: char = ';';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("reading table {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("table {} is neither UTF-8 nor Windows-1252 text", path.display())]
    Encoding { path: PathBuf },
}

/// Parse raw table text.
///
/// ```
/// use transtable::loader::parse;
/// let table = parse("welcome;Hola;Hello\nbye;Adios;Bye\n", ';').unwrap();
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.column_count(), 3);
/// ```
pub fn parse(raw: &str, delimiter: char) -> Result<TranslationTable, LoadError> {
    let mut rows = Vec::new();
    let mut columns: Option<usize> = None;

    for (index, line) in raw.split('\n').enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let cells: Vec<String> = line.split(delimiter).map(str::to_string).collect();
        let expected = *columns.get_or_insert(cells.len());
        if cells.len() != expected {
            return Err(LoadError::RaggedRow {
                line: index + 1,
                expected,
                found: cells.len(),
            });
        }
        rows.push(cells);
    }

    Ok(TranslationTable::from_rows(rows, columns.unwrap_or(0)))
}

/// Read and parse a table file.
///
/// A byte order mark selects the encoding when present. Without one the
/// bytes are taken as UTF-8, falling back to Windows-1252 for tables
/// exported by older spreadsheet tools.
pub fn read_table(path: &Path, delimiter: char) -> Result<TranslationTable, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode_text(&bytes).ok_or_else(|| LoadError::Encoding {
        path: path.to_path_buf(),
    })?;
    parse(&text, delimiter)
}

fn decode_text(bytes: &[u8]) -> Option<String> {
    if let Some((encoding, bom_len)) = encoding_rs::Encoding::for_bom(bytes) {
        let (cow, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (!had_errors).then(|| cow.into_owned());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => Some(text.to_string()),
        Err(_) => {
            let (cow, _, had_errors) = encoding_rs::WINDOWS_1252.decode(bytes);
            (!had_errors).then(|| cow.into_owned())
        }
    }
}
