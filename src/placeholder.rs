// SPDX-License-Identifier: PMPL-1.0-or-later

//! Placeholder encoding for table cells.
//!
//! Cells cannot contain the column delimiter or a line break directly, so
//! authors write `<semicolon>` and `<newline>` instead. Decoding happens
//! at lookup time; the loader keeps cells raw.

use std::borrow::Cow;
use thiserror::Error;

pub const SEMICOLON: &str = "<semicolon>";
pub const NEWLINE: &str = "<newline>";

/// Expand placeholders in a raw cell.
///
/// ```
/// use transtable::placeholder::decode;
/// assert_eq!(decode("a<semicolon>b<newline>c"), "a;b\nc");
/// ```
pub fn decode(cell: &str) -> Cow<'_, str> {
    if !cell.contains(SEMICOLON) && !cell.contains(NEWLINE) {
        return Cow::Borrowed(cell);
    }
    Cow::Owned(cell.replace(SEMICOLON, ";").replace(NEWLINE, "\n"))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Only `;` has a placeholder; any other delimiter cannot appear in a cell.
    #[error("text contains the delimiter {0:?}, which has no placeholder")]
    Delimiter(char),

    /// Placeholder text has no escape and would decode to something else.
    #[error("text contains the literal placeholder {0}")]
    LiteralPlaceholder(&'static str),
}

/// Turn free text into a cell that survives the loader and decodes back
/// to the same text.
///
/// ```
/// use transtable::placeholder::encode;
/// assert_eq!(encode("a;b\nc", ';').unwrap(), "a<semicolon>b<newline>c");
/// assert!(encode("a|b", '|').is_err());
/// ```
pub fn encode(text: &str, delimiter: char) -> Result<String, EncodeError> {
    if delimiter != ';' && text.contains(delimiter) {
        return Err(EncodeError::Delimiter(delimiter));
    }
    for placeholder in [SEMICOLON, NEWLINE] {
        if text.contains(placeholder) {
            return Err(EncodeError::LiteralPlaceholder(placeholder));
        }
    }
    Ok(text
        .replace("\r\n", "\n")
        .replace(';', SEMICOLON)
        .replace('\n', NEWLINE))
}
