// SPDX-License-Identifier: PMPL-1.0-or-later

//! Transtable — delimited translation tables for interactive applications.
//!
//! A table is plain text, one item per line, `;` between columns:
//!
//! ```text
//! welcome;Hola;Hello
//! farewell;Adios<semicolon> amigo;Goodbye<newline>friend
//! ```
//!
//! Column 0 is the item identifier and the remaining columns follow the
//! configured language order. There is no header row.
//!
//! COMPONENTS:
//! 1. **Loader**: parses table text into a rectangular grid, rejecting
//!    ragged rows.
//! 2. **Store**: serves strings for the selected language and persists
//!    that selection through a pluggable preference store.
//! 3. **Audit**: reports duplicate identifiers and untranslated cells.

pub mod audit;
pub mod config;
pub mod diagnostics;
pub mod loader;
pub mod placeholder;
pub mod storage;
pub mod store;
pub mod types;

pub use config::StoreConfig;
pub use store::{LookupError, StoreError, TranslationStore};
pub use types::{Language, TranslationTable};
