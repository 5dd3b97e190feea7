// SPDX-License-Identifier: PMPL-1.0-or-later

//! transtable: look up, select and audit delimited translation tables

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use transtable::audit::audit_table;
use transtable::placeholder;
use transtable::storage::JsonFilePreferences;
use transtable::{StoreConfig, TranslationStore};

#[derive(Parser)]
#[command(name = "transtable")]
#[command(version)]
#[command(about = "Delimited translation tables with persisted language selection")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct TableArgs {
    /// Translation table (one item per line, delimited columns)
    #[arg(short, long, value_name = "FILE")]
    table: PathBuf,

    /// Store configuration (.json, .yaml or .yml)
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,

    /// Preference file the selected language is saved in
    #[arg(short, long, value_name = "FILE", default_value = "transtable-prefs.json")]
    prefs: PathBuf,

    /// Print debug messages regardless of the configuration
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print translations for item identifiers
    Get {
        #[command(flatten)]
        args: TableArgs,

        /// Select (and save) this language before looking up
        #[arg(short, long)]
        lang: Option<String>,

        /// Item identifiers to translate
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },

    /// List configured languages
    Languages {
        #[command(flatten)]
        args: TableArgs,
    },

    /// Select a language and save it as preferred
    Select {
        #[command(flatten)]
        args: TableArgs,

        /// Language name as configured
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Report duplicate identifiers and untranslated cells
    Check {
        #[command(flatten)]
        args: TableArgs,

        /// Emit the audit as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encode text into a table cell using placeholders
    Encode {
        /// Text to encode
        #[arg(value_name = "TEXT")]
        text: String,

        /// Column delimiter of the target table
        #[arg(short, long, default_value_t = transtable::loader::DEFAULT_DELIMITER)]
        delimiter: char,
    },
}

fn open_store(args: &TableArgs) -> Result<TranslationStore<JsonFilePreferences>> {
    let mut config = StoreConfig::load(&args.config)?;
    config.enable_debug_logging |= args.debug;
    let prefs = JsonFilePreferences::open(&args.prefs);
    TranslationStore::open(&args.table, config, prefs)
        .with_context(|| format!("loading table {}", args.table.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Get { args, lang, ids } => {
            let mut store = open_store(&args)?;
            if let Some(name) = lang {
                store.select_language(&name)?;
            }

            let mut missing = 0;
            for id in &ids {
                match store.try_translation(id) {
                    Ok(text) => println!("{}", text),
                    Err(err) => {
                        missing += 1;
                        eprintln!("{} {}", "warning:".yellow().bold(), err);
                    }
                }
            }
            if missing > 0 {
                return Err(anyhow!("{} of {} ids not translated", missing, ids.len()));
            }
        }

        Commands::Languages { args } => {
            let store = open_store(&args)?;
            let current = store.current_language();
            for (index, language) in store.available_languages().iter().enumerate() {
                // Duplicate names: only the first one is ever current.
                let is_current = current.map(|c| c.name == language.name).unwrap_or(false)
                    && store.language_index(&language.name).ok() == Some(index);
                if is_current {
                    println!("{} {}", "*".green().bold(), language.name.bold());
                } else {
                    println!("  {}", language.name);
                }
            }
        }

        Commands::Select { args, name } => {
            let mut store = open_store(&args)?;
            store.select_language(&name)?;
            println!(
                "Selected {} (saved under {} in {})",
                name.bold(),
                store.current_save_path(),
                store.preferences().path().display()
            );
        }

        Commands::Check { args, json } => {
            let store = open_store(&args)?;
            let audit = audit_table(store.table(), store.available_languages());

            if json {
                println!("{}", serde_json::to_string_pretty(&audit)?);
            } else {
                println!("{}", "TABLE CHECK".bold().cyan());
                println!("  Rows: {}", audit.rows);
                println!("  Columns: {}", audit.columns);
                println!("  Languages: {}", audit.languages.join(", "));
                if audit.unused_columns > 0 {
                    println!("  Unused columns: {}", audit.unused_columns);
                }
                for id in &audit.duplicate_ids {
                    println!(
                        "  {} duplicate id {} (first row wins)",
                        "[WARN]".yellow(),
                        id
                    );
                }
                for cell in &audit.empty_cells {
                    println!(
                        "  {} row {}: {} has no {} translation",
                        "[WARN]".yellow(),
                        cell.row,
                        cell.id,
                        cell.language
                    );
                }
                if audit.is_clean() {
                    println!("  {}", "[OK] every id translated".green());
                }
            }
        }

        Commands::Encode { text, delimiter } => {
            println!("{}", placeholder::encode(&text, delimiter)?);
        }
    }

    Ok(())
}
