// SPDX-License-Identifier: PMPL-1.0-or-later

//! End-to-end tests: table files, config files and persisted preferences

use std::fs;
use tempfile::TempDir;
use transtable::loader::{self, LoadError};
use transtable::placeholder;
use transtable::storage::{JsonFilePreferences, MemoryPreferences, PreferenceStore, DEFAULT_SAVE_KEY};
use transtable::{Language, LookupError, StoreConfig, StoreError, TranslationStore};

const TABLE: &str = "\
welcome;Hola;Hello
farewell;Adios<semicolon> amigo;Goodbye<newline>friend
menu.start;Empezar;Start
";

fn spanish_english() -> StoreConfig {
    StoreConfig::with_languages(["Spanish", "English"])
}

#[test]
fn test_welcome_example() {
    let mut store =
        TranslationStore::from_text(TABLE, spanish_english(), MemoryPreferences::new())
            .expect("store should build");

    store.select_language("Spanish").unwrap();
    assert_eq!(store.translation("welcome").as_deref(), Some("Hola"));

    store.select_language("English").unwrap();
    assert_eq!(store.translation("welcome").as_deref(), Some("Hello"));
}

#[test]
fn test_every_cell_served_in_its_language() {
    let config = spanish_english();
    let table = loader::parse(TABLE, config.delimiter).unwrap();
    let mut store =
        TranslationStore::new(table.clone(), config, MemoryPreferences::new()).unwrap();

    for (index, language) in store.available_languages().to_vec().iter().enumerate() {
        store.select_language(&language.name).unwrap();
        for row in table.rows() {
            assert_eq!(
                store.translation(&row[0]),
                Some(placeholder::decode(&row[index + 1]).into_owned()),
                "{} in {}",
                row[0],
                language
            );
        }
    }
}

#[test]
fn test_placeholders_decoded_on_lookup() {
    let mut store =
        TranslationStore::from_text(TABLE, spanish_english(), MemoryPreferences::new()).unwrap();
    assert_eq!(store.translation("farewell").as_deref(), Some("Adios; amigo"));
    store.select_language("English").unwrap();
    assert_eq!(
        store.translation("farewell").as_deref(),
        Some("Goodbye\nfriend")
    );
    // The table itself keeps the raw cell.
    assert_eq!(
        store.table().find_row("farewell").unwrap()[2],
        "Goodbye<newline>friend"
    );
}

#[test]
fn test_unknown_id_and_language() {
    let mut store =
        TranslationStore::from_text(TABLE, spanish_english(), MemoryPreferences::new()).unwrap();

    assert_eq!(store.translation("missing_id"), None);
    assert_eq!(
        store.try_translation("missing_id"),
        Err(LookupError::TranslationNotFound {
            id: "missing_id".into(),
            language: Some("Spanish".into()),
        })
    );

    assert_eq!(
        store.select_language("Klingon"),
        Err(LookupError::LanguageNotFound("Klingon".into()))
    );
    assert_eq!(store.current_language(), Some(&Language::new("Spanish")));
}

#[test]
fn test_persisted_preference_restored_at_startup() {
    let prefs = MemoryPreferences::new().with_value(DEFAULT_SAVE_KEY, "English");
    let store = TranslationStore::from_text(TABLE, spanish_english(), prefs).unwrap();
    assert_eq!(store.current_language(), Some(&Language::new("English")));
    assert_eq!(store.translation("menu.start").as_deref(), Some("Start"));
}

#[test]
fn test_stale_preference_leaves_store_unselected() {
    let prefs = MemoryPreferences::new().with_value(DEFAULT_SAVE_KEY, "Latin");
    let mut store = TranslationStore::from_text(TABLE, spanish_english(), prefs).unwrap();
    assert!(store.current_language().is_none());
    assert_eq!(store.translation("welcome"), None);

    store.select_language("English").unwrap();
    assert_eq!(store.translation("welcome").as_deref(), Some("Hello"));
}

#[test]
fn test_manual_load_when_auto_load_disabled() {
    let config = StoreConfig {
        auto_load_preferred_language: false,
        preferred_language_save_key: "ui.lang".into(),
        ..spanish_english()
    };
    let prefs = MemoryPreferences::new().with_value("ui.lang", "English");
    let mut store = TranslationStore::from_text(TABLE, config, prefs).unwrap();
    assert!(store.current_language().is_none());
    assert_eq!(store.current_save_path(), "ui.lang");

    store.load_preferred_language().unwrap();
    assert_eq!(store.current_language(), Some(&Language::new("English")));
}

#[test]
fn test_ragged_table_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("strings.csv");
    fs::write(&path, "welcome;Hola;Hello\nbye;Adios\n").unwrap();

    let err = TranslationStore::open(&path, spanish_english(), MemoryPreferences::new())
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Load(LoadError::RaggedRow {
            line: 2,
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn test_missing_table_file() {
    let dir = TempDir::new().unwrap();
    let err = TranslationStore::open(
        &dir.path().join("absent.csv"),
        spanish_english(),
        MemoryPreferences::new(),
    )
    .unwrap_err();
    assert!(matches!(err, StoreError::Load(LoadError::Io { .. })));
}

#[test]
fn test_file_backed_session_round_trip() {
    let dir = TempDir::new().unwrap();
    let table = dir.path().join("strings.csv");
    let config_path = dir.path().join("transtable.yaml");
    let prefs_path = dir.path().join("prefs.json");

    fs::write(&table, TABLE).unwrap();
    fs::write(
        &config_path,
        "enable_debug_logging: false\navailable_languages:\n  - Spanish\n  - English\n",
    )
    .unwrap();

    let config = StoreConfig::load(&config_path).unwrap();
    let mut first =
        TranslationStore::open(&table, config.clone(), JsonFilePreferences::open(&prefs_path))
            .unwrap();
    assert_eq!(first.translation("welcome").as_deref(), Some("Hola"));
    first.select_language("English").unwrap();

    let second =
        TranslationStore::open(&table, config, JsonFilePreferences::open(&prefs_path)).unwrap();
    assert_eq!(second.translation("welcome").as_deref(), Some("Hello"));
    assert_eq!(
        second.preferences().get(DEFAULT_SAVE_KEY, "none"),
        "English"
    );
}

#[test]
fn test_config_with_unknown_extension_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transtable.toml");
    fs::write(&path, "available_languages = []").unwrap();
    assert!(StoreConfig::load(&path).is_err());
}

#[test]
fn test_config_without_languages_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transtable.json");
    fs::write(&path, r#"{"availableLanguages": []}"#).unwrap();
    let err = StoreConfig::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("no languages configured"));
}

#[test]
fn test_startup_keeps_foreign_preference_keys() {
    let dir = TempDir::new().unwrap();
    let prefs_path = dir.path().join("prefs.json");
    fs::write(
        &prefs_path,
        r#"{"preferred_language": "English", "volume": 5}"#,
    )
    .unwrap();

    let store = TranslationStore::from_text(
        "welcome;Hola;Hello",
        spanish_english(),
        JsonFilePreferences::open(&prefs_path),
    )
    .unwrap();
    assert_eq!(store.current_language(), Some(&Language::new("English")));

    let after = fs::read_to_string(&prefs_path).unwrap();
    assert!(after.contains("volume"), "other keys kept: {}", after);
    assert!(after.contains("English"));
}

#[test]
fn test_startup_never_overwrites_unreadable_preferences() {
    let dir = TempDir::new().unwrap();
    let prefs_path = dir.path().join("prefs.json");
    fs::write(&prefs_path, "{ truncated").unwrap();

    let config = StoreConfig {
        enable_debug_logging: true,
        ..spanish_english()
    };
    let store = TranslationStore::from_text(
        "welcome;Hola;Hello",
        config,
        JsonFilePreferences::open(&prefs_path),
    )
    .unwrap();

    // Selection still applies for this session; the file is left alone.
    assert_eq!(store.translation("welcome").as_deref(), Some("Hola"));
    assert_eq!(fs::read_to_string(&prefs_path).unwrap(), "{ truncated");
    assert_eq!(
        store
            .diagnostics()
            .count(transtable::types::DebugLevel::Warning),
        1
    );
}
