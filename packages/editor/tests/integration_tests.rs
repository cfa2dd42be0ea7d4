//! Integration tests for editor crate

use mailblocks_common::{validate, DocumentStore, FileStore, MemoryStore};
use mailblocks_editor::{
    EditResult, Editor, EditorConfig, EditorError, IdStrategy, Mutation, Position,
    DEFAULT_CONFIG_NAME,
};
use mailblocks_model::*;
use serde_json::{json, Value};

const LAUNCH: &str = include_str!("../../model/tests/fixtures/launch.json");

#[test]
fn test_document_lifecycle() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("launch.json");
    std::fs::write(&path, LAUNCH)?;

    let mut store = FileStore::new(&path);
    let mut editor = Editor::open(&store, EditorConfig::default())?;
    assert_eq!(editor.version(), 0);
    assert_eq!(editor.template().rows().len(), 2);

    let result = editor.apply(Mutation::InsertRow {
        index: Position::End,
    })?;
    assert_eq!(result, EditResult::Applied { version: 1 });

    editor.save_to(&mut store)?;
    let reloaded = store.load()?;
    assert_eq!(&reloaded, editor.template());
    assert_eq!(reloaded.rows().len(), 3);
    Ok(())
}

#[test]
fn test_save_preserves_unknown_keys_and_counters() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("launch.json");
    std::fs::write(&path, LAUNCH).unwrap();

    let mut store = FileStore::new(&path);
    let editor = Editor::open(&store, EditorConfig::default()).unwrap();
    editor.save_to(&mut store).unwrap();

    let original: Value = serde_json::from_str(LAUNCH).unwrap();
    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved, original);
    assert_eq!(saved["schemaVersion"], json!(18));
    assert_eq!(saved["counters"], original["counters"]);
}

#[test]
fn test_edits_do_not_touch_counters() {
    let template: Template = serde_json::from_str(LAUNCH).unwrap();
    let counters = template.counters.clone();
    let mut store = MemoryStore::with_document(template);

    let mut editor = Editor::open(&store, EditorConfig::default()).unwrap();
    let column_id = editor.template().rows()[0].columns[0].id.clone();
    editor
        .insert_from_palette(&column_id, ContentType::Menu, Position::End)
        .unwrap();
    editor.save_to(&mut store).unwrap();

    assert_eq!(store.saves, 1);
    assert_eq!(store.load().unwrap().counters, counters);
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("missing.json"));

    let result = Editor::open(&store, EditorConfig::default());
    assert!(matches!(result, Err(EditorError::Store(_))));
}

#[test]
fn test_config_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(DEFAULT_CONFIG_NAME),
        r#"{ "enforceCapabilities": false, "idStrategy": "sequential" }"#,
    )
    .unwrap();
    let config = EditorConfig::load(dir.path()).unwrap();

    let template: Template = serde_json::from_str(LAUNCH).unwrap();
    let mut editor = Editor::with_config(template, config);

    // The button in the fixture is not deletable unless enforcement is off
    let result = editor
        .apply(Mutation::DeleteContent {
            content_id: "Qh1xVb0mAs".to_string(),
        })
        .unwrap();
    assert!(result.is_applied());

    // Sequential ids are seeded from the body id
    editor
        .apply(Mutation::InsertRow {
            index: Position::End,
        })
        .unwrap();
    let new_row = editor.template().rows().last().unwrap();
    let seed = get_seed("0QFAKPxyzM");
    assert!(new_row.id.starts_with(&format!("{seed}-")));
}

#[test]
fn test_sequential_ids_survive_reopen() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("launch.json");
    std::fs::write(&path, LAUNCH)?;
    let config = EditorConfig {
        id_strategy: IdStrategy::Sequential,
        ..Default::default()
    };
    let mut store = FileStore::new(&path);

    for _ in 0..2 {
        let mut editor = Editor::open(&store, config.clone())?;
        editor.apply(Mutation::InsertRow {
            index: Position::End,
        })?;
        editor.apply(Mutation::DuplicateRow {
            row_id: "-Pm2fEb9Wp".to_string(),
        })?;
        editor.save_to(&mut store)?;
    }

    let saved = store.load()?;
    assert_eq!(saved.rows().len(), 6);
    let report = validate(&saved);
    assert!(report.is_valid(), "{:?}", report.issues);
    Ok(())
}

#[test]
fn test_refusal_leaves_editor_untouched() {
    let template: Template = serde_json::from_str(LAUNCH).unwrap();
    let mut editor = Editor::new(template);
    let before = editor.template().clone();

    let result = editor.apply(Mutation::DeleteContent {
        content_id: "Qh1xVb0mAs".to_string(),
    });

    assert!(matches!(result, Err(EditorError::Mutation(_))));
    assert_eq!(editor.template(), &before);
    assert_eq!(editor.version(), 0);
    assert!(!editor.can_undo());
}

#[test]
fn test_custom_palette_defaults() {
    let template: Template = serde_json::from_str(LAUNCH).unwrap();
    let mut editor = Editor::new(template);

    let mut defaults = editor.palette().defaults(ContentType::Text);
    if let ContentValues::Text(text) = &mut defaults {
        text.text = "<p>Write here</p>".to_string();
    }
    editor.palette_mut().set_defaults(defaults);

    let column_id = editor.template().rows()[0].columns[0].id.clone();
    editor
        .insert_from_palette(&column_id, ContentType::Text, Position::Index(0))
        .unwrap();

    let inserted = &editor.template().rows()[0].columns[0].contents[0];
    let ContentValues::Text(text) = &inserted.values else {
        panic!("expected a text block");
    };
    assert_eq!(text.text, "<p>Write here</p>");
}
