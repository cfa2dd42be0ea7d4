//! Comprehensive tests for complex mutation sequences
//!
//! This tests:
//! - Move there and back
//! - Reorders as permutations
//! - Undo/redo sequences
//! - Batched mutations
//! - Document integrity after operations

use mailblocks_common::validate;
use mailblocks_editor::{
    DragPayload, DropSide, Editor, EditorConfig, HoverTarget, IdStrategy, Mutation,
    MutationOutcome, Position, SelectionKind,
};
use mailblocks_model::*;
use serde_json::json;

const LAUNCH: &str = include_str!("../../model/tests/fixtures/launch.json");
const HERO_COLUMN: &str = "aREOk3UC4g";
const LEFT_COLUMN: &str = "EmTZshrUgj";
const HEADING: &str = "wQof8hV6QL";
const TEXT: &str = "F9uBEmRTlh";

fn editor() -> Editor {
    let template: Template = serde_json::from_str(LAUNCH).unwrap();
    let config = EditorConfig {
        id_strategy: IdStrategy::Sequential,
        ..Default::default()
    };
    Editor::with_config(template, config)
}

fn contents_of(template: &Template, column_id: &str) -> Vec<Content> {
    let location = find_column(template, column_id).unwrap();
    column_at(template, location).unwrap().contents.clone()
}

fn assert_intact(template: &Template) {
    assert!(check_invariants(template).is_empty());
    let report = validate(template);
    assert!(report.is_valid(), "{:?}", report.issues);
}

#[test]
fn test_move_there_and_back_restores_column() {
    let mut editor = editor();
    let hero = contents_of(editor.template(), HERO_COLUMN);
    let left = contents_of(editor.template(), LEFT_COLUMN);

    editor
        .apply(Mutation::MoveContent {
            content_id: HEADING.to_string(),
            from_column_id: HERO_COLUMN.to_string(),
            to_column_id: LEFT_COLUMN.to_string(),
            to_index: Position::Index(1),
        })
        .unwrap();
    assert_intact(editor.template());

    editor
        .apply(Mutation::MoveContent {
            content_id: HEADING.to_string(),
            from_column_id: LEFT_COLUMN.to_string(),
            to_column_id: HERO_COLUMN.to_string(),
            to_index: Position::Index(1),
        })
        .unwrap();
    assert_intact(editor.template());

    assert_eq!(contents_of(editor.template(), HERO_COLUMN), hero);
    assert_eq!(contents_of(editor.template(), LEFT_COLUMN), left);
}

#[test]
fn test_same_column_reorders_are_permutations() {
    let mut ids = IDGenerator::from_seed("perm");
    let mut template = Template::blank(&mut ids);
    let mut row = Row::new(&mut ids);
    let column_id = row.columns[0].id.clone();
    for ty in ContentType::ALL {
        row.columns[0]
            .contents
            .push(Palette::default().instantiate(ty, &mut ids));
    }
    template.body.rows.push(row);

    let sorted = |template: &Template| {
        let mut ids: Vec<String> = contents_of(template, &column_id)
            .into_iter()
            .map(|c| c.id)
            .collect();
        ids.sort();
        ids
    };
    let expected = sorted(&template);
    let len = expected.len();

    for from in 0..len {
        for to in 0..len {
            for side in [DropSide::Before, DropSide::After] {
                let mut editor = Editor::new(template.clone());
                let moving = contents_of(editor.template(), &column_id)[from].id.clone();
                let target = contents_of(editor.template(), &column_id)[to].id.clone();

                editor.begin_drag(DragPayload::content(editor.template(), &moving).unwrap());
                editor.hover(
                    HoverTarget::Content {
                        target_id: target,
                        column_id: column_id.clone(),
                        index: to,
                    },
                    side,
                );
                editor.drop().unwrap();

                assert_eq!(sorted(editor.template()), expected);
                assert_intact(editor.template());
            }
        }
    }
}

#[test]
fn test_undo_redo_sequence() {
    let mut editor = editor();
    let original = editor.template().clone();

    editor
        .apply(Mutation::DeleteContent {
            content_id: TEXT.to_string(),
        })
        .unwrap();
    let after_delete = editor.template().clone();

    editor
        .apply(Mutation::UpdateContentValues {
            content_id: HEADING.to_string(),
            patch: json!({ "text": "Launch week" }),
            mode: Default::default(),
        })
        .unwrap();
    let after_update = editor.template().clone();
    assert_eq!(editor.history().undo_levels(), 2);

    assert!(editor.undo());
    assert_eq!(editor.template(), &after_delete);
    assert!(editor.undo());
    assert_eq!(editor.template(), &original);
    assert!(!editor.undo());

    assert!(editor.redo());
    assert!(editor.redo());
    assert_eq!(editor.template(), &after_update);
    assert!(!editor.redo());
}

#[test]
fn test_undo_restores_same_ids() {
    let mut editor = editor();
    let before = editor.template().clone();

    editor
        .apply(Mutation::DuplicateRow {
            row_id: "Wlvn-fimOW".to_string(),
        })
        .unwrap();
    let duplicated = editor.template().clone();

    editor.undo();
    assert_eq!(editor.template(), &before);

    // Redo brings back the copy with the ids it was minted with
    editor.redo();
    assert_eq!(editor.template(), &duplicated);
    assert_intact(editor.template());
}

#[test]
fn test_batched_mutations_undo_together() {
    let mut editor = editor();
    let original = editor.template().clone();

    editor.begin_batch("Build footer");
    editor
        .apply(Mutation::InsertRow {
            index: Position::End,
        })
        .unwrap();
    let row_id = editor.template().rows().last().unwrap().id.clone();
    editor
        .apply(Mutation::SetRowLayout {
            row_id: row_id.clone(),
            cells: vec![1, 1],
        })
        .unwrap();
    let column_id = editor.template().rows().last().unwrap().columns[1].id.clone();
    editor
        .insert_from_palette(&column_id, ContentType::Social, Position::End)
        .unwrap();
    editor.end_batch();

    assert_intact(editor.template());
    assert_eq!(editor.history().undo_levels(), 1);
    assert_eq!(editor.history().undo_description(), Some("Build footer"));

    editor.undo();
    assert_eq!(editor.template(), &original);
    assert_eq!(editor.history().redo_description(), Some("Build footer"));
}

#[test]
fn test_undo_clears_stale_selection() {
    let mut editor = editor();
    let mut ids = IDGenerator::from_seed("x");
    let heading = Palette::default().instantiate(ContentType::Heading, &mut ids);
    let heading_id = heading.id.clone();

    editor
        .apply(Mutation::InsertContent {
            column_id: HERO_COLUMN.to_string(),
            content: heading,
            index: Position::Index(0),
        })
        .unwrap();
    assert!(editor.select(&heading_id).unwrap());
    assert_eq!(
        editor.selection().unwrap().kind,
        SelectionKind::Content(ContentType::Heading)
    );

    editor.undo();
    assert!(editor.selection().is_none());
}

#[test]
fn test_new_edit_discards_redo() {
    let mut editor = editor();
    editor
        .apply(Mutation::InsertRow {
            index: Position::Index(0),
        })
        .unwrap();
    editor.undo();
    assert!(editor.can_redo());

    editor
        .apply(Mutation::SetBodyValues {
            patch: json!({ "backgroundColor": "#fafafa" }),
            mode: Default::default(),
        })
        .unwrap();
    assert!(!editor.can_redo());
}

#[test]
fn test_undo_levels_follow_config() {
    let template: Template = serde_json::from_str(LAUNCH).unwrap();
    let config = EditorConfig {
        max_undo_levels: 3,
        ..Default::default()
    };
    let mut editor = Editor::with_config(template, config);

    for _ in 0..5 {
        editor
            .apply(Mutation::InsertRow {
                index: Position::End,
            })
            .unwrap();
    }

    assert_eq!(editor.history().undo_levels(), 3);
    assert_eq!(editor.template().rows().len(), 7);
    while editor.undo() {}
    assert_eq!(editor.template().rows().len(), 4);
}

#[test]
fn test_long_sequence_keeps_invariants() {
    let mut ids = IDGenerator::from_seed("seq");
    let template: Template = serde_json::from_str(LAUNCH).unwrap();
    let mut current = template;

    let steps = [
        Mutation::InsertRow {
            index: Position::Index(1),
        },
        Mutation::SetRowLayout {
            row_id: "-Pm2fEb9Wp".to_string(),
            cells: vec![2, 1],
        },
        Mutation::DuplicateContent {
            content_id: HEADING.to_string(),
        },
        Mutation::MoveRow {
            row_id: "Wlvn-fimOW".to_string(),
            to_index: Position::Index(0),
        },
        Mutation::SetRowLayout {
            row_id: "Wlvn-fimOW".to_string(),
            cells: vec![1, 1, 1, 1],
        },
        Mutation::DuplicateRow {
            row_id: "-Pm2fEb9Wp".to_string(),
        },
        Mutation::DeleteContent {
            content_id: TEXT.to_string(),
        },
        Mutation::SetRowLayout {
            row_id: "-Pm2fEb9Wp".to_string(),
            cells: vec![1],
        },
    ];

    for step in steps {
        match step.apply(&current, &mut ids).unwrap() {
            MutationOutcome::Applied(next) => current = next,
            MutationOutcome::Noop { reason } => panic!("{}: {reason}", step.name()),
        }
        assert_intact(&current);
    }

    assert_eq!(current.body.rows.len(), 4);
    assert_eq!(current.counters, {
        let original: Template = serde_json::from_str(LAUNCH).unwrap();
        original.counters
    });
}
