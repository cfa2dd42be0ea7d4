//! Drag-and-drop scenarios driven through the editor

use mailblocks_common::validate;
use mailblocks_editor::{
    Capability, DragPayload, DropSide, EditResult, Editor, EditorConfig, EditorError, HoverTarget,
    IdStrategy, MutationError,
};
use mailblocks_model::*;

const SOURCE: &str = "col-source";
const OTHER: &str = "col-other";
const EMPTY: &str = "col-empty";

/// One row, three columns: `[A, B, C]`, `[D]` and an empty one
fn abc() -> Template {
    let mut ids = IDGenerator::from_seed("drop");
    let palette = Palette::default();
    let mut template = Template::blank(&mut ids);

    let mut row = Row::new(&mut ids);
    row.id = "row-1".to_string();
    row.cells = vec![1, 1, 1];
    row.columns = [SOURCE, OTHER, EMPTY]
        .iter()
        .map(|id| {
            let mut column = Column::new(&mut ids);
            column.id = id.to_string();
            column
        })
        .collect();

    for (column, names) in [(0, &["A", "B", "C"][..]), (1, &["D"][..])] {
        for name in names {
            let mut content = palette.instantiate(ContentType::Text, &mut ids);
            content.id = name.to_string();
            row.columns[column].contents.push(content);
        }
    }

    template.body.rows.push(row);
    template
}

fn editor() -> Editor {
    let config = EditorConfig {
        id_strategy: IdStrategy::Sequential,
        ..Default::default()
    };
    Editor::with_config(abc(), config)
}

fn ids_in(editor: &Editor, column_id: &str) -> Vec<String> {
    let location = find_column(editor.template(), column_id).unwrap();
    column_at(editor.template(), location)
        .unwrap()
        .contents
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

fn over(editor: &Editor, target_id: &str) -> HoverTarget {
    let location = find_content(editor.template(), target_id).unwrap();
    HoverTarget::Content {
        target_id: target_id.to_string(),
        column_id: location.column_id.to_string(),
        index: location.index,
    }
}

fn drag(editor: &mut Editor, id: &str, target_id: &str, side: DropSide) -> EditResult {
    let payload = DragPayload::content(editor.template(), id).unwrap();
    let target = over(editor, target_id);
    editor.begin_drag(payload);
    editor.hover(target, side);
    let result = editor.drop().unwrap();

    assert!(editor.drag_session().is_none());
    assert!(check_invariants(editor.template()).is_empty());
    assert!(validate(editor.template()).is_valid());
    result
}

#[test]
fn test_first_before_last() {
    let mut editor = editor();
    drag(&mut editor, "A", "C", DropSide::Before);
    assert_eq!(ids_in(&editor, SOURCE), vec!["B", "A", "C"]);
}

#[test]
fn test_last_before_first() {
    let mut editor = editor();
    drag(&mut editor, "C", "A", DropSide::Before);
    assert_eq!(ids_in(&editor, SOURCE), vec!["C", "A", "B"]);
}

#[test]
fn test_last_after_first() {
    let mut editor = editor();
    drag(&mut editor, "C", "A", DropSide::After);
    assert_eq!(ids_in(&editor, SOURCE), vec!["A", "C", "B"]);
}

#[test]
fn test_first_after_last() {
    let mut editor = editor();
    drag(&mut editor, "A", "C", DropSide::After);
    assert_eq!(ids_in(&editor, SOURCE), vec!["B", "C", "A"]);
}

#[test]
fn test_drop_on_itself_is_noop() {
    let mut editor = editor();
    let before = editor.template().clone();

    for side in [DropSide::Before, DropSide::After] {
        let result = drag(&mut editor, "B", "B", side);
        assert!(!result.is_applied());
    }
    assert_eq!(editor.template(), &before);
    assert!(!editor.can_undo());
}

#[test]
fn test_adjacent_drops_keep_order() {
    let mut editor = editor();
    drag(&mut editor, "A", "B", DropSide::Before);
    assert_eq!(ids_in(&editor, SOURCE), vec!["A", "B", "C"]);

    drag(&mut editor, "B", "A", DropSide::After);
    assert_eq!(ids_in(&editor, SOURCE), vec!["A", "B", "C"]);
}

#[test]
fn test_across_columns() {
    let mut editor = editor();
    drag(&mut editor, "B", "D", DropSide::Before);
    assert_eq!(ids_in(&editor, SOURCE), vec!["A", "C"]);
    assert_eq!(ids_in(&editor, OTHER), vec!["B", "D"]);

    drag(&mut editor, "C", "D", DropSide::After);
    assert_eq!(ids_in(&editor, OTHER), vec!["B", "D", "C"]);
}

#[test]
fn test_only_block_moved_out_leaves_empty_column() {
    let mut editor = editor();
    drag(&mut editor, "D", "A", DropSide::Before);

    assert!(ids_in(&editor, OTHER).is_empty());
    assert_eq!(ids_in(&editor, SOURCE), vec!["D", "A", "B", "C"]);
    let row = &editor.template().rows()[0];
    assert_eq!(row.columns.len(), row.cells.len());
}

#[test]
fn test_drop_into_empty_column_appends() {
    let mut editor = editor();
    let payload = DragPayload::content(editor.template(), "B").unwrap();
    editor.begin_drag(payload);
    editor.hover(
        HoverTarget::Column {
            column_id: EMPTY.to_string(),
        },
        DropSide::Before,
    );
    editor.drop().unwrap();

    assert_eq!(ids_in(&editor, EMPTY), vec!["B"]);
    assert_eq!(ids_in(&editor, SOURCE), vec!["A", "C"]);
}

#[test]
fn test_palette_drop_creates_fresh_block() {
    let mut editor = editor();
    let target = over(&editor, "B");
    editor.begin_drag(DragPayload::Palette {
        content_type: ContentType::Button,
    });
    editor.hover(target, DropSide::After);
    editor.drop().unwrap();

    let ids = ids_in(&editor, SOURCE);
    assert_eq!(ids.len(), 4);
    assert_eq!(ids[..2], ["A", "B"]);
    assert_eq!(ids[3], "C");

    let fresh = find_content(editor.template(), &ids[2]).unwrap().content;
    assert_eq!(fresh.content_type(), ContentType::Button);
    assert_eq!(fresh.values, editor.palette().defaults(ContentType::Button));
}

#[test]
fn test_latched_side_wins() {
    let mut editor = editor();
    let payload = DragPayload::content(editor.template(), "A").unwrap();
    let target = over(&editor, "C");

    editor.begin_drag(payload);
    editor.hover(target.clone(), DropSide::After);
    editor.hover_pointer(target, 10.0, 0.0, 100.0);
    editor.drop().unwrap();

    // The last hover (upper half) decides
    assert_eq!(ids_in(&editor, SOURCE), vec!["B", "A", "C"]);
}

#[test]
fn test_drop_into_blocked_column_is_refused() {
    let mut editor = editor();
    editor
        .apply(mailblocks_editor::Mutation::UpdateColumnValues {
            row_id: "row-1".to_string(),
            column_index: 1,
            key: "blocked".to_string(),
            value: serde_json::json!(true),
        })
        .unwrap();
    let before = editor.template().clone();

    let payload = DragPayload::content(editor.template(), "A").unwrap();
    let target = over(&editor, "D");
    editor.begin_drag(payload);
    editor.hover(target, DropSide::Before);

    let result = editor.drop();
    assert!(matches!(
        result,
        Err(EditorError::Mutation(MutationError::Refused {
            capability: Capability::Droppable,
            ..
        }))
    ));
    assert_eq!(editor.template(), &before);
    assert!(editor.drag_session().is_none());
}

#[test]
fn test_new_row_drops() {
    let mut editor = editor();
    let first = editor.template().rows()[0].id.clone();

    editor.begin_drag(DragPayload::NewRow);
    editor.hover(
        HoverTarget::Row {
            row_id: first.clone(),
            index: 0,
        },
        DropSide::Before,
    );
    editor.drop().unwrap();
    assert_eq!(editor.template().rows().len(), 2);
    assert_eq!(editor.template().rows()[1].id, first);

    editor.begin_drag(DragPayload::NewRow);
    editor.hover(HoverTarget::Canvas, DropSide::After);
    editor.drop().unwrap();
    let rows = editor.template().rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].id, first);
    assert_eq!(rows[2].cells, vec![1]);
}

#[test]
fn test_row_move_drops() {
    let mut editor = editor();
    editor.begin_drag(DragPayload::NewRow);
    editor.hover(HoverTarget::Canvas, DropSide::After);
    editor.drop().unwrap();
    editor.begin_drag(DragPayload::NewRow);
    editor.hover(HoverTarget::Canvas, DropSide::After);
    editor.drop().unwrap();

    let order = |editor: &Editor| -> Vec<String> {
        editor.template().rows().iter().map(|r| r.id.clone()).collect()
    };
    let original = order(&editor);

    // First row after the last one
    editor.begin_drag(DragPayload::row(editor.template(), &original[0]).unwrap());
    editor.hover(
        HoverTarget::Row {
            row_id: original[2].clone(),
            index: 2,
        },
        DropSide::After,
    );
    editor.drop().unwrap();
    assert_eq!(
        order(&editor),
        vec![original[1].clone(), original[2].clone(), original[0].clone()]
    );

    // Onto itself
    let current = order(&editor);
    editor.begin_drag(DragPayload::row(editor.template(), &current[1]).unwrap());
    editor.hover(
        HoverTarget::Row {
            row_id: current[1].clone(),
            index: 1,
        },
        DropSide::Before,
    );
    assert!(!editor.drop().unwrap().is_applied());
    assert_eq!(order(&editor), current);
}
