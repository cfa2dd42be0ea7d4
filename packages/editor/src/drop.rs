//! Drop position resolution.
//!
//! A drop names a target block and a side. Moves are realised as
//! remove-then-insert, so when the origin sits earlier in the same column
//! the target index shifts down by one once the block is lifted out.

use crate::mutations::{Mutation, Position};
use crate::session::{DragPayload, Hover, HoverTarget};
use mailblocks_model::{IdSource, Palette};
use serde::{Deserialize, Serialize};

/// Which half of the target the pointer was over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropSide {
    Before,
    After,
}

impl DropSide {
    /// `Before` when the pointer is above the target's vertical midpoint.
    pub fn from_pointer(pointer_y: f64, rect_top: f64, rect_bottom: f64) -> Self {
        let middle = rect_top + (rect_bottom - rect_top) / 2.0;
        if pointer_y < middle {
            DropSide::Before
        } else {
            DropSide::After
        }
    }
}

/// Where a dragged block currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOrigin<'a> {
    pub column_id: &'a str,
    pub index: usize,
}

/// Final insertion index for a drop, in post-removal coordinates.
///
/// `origin` is `None` for fresh palette blocks.
pub fn resolve_drop_index(
    origin: Option<DragOrigin<'_>>,
    target_column_id: &str,
    target_index: usize,
    side: DropSide,
) -> usize {
    match origin {
        Some(origin) if origin.column_id == target_column_id => {
            shifted_index(origin.index, target_index, side)
        }
        _ => match side {
            DropSide::Before => target_index,
            DropSide::After => target_index + 1,
        },
    }
}

/// Index for a new row dropped on the row at `target_index`.
pub fn row_drop_index(target_index: usize, side: DropSide) -> usize {
    match side {
        DropSide::Before => target_index,
        DropSide::After => target_index + 1,
    }
}

/// Index for an existing row moved onto the row at `target_index`.
pub fn row_move_index(origin_index: usize, target_index: usize, side: DropSide) -> usize {
    shifted_index(origin_index, target_index, side)
}

fn shifted_index(origin: usize, target: usize, side: DropSide) -> usize {
    match side {
        DropSide::Before if origin >= target => target,
        DropSide::Before => target - 1,
        DropSide::After if origin >= target => target + 1,
        DropSide::After => target,
    }
}

/// Turn a drag payload and its latched hover into a mutation.
///
/// `None` when the drop does nothing: a block dropped on itself, or a
/// payload over a target that cannot take it.
pub fn plan_drop(
    payload: &DragPayload,
    hover: &Hover,
    palette: &Palette,
    ids: &mut dyn IdSource,
) -> Option<Mutation> {
    match (payload, &hover.target) {
        (
            DragPayload::Palette { content_type },
            HoverTarget::Content {
                column_id, index, ..
            },
        ) => Some(Mutation::InsertContent {
            column_id: column_id.clone(),
            content: palette.instantiate(*content_type, ids),
            index: Position::Index(resolve_drop_index(None, column_id, *index, hover.side)),
        }),

        (DragPayload::Palette { content_type }, HoverTarget::Column { column_id }) => {
            Some(Mutation::InsertContent {
                column_id: column_id.clone(),
                content: palette.instantiate(*content_type, ids),
                index: Position::End,
            })
        }

        (
            DragPayload::Content {
                content_id,
                origin_column_id,
                origin_index,
            },
            HoverTarget::Content {
                target_id,
                column_id,
                index,
            },
        ) => {
            if target_id == content_id {
                return None;
            }
            let origin = DragOrigin {
                column_id: origin_column_id,
                index: *origin_index,
            };
            Some(Mutation::MoveContent {
                content_id: content_id.clone(),
                from_column_id: origin_column_id.clone(),
                to_column_id: column_id.clone(),
                to_index: Position::Index(resolve_drop_index(
                    Some(origin),
                    column_id,
                    *index,
                    hover.side,
                )),
            })
        }

        (
            DragPayload::Content {
                content_id,
                origin_column_id,
                ..
            },
            HoverTarget::Column { column_id },
        ) => Some(Mutation::MoveContent {
            content_id: content_id.clone(),
            from_column_id: origin_column_id.clone(),
            to_column_id: column_id.clone(),
            to_index: Position::End,
        }),

        (DragPayload::NewRow, HoverTarget::Row { index, .. }) => Some(Mutation::InsertRow {
            index: Position::Index(row_drop_index(*index, hover.side)),
        }),

        (DragPayload::NewRow, HoverTarget::Canvas) => Some(Mutation::InsertRow {
            index: Position::End,
        }),

        (
            DragPayload::Row {
                row_id,
                origin_index,
            },
            HoverTarget::Row {
                row_id: target_id,
                index,
            },
        ) => {
            if target_id == row_id {
                return None;
            }
            Some(Mutation::MoveRow {
                row_id: row_id.clone(),
                to_index: Position::Index(row_move_index(*origin_index, *index, hover.side)),
            })
        }

        (DragPayload::Row { row_id, .. }, HoverTarget::Canvas) => Some(Mutation::MoveRow {
            row_id: row_id.clone(),
            to_index: Position::End,
        }),

        _ => None,
    }
}
