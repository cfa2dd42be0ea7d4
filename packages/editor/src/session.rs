//! # Selection and Drag Session
//!
//! Transient interaction state. Neither is ever persisted.
//!
//! A drag session lives from drag-start to drop or cancel. Every hover
//! latches the target and side; the drop uses the latched side and never
//! recomputes it.

use crate::drop::DropSide;
use mailblocks_model::{find_content, find_row_index, ContentType, Template};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a selection points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SelectionKind {
    /// Serialised as `"column"`: selecting a row opens the column layout
    /// controls.
    Row,
    Content(ContentType),
}

impl fmt::Display for SelectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionKind::Row => f.write_str("column"),
            SelectionKind::Content(ty) => write!(f, "{ty}"),
        }
    }
}

impl From<SelectionKind> for String {
    fn from(kind: SelectionKind) -> Self {
        kind.to_string()
    }
}

impl TryFrom<String> for SelectionKind {
    type Error = mailblocks_model::UnknownContentType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "column" | "row" => Ok(SelectionKind::Row),
            other => ContentType::from_str(other).map(SelectionKind::Content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SelectionKind,
}

impl Selection {
    /// Resolve `id` against the template as a row or a content block.
    pub fn resolve(template: &Template, id: &str) -> Option<Self> {
        if find_row_index(template, id).is_some() {
            return Some(Self {
                id: id.to_string(),
                kind: SelectionKind::Row,
            });
        }
        find_content(template, id).map(|location| Self {
            id: id.to_string(),
            kind: SelectionKind::Content(location.content.content_type()),
        })
    }

    /// Whether the selected entity still exists with the same kind.
    pub fn is_valid_in(&self, template: &Template) -> bool {
        Self::resolve(template, &self.id).as_ref() == Some(self)
    }
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// A fresh block from the palette
    Palette { content_type: ContentType },

    /// An existing block
    Content {
        content_id: String,
        origin_column_id: String,
        origin_index: usize,
    },

    /// The new-row placeholder
    NewRow,

    /// An existing row
    Row { row_id: String, origin_index: usize },
}

impl DragPayload {
    /// Payload for dragging an existing block, if it exists.
    pub fn content(template: &Template, content_id: &str) -> Option<Self> {
        find_content(template, content_id).map(|location| DragPayload::Content {
            content_id: content_id.to_string(),
            origin_column_id: location.column_id.to_string(),
            origin_index: location.index,
        })
    }

    /// Payload for dragging an existing row, if it exists.
    pub fn row(template: &Template, row_id: &str) -> Option<Self> {
        find_row_index(template, row_id).map(|origin_index| DragPayload::Row {
            row_id: row_id.to_string(),
            origin_index,
        })
    }
}

/// What the pointer is over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    /// A block at `index` within `column_id`
    Content {
        target_id: String,
        column_id: String,
        index: usize,
    },

    /// The empty area of a column
    Column { column_id: String },

    /// A row at `index` in the body
    Row { row_id: String, index: usize },

    /// The canvas below the last row
    Canvas,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hover {
    pub target: HoverTarget,
    pub side: DropSide,
}

/// One drag, from start to drop or cancel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub payload: DragPayload,
    hover: Option<Hover>,
}

impl DragSession {
    pub fn new(payload: DragPayload) -> Self {
        Self {
            payload,
            hover: None,
        }
    }

    /// Latch the current target and side.
    pub fn hover(&mut self, target: HoverTarget, side: DropSide) {
        self.hover = Some(Hover { target, side });
    }

    pub fn latched(&self) -> Option<&Hover> {
        self.hover.as_ref()
    }
}
