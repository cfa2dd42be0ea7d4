//! # Template Mutations
//!
//! Structural operations on a template, applied the same way whether they
//! come from a drag, a property panel or a script.
//!
//! ## Semantics
//!
//! - Applying is pure: the input template is never modified. An applied
//!   mutation yields a complete new snapshot.
//! - Unknown row, column or content ids are a `Noop`, never an error.
//! - Capability flags (`deletable`, `draggable`, `duplicatable`, blocked
//!   columns) are checked before anything changes; a refusal leaves the
//!   template as it was.
//!
//! ### MoveContent
//! - Delete-then-insert. `to_index` is in post-removal coordinates, which is
//!   what [`crate::drop::resolve_drop_index`] produces.
//!
//! ### Update*Values
//! - Patches are JSON objects merged shallowly or deeply, then decoded back
//!   into the typed values. A patch that does not decode is `InvalidPatch`.

use crate::patch::{self, PatchMode};
use mailblocks_common::{IdCensus, VisitorMut};
use mailblocks_model::{
    find_column, find_content, find_row_index, Column, Content, ContentType, ContentValues,
    IdSource, Row, Template,
};
use mailblocks_style::StyleError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Insertion point in a list: an index, or the end.
///
/// Serialised as an integer; any negative value (conventionally `-1`) means
/// the end. Indices past the end clamp to the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Position {
    Index(usize),
    #[default]
    End,
}

impl Position {
    pub fn resolve(self, len: usize) -> usize {
        match self {
            Position::Index(index) => index.min(len),
            Position::End => len,
        }
    }
}

impl From<i64> for Position {
    fn from(value: i64) -> Self {
        usize::try_from(value).map_or(Position::End, Position::Index)
    }
}

impl From<Position> for i64 {
    fn from(position: Position) -> Self {
        match position {
            Position::Index(index) => i64::try_from(index).unwrap_or(i64::MAX),
            Position::End => -1,
        }
    }
}

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a default single-column row
    InsertRow { index: Position },

    /// Replace a row's cell ratios, resizing its columns to match
    SetRowLayout { row_id: String, cells: Vec<u32> },

    UpdateRowValues {
        row_id: String,
        patch: Value,
        #[serde(default)]
        mode: PatchMode,
    },

    /// Set one named value on one column
    UpdateColumnValues {
        row_id: String,
        column_index: usize,
        key: String,
        value: Value,
    },

    InsertContent {
        column_id: String,
        content: Content,
        index: Position,
    },

    /// Relocate a block, keeping its id and values
    MoveContent {
        content_id: String,
        from_column_id: String,
        to_column_id: String,
        to_index: Position,
    },

    UpdateContentValues {
        content_id: String,
        patch: Value,
        #[serde(default)]
        mode: PatchMode,
    },

    DeleteContent { content_id: String },

    /// Clone a block under a fresh id, right after the original
    DuplicateContent { content_id: String },

    MoveRow { row_id: String, to_index: Position },

    /// Clone a row, regenerating every id inside it
    DuplicateRow { row_id: String },

    DeleteRow { row_id: String },

    SetBodyValues {
        patch: Value,
        #[serde(default)]
        mode: PatchMode,
    },
}

/// Capability a refused mutation lacked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Draggable,
    Duplicatable,
    Deletable,
    /// The target column is not blocked
    Droppable,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Draggable => "draggable",
            Capability::Duplicatable => "duplicatable",
            Capability::Deletable => "deletable",
            Capability::Droppable => "droppable",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("`{id}` is not {capability}")]
    Refused { id: String, capability: Capability },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid patch for {target}: {message}")]
    InvalidPatch { target: String, message: String },

    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    /// The new template snapshot
    Applied(Template),

    /// Nothing changed
    Noop { reason: String },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }

    fn noop(reason: impl Into<String>) -> Self {
        MutationOutcome::Noop {
            reason: reason.into(),
        }
    }
}

/// Engine switches, normally taken from `EditorConfig`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub enforce_capabilities: bool,
    pub reassign_duplicate_ids: bool,
    pub shorthand_fallback: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            enforce_capabilities: true,
            reassign_duplicate_ids: true,
            shorthand_fallback: "0px".to_string(),
        }
    }
}

const ROW_SHORTHANDS: &[&str] = &["padding"];
const COLUMN_SHORTHANDS: &[&str] = &["padding", "borderRadius"];
const CONTENT_SHORTHANDS: &[&str] = &["containerPadding", "padding", "borderRadius"];
// Menu padding is a free-form CSS value edited outside the box controls.
const MENU_SHORTHANDS: &[&str] = &["containerPadding", "borderRadius"];

impl Mutation {
    /// Debug name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertRow { .. } => "insert_row",
            Mutation::SetRowLayout { .. } => "set_row_layout",
            Mutation::UpdateRowValues { .. } => "update_row_values",
            Mutation::UpdateColumnValues { .. } => "update_column_values",
            Mutation::InsertContent { .. } => "insert_content",
            Mutation::MoveContent { .. } => "move_content",
            Mutation::UpdateContentValues { .. } => "update_content_values",
            Mutation::DeleteContent { .. } => "delete_content",
            Mutation::DuplicateContent { .. } => "duplicate_content",
            Mutation::MoveRow { .. } => "move_row",
            Mutation::DuplicateRow { .. } => "duplicate_row",
            Mutation::DeleteRow { .. } => "delete_row",
            Mutation::SetBodyValues { .. } => "set_body_values",
        }
    }

    /// Apply with default engine options
    pub fn apply(
        &self,
        template: &Template,
        ids: &mut dyn IdSource,
    ) -> Result<MutationOutcome, MutationError> {
        self.apply_with(template, ids, &EngineOptions::default())
    }

    #[instrument(skip_all, fields(mutation = self.name()))]
    pub fn apply_with(
        &self,
        template: &Template,
        ids: &mut dyn IdSource,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let mut unique = UniqueIds::new(ids, template);
        let ids: &mut dyn IdSource = &mut unique;
        let result = match self {
            Mutation::InsertRow { index } => Ok(Self::apply_insert_row(template, *index, ids)),

            Mutation::SetRowLayout { row_id, cells } => {
                Self::apply_set_row_layout(template, row_id, cells, ids, options)
            }

            Mutation::UpdateRowValues { row_id, patch, mode } => {
                Self::apply_update_row_values(template, row_id, patch, *mode, options)
            }

            Mutation::UpdateColumnValues {
                row_id,
                column_index,
                key,
                value,
            } => Self::apply_update_column_values(
                template,
                row_id,
                *column_index,
                key,
                value,
                options,
            ),

            Mutation::InsertContent {
                column_id,
                content,
                index,
            } => Self::apply_insert_content(template, column_id, content, *index, ids, options),

            Mutation::MoveContent {
                content_id,
                from_column_id,
                to_column_id,
                to_index,
            } => Self::apply_move_content(
                template,
                content_id,
                from_column_id,
                to_column_id,
                *to_index,
                options,
            ),

            Mutation::UpdateContentValues {
                content_id,
                patch,
                mode,
            } => Self::apply_update_content_values(template, content_id, patch, *mode, options),

            Mutation::DeleteContent { content_id } => {
                Self::apply_delete_content(template, content_id, options)
            }

            Mutation::DuplicateContent { content_id } => {
                Self::apply_duplicate_content(template, content_id, ids, options)
            }

            Mutation::MoveRow { row_id, to_index } => {
                Self::apply_move_row(template, row_id, *to_index, options)
            }

            Mutation::DuplicateRow { row_id } => {
                Self::apply_duplicate_row(template, row_id, ids, options)
            }

            Mutation::DeleteRow { row_id } => Self::apply_delete_row(template, row_id, options),

            Mutation::SetBodyValues { patch, mode } => {
                Self::apply_set_body_values(template, patch, *mode, options)
            }
        };

        match &result {
            Ok(MutationOutcome::Applied(_)) => debug!("Mutation applied"),
            Ok(MutationOutcome::Noop { reason }) => debug!(%reason, "Mutation was a no-op"),
            Err(MutationError::Refused { id, capability }) => {
                warn!(%id, %capability, "Mutation refused")
            }
            Err(e) => warn!(error = %e, "Mutation failed"),
        }

        result
    }

    fn apply_insert_row(
        template: &Template,
        index: Position,
        ids: &mut dyn IdSource,
    ) -> MutationOutcome {
        let mut next = template.clone();
        let at = index.resolve(next.body.rows.len());
        next.body.rows.insert(at, Row::new(ids));
        MutationOutcome::Applied(next)
    }

    fn apply_set_row_layout(
        template: &Template,
        row_id: &str,
        cells: &[u32],
        ids: &mut dyn IdSource,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        if cells.is_empty() {
            return Err(MutationError::InvalidLayout(
                "a row needs at least one cell".to_string(),
            ));
        }
        if let Some(index) = cells.iter().position(|&c| c == 0) {
            return Err(MutationError::InvalidLayout(format!(
                "cell {index} has zero width"
            )));
        }

        let Some(row_index) = find_row_index(template, row_id) else {
            return Ok(row_not_found(row_id));
        };

        // Shrinking drops trailing columns with their contents, so each of
        // them must be deletable.
        if options.enforce_capabilities {
            let discarded = template.body.rows[row_index].columns.iter().skip(cells.len());
            for column in discarded {
                if !column.values.is_deletable() {
                    return Err(refused(&column.id, Capability::Deletable));
                }
                if let Some(content) = column.contents.iter().find(|c| !c.capabilities().deletable)
                {
                    return Err(refused(&content.id, Capability::Deletable));
                }
            }
        }

        let mut next = template.clone();
        let row = &mut next.body.rows[row_index];
        row.columns.truncate(cells.len());
        while row.columns.len() < cells.len() {
            row.columns.push(Column::new(ids));
        }
        row.cells = cells.to_vec();

        Ok(MutationOutcome::Applied(next))
    }

    fn apply_update_row_values(
        template: &Template,
        row_id: &str,
        patch: &Value,
        mode: PatchMode,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(row_index) = find_row_index(template, row_id) else {
            return Ok(row_not_found(row_id));
        };

        let values = patch::apply_patch(
            &template.body.rows[row_index].values,
            patch,
            mode,
            ROW_SHORTHANDS,
            &options.shorthand_fallback,
            row_id,
        )?;

        let mut next = template.clone();
        next.body.rows[row_index].values = values;
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_update_column_values(
        template: &Template,
        row_id: &str,
        column_index: usize,
        key: &str,
        value: &Value,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(row_index) = find_row_index(template, row_id) else {
            return Ok(row_not_found(row_id));
        };
        let Some(column) = template.body.rows[row_index].columns.get(column_index) else {
            return Ok(MutationOutcome::noop(format!(
                "row `{row_id}` has no column at index {column_index}"
            )));
        };

        let mut patch = serde_json::Map::new();
        patch.insert(key.to_string(), value.clone());
        let values = patch::apply_patch(
            &column.values,
            &Value::Object(patch),
            PatchMode::Shallow,
            COLUMN_SHORTHANDS,
            &options.shorthand_fallback,
            &column.id,
        )?;

        let mut next = template.clone();
        next.body.rows[row_index].columns[column_index].values = values;
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_insert_content(
        template: &Template,
        column_id: &str,
        content: &Content,
        index: Position,
        ids: &mut dyn IdSource,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(location) = find_column(template, column_id) else {
            return Ok(column_not_found(column_id));
        };

        let mut next = template.clone();
        let column = &mut next.body.rows[location.row_index].columns[location.column_index];
        if options.enforce_capabilities && column.values.is_blocked() {
            return Err(refused(column_id, Capability::Droppable));
        }

        let mut content = content.clone();
        if options.reassign_duplicate_ids && IdCensus::of(template).contains(&content.id) {
            let fresh = ids.new_id();
            warn!(id = %content.id, %fresh, "Inserted block id already in use, reassigned");
            content.id = fresh;
        }

        let at = index.resolve(column.contents.len());
        column.contents.insert(at, content);
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_move_content(
        template: &Template,
        content_id: &str,
        from_column_id: &str,
        to_column_id: &str,
        to_index: Position,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(from) = find_column(template, from_column_id) else {
            return Ok(column_not_found(from_column_id));
        };
        let Some(to) = find_column(template, to_column_id) else {
            return Ok(column_not_found(to_column_id));
        };
        let from_column = &template.body.rows[from.row_index].columns[from.column_index];
        let Some(origin) = from_column.position_of(content_id) else {
            return Ok(MutationOutcome::noop(format!(
                "content `{content_id}` is not in column `{from_column_id}`"
            )));
        };

        if options.enforce_capabilities {
            if !from_column.contents[origin].capabilities().draggable {
                return Err(refused(content_id, Capability::Draggable));
            }
            let to_column = &template.body.rows[to.row_index].columns[to.column_index];
            if from != to && to_column.values.is_blocked() {
                return Err(refused(to_column_id, Capability::Droppable));
            }
        }

        let mut next = template.clone();
        let moved = next.body.rows[from.row_index].columns[from.column_index]
            .contents
            .remove(origin);
        let destination = &mut next.body.rows[to.row_index].columns[to.column_index].contents;
        let at = to_index.resolve(destination.len());
        destination.insert(at, moved);

        Ok(MutationOutcome::Applied(next))
    }

    fn apply_update_content_values(
        template: &Template,
        content_id: &str,
        patch: &Value,
        mode: PatchMode,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(location) = find_content(template, content_id) else {
            return Ok(content_not_found(content_id));
        };

        let content = location.content;
        let content_type = content.content_type();
        let shorthands = match content_type {
            ContentType::Menu => MENU_SHORTHANDS,
            _ => CONTENT_SHORTHANDS,
        };

        let patch_map = patch::as_object(patch, content_id)?;
        let mut merged = patch::encode(&content.values, content_id)?;
        patch::merge(&mut merged, patch_map, mode);
        patch::normalize_shorthands(&mut merged, patch_map, shorthands, &options.shorthand_fallback);
        let values = ContentValues::from_json(content_type, Value::Object(merged))
            .map_err(|e| patch::invalid(content_id, e))?;

        let mut next = template.clone();
        next.body.rows[location.row_index].columns[location.column_index].contents
            [location.index]
            .values = values;
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_delete_content(
        template: &Template,
        content_id: &str,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(location) = find_content(template, content_id) else {
            return Ok(content_not_found(content_id));
        };
        if options.enforce_capabilities && !location.content.capabilities().deletable {
            return Err(refused(content_id, Capability::Deletable));
        }

        let mut next = template.clone();
        next.body.rows[location.row_index].columns[location.column_index]
            .contents
            .remove(location.index);
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_duplicate_content(
        template: &Template,
        content_id: &str,
        ids: &mut dyn IdSource,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(location) = find_content(template, content_id) else {
            return Ok(content_not_found(content_id));
        };
        if options.enforce_capabilities {
            if !location.content.capabilities().duplicatable {
                return Err(refused(content_id, Capability::Duplicatable));
            }
            let column = &template.body.rows[location.row_index].columns[location.column_index];
            if column.values.is_blocked() {
                return Err(refused(location.column_id, Capability::Droppable));
            }
        }

        let mut copy = location.content.clone();
        copy.id = ids.new_id();

        let mut next = template.clone();
        next.body.rows[location.row_index].columns[location.column_index]
            .contents
            .insert(location.index + 1, copy);
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_move_row(
        template: &Template,
        row_id: &str,
        to_index: Position,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(origin) = find_row_index(template, row_id) else {
            return Ok(row_not_found(row_id));
        };
        if options.enforce_capabilities && !template.body.rows[origin].values.capabilities.draggable
        {
            return Err(refused(row_id, Capability::Draggable));
        }

        let mut next = template.clone();
        let row = next.body.rows.remove(origin);
        let at = to_index.resolve(next.body.rows.len());
        next.body.rows.insert(at, row);
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_duplicate_row(
        template: &Template,
        row_id: &str,
        ids: &mut dyn IdSource,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(origin) = find_row_index(template, row_id) else {
            return Ok(row_not_found(row_id));
        };
        let row = &template.body.rows[origin];
        if options.enforce_capabilities && !row.values.capabilities.duplicatable {
            return Err(refused(row_id, Capability::Duplicatable));
        }

        let mut copy = row.clone();
        RegenerateIds { ids }.visit_row_mut(&mut copy);

        let mut next = template.clone();
        next.body.rows.insert(origin + 1, copy);
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_delete_row(
        template: &Template,
        row_id: &str,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let Some(origin) = find_row_index(template, row_id) else {
            return Ok(row_not_found(row_id));
        };
        if options.enforce_capabilities && !template.body.rows[origin].values.capabilities.deletable
        {
            return Err(refused(row_id, Capability::Deletable));
        }

        let mut next = template.clone();
        next.body.rows.remove(origin);
        Ok(MutationOutcome::Applied(next))
    }

    fn apply_set_body_values(
        template: &Template,
        patch: &Value,
        mode: PatchMode,
        options: &EngineOptions,
    ) -> Result<MutationOutcome, MutationError> {
        let values = patch::apply_patch(
            &template.body.values,
            patch,
            mode,
            &[],
            &options.shorthand_fallback,
            &template.body.id,
        )?;

        let mut next = template.clone();
        next.body.values = values;
        Ok(MutationOutcome::Applied(next))
    }
}

/// Mints ids that are not already used in `template`.
///
/// The set of taken ids is only collected once something asks for an id.
struct UniqueIds<'a> {
    inner: &'a mut dyn IdSource,
    template: &'a Template,
    taken: Option<HashSet<String>>,
}

impl<'a> UniqueIds<'a> {
    fn new(inner: &'a mut dyn IdSource, template: &'a Template) -> Self {
        Self {
            inner,
            template,
            taken: None,
        }
    }
}

impl IdSource for UniqueIds<'_> {
    fn new_id(&mut self) -> String {
        let template = self.template;
        let taken = self.taken.get_or_insert_with(|| {
            IdCensus::of(template).ids().map(str::to_string).collect()
        });
        loop {
            let id = self.inner.new_id();
            if taken.insert(id.clone()) {
                return id;
            }
            debug!(%id, "Skipping id already in use");
        }
    }
}

/// Gives a copied subtree fresh ids throughout
struct RegenerateIds<'a> {
    ids: &'a mut dyn IdSource,
}

impl VisitorMut for RegenerateIds<'_> {
    fn visit_row_mut(&mut self, row: &mut Row) {
        row.id = self.ids.new_id();
        mailblocks_common::walk_row_mut(self, row);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        column.id = self.ids.new_id();
        mailblocks_common::walk_column_mut(self, column);
    }

    fn visit_content_mut(&mut self, content: &mut Content) {
        content.id = self.ids.new_id();
    }
}

fn refused(id: &str, capability: Capability) -> MutationError {
    MutationError::Refused {
        id: id.to_string(),
        capability,
    }
}

fn row_not_found(row_id: &str) -> MutationOutcome {
    MutationOutcome::noop(format!("row `{row_id}` not found"))
}

fn column_not_found(column_id: &str) -> MutationOutcome {
    MutationOutcome::noop(format!("column `{column_id}` not found"))
}

fn content_not_found(content_id: &str) -> MutationOutcome {
    MutationOutcome::noop(format!("content `{content_id}` not found"))
}
