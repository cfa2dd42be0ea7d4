//! # Editor
//!
//! The state container for one open template: the current snapshot, the
//! selection slot, the drag session, undo history and the id source.
//!
//! Intents are processed in arrival order. Each one either swaps in a new
//! snapshot (bumping `version`) or is a no-op.
//!
//! ```text
//! begin_drag ─► hover* ─► drop ─► plan_drop ─► Mutation ─► apply
//!                  └─────► cancel_drag (template untouched)
//! ```

use crate::config::EditorConfig;
use crate::drop::{plan_drop, DropSide};
use crate::errors::EditorError;
use crate::mutations::{EngineOptions, Mutation, MutationOutcome, Position};
use crate::session::{DragPayload, DragSession, HoverTarget, Selection, SelectionKind};
use crate::undo_stack::UndoStack;
use mailblocks_common::DocumentStore;
use mailblocks_model::{find_content, find_row, ContentType, IdSource, Palette, Template};
use std::fmt;
use tracing::{debug, info};

/// Result of an editor intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// The template changed; `version` is the new document version
    Applied { version: u64 },

    /// Nothing changed
    Noop { reason: String },
}

impl EditResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditResult::Applied { .. })
    }

    fn noop(reason: impl Into<String>) -> Self {
        EditResult::Noop {
            reason: reason.into(),
        }
    }
}

pub struct Editor {
    template: Template,

    /// Increments on every change to `template`
    version: u64,

    selection: Option<Selection>,
    drag: Option<DragSession>,
    history: UndoStack,
    ids: Box<dyn IdSource>,
    palette: Palette,
    config: EditorConfig,
    options: EngineOptions,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("version", &self.version)
            .field("selection", &self.selection)
            .field("drag", &self.drag)
            .field("undo_levels", &self.history.undo_levels())
            .field("redo_levels", &self.history.redo_levels())
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// Edit `template` with the default configuration
    pub fn new(template: Template) -> Self {
        Self::with_config(template, EditorConfig::default())
    }

    pub fn with_config(template: Template, config: EditorConfig) -> Self {
        let ids = config.id_source(&template);
        Self {
            version: 0,
            selection: None,
            drag: None,
            history: UndoStack::with_max_levels(config.max_undo_levels),
            ids,
            palette: Palette::default(),
            options: config.engine_options(),
            config,
            template,
        }
    }

    /// Load a template from `store`
    pub fn open(store: &dyn DocumentStore, config: EditorConfig) -> Result<Self, EditorError> {
        let template = store.load()?;
        info!(
            body = %template.body.id,
            rows = template.body.rows.len(),
            "Opened template"
        );
        Ok(Self::with_config(template, config))
    }

    pub fn save_to(&self, store: &mut dyn DocumentStore) -> Result<(), EditorError> {
        store.save(&self.template)?;
        Ok(())
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Replace the whole document.
    ///
    /// Selection, drag session and history all refer to the old document
    /// and are dropped.
    pub fn set_document(&mut self, template: Template) {
        self.ids = self.config.id_source(&template);
        self.template = template;
        self.selection = None;
        self.drag = None;
        self.history.clear();
        self.version += 1;
        info!(body = %self.template.body.id, "Document replaced");
    }

    /// Apply a mutation and record it in history
    pub fn apply(&mut self, mutation: Mutation) -> Result<EditResult, EditorError> {
        let outcome = mutation.apply_with(&self.template, self.ids.as_mut(), &self.options)?;

        match outcome {
            MutationOutcome::Applied(next) => {
                let before = std::mem::replace(&mut self.template, next);
                self.history.record(mutation, &before, &self.template);
                self.version += 1;
                self.clear_stale_selection();
                Ok(EditResult::Applied {
                    version: self.version,
                })
            }
            MutationOutcome::Noop { reason } => Ok(EditResult::Noop { reason }),
        }
    }

    /// Insert a fresh block built from the palette defaults
    pub fn insert_from_palette(
        &mut self,
        column_id: &str,
        content_type: ContentType,
        index: Position,
    ) -> Result<EditResult, EditorError> {
        let content = self.palette.instantiate(content_type, self.ids.as_mut());
        self.apply(Mutation::InsertContent {
            column_id: column_id.to_string(),
            content,
            index,
        })
    }

    /// Group the following edits into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Select a row or block by id.
    ///
    /// Returns `false` when nothing has that id; the current selection is
    /// kept in that case.
    pub fn select(&mut self, id: &str) -> Result<bool, EditorError> {
        let Some(selection) = Selection::resolve(&self.template, id) else {
            return Ok(false);
        };

        if self.config.enforce_capabilities && !self.is_selectable(&selection) {
            return Err(EditorError::NotSelectable(id.to_string()));
        }

        debug!(id, kind = %selection.kind, "Selected");
        self.selection = Some(selection);
        Ok(true)
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    fn is_selectable(&self, selection: &Selection) -> bool {
        match selection.kind {
            SelectionKind::Row => find_row(&self.template, &selection.id)
                .map_or(false, |row| row.values.capabilities.selectable),
            SelectionKind::Content(_) => find_content(&self.template, &selection.id)
                .map_or(false, |location| location.content.capabilities().selectable),
        }
    }

    fn clear_stale_selection(&mut self) {
        if let Some(selection) = &self.selection {
            if !selection.is_valid_in(&self.template) {
                debug!(id = %selection.id, "Selection no longer resolves, cleared");
                self.selection = None;
            }
        }
    }

    /// Start a drag. Any selection is cleared.
    pub fn begin_drag(&mut self, payload: DragPayload) {
        self.selection = None;
        self.drag = Some(DragSession::new(payload));
    }

    /// Latch the hover target and side. `false` when no drag is active.
    pub fn hover(&mut self, target: HoverTarget, side: DropSide) -> bool {
        match &mut self.drag {
            Some(session) => {
                session.hover(target, side);
                true
            }
            None => false,
        }
    }

    /// Latch a hover from pointer geometry over the target's rect
    pub fn hover_pointer(
        &mut self,
        target: HoverTarget,
        pointer_y: f64,
        rect_top: f64,
        rect_bottom: f64,
    ) -> bool {
        self.hover(target, DropSide::from_pointer(pointer_y, rect_top, rect_bottom))
    }

    /// Abandon the drag without touching the template
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Finish the drag at the last latched hover.
    ///
    /// The session ends whatever the outcome.
    pub fn drop(&mut self) -> Result<EditResult, EditorError> {
        let Some(session) = self.drag.take() else {
            return Ok(EditResult::noop("no drag in progress"));
        };
        let Some(hover) = session.latched() else {
            return Ok(EditResult::noop("drag ended without a target"));
        };

        match plan_drop(&session.payload, hover, &self.palette, self.ids.as_mut()) {
            Some(mutation) => self.apply(mutation),
            None => Ok(EditResult::noop("drop has no effect")),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Restore the snapshot before the last edit (or batch)
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.template);
        if undone {
            self.version += 1;
            self.clear_stale_selection();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.template);
        if redone {
            self.version += 1;
            self.clear_stale_selection();
        }
        redone
    }
}
