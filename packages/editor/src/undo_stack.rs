//! # Undo/Redo Stack
//!
//! Tracks edit history and enables undo/redo.
//!
//! ## Design
//!
//! - Each edit records the template before and after it was applied
//! - Undo restores the "before" snapshot and moves the batch to redo
//! - Redo restores the "after" snapshot
//! - New edits clear the redo stack
//! - Batched edits (one drag, one panel gesture) undo as a single step
//!
//! Mutations that mint ids cannot be replayed to the same result, so
//! history keeps snapshots rather than inverse mutations.

use crate::mutations::Mutation;
use mailblocks_model::Template;

/// A group of edits that should be undone/redone together
#[derive(Debug, Clone)]
pub struct EditBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// Template before the first mutation
    pub before: Template,

    /// Template after the last mutation
    pub after: Template,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl EditBatch {
    /// Create a single-mutation batch
    pub fn single(mutation: Mutation, before: Template, after: Template) -> Self {
        Self {
            mutations: vec![mutation],
            before,
            after,
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Default)]
struct OpenBatch {
    description: Option<String>,
    batch: Option<EditBatch>,
}

/// Undo/redo stack for template editing
#[derive(Debug)]
pub struct UndoStack {
    /// Applied batches (most recent last)
    undo_stack: Vec<EditBatch>,

    /// Undone batches (most recent last)
    redo_stack: Vec<EditBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<OpenBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record an applied mutation
    pub fn record(&mut self, mutation: Mutation, before: &Template, after: &Template) {
        if let Some(open) = &mut self.current_batch {
            match &mut open.batch {
                Some(batch) => {
                    batch.mutations.push(mutation);
                    batch.after = after.clone();
                }
                None => {
                    open.batch = Some(EditBatch::single(mutation, before.clone(), after.clone()));
                }
            }
        } else {
            let batch = EditBatch::single(mutation, before.clone(), after.clone());
            self.push_batch(batch);
        }
    }

    /// Start a batch of edits (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(OpenBatch::default());
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(open) = self.current_batch.take() {
            if let Some(mut batch) = open.batch {
                batch.description = open.description;
                self.push_batch(batch);
            }
        }
    }

    pub fn is_batching(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(open) = &mut self.current_batch {
            open.description = Some(description.into());
        }
    }

    /// Push a batch to the undo stack
    pub fn push_batch(&mut self, batch: EditBatch) {
        self.undo_stack.push(batch);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Undo the most recent batch, restoring its "before" snapshot
    pub fn undo(&mut self, template: &mut Template) -> bool {
        // An open batch is closed first so it can be undone as a whole.
        self.end_batch();

        if let Some(batch) = self.undo_stack.pop() {
            *template = batch.before.clone();
            self.redo_stack.push(batch);
            true
        } else {
            false // Nothing to undo
        }
    }

    /// Redo the most recently undone batch
    pub fn redo(&mut self, template: &mut Template) -> bool {
        if let Some(batch) = self.redo_stack.pop() {
            *template = batch.after.clone();
            self.undo_stack.push(batch);
            true
        } else {
            false // Nothing to redo
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
