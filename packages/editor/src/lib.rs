//! # Mailblocks Editor
//!
//! Mutation protocol and editing state for Mailblocks templates.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Template → Row → Column → Content    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Editor state + mutations            │
//! │  - Pure mutation engine (snapshot in/out)   │
//! │  - Drop position resolution                 │
//! │  - Selection and drag session               │
//! │  - Snapshot undo/redo                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ common: DocumentStore (load / save)         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Template is source of truth**: selection and drag state only point
//!    into it by id
//! 2. **One path for every trigger**: drags, panels and scripts all produce
//!    a [`Mutation`]
//! 3. **Snapshots**: a mutation yields a whole new template or a no-op
//! 4. **Single writer**: the [`Editor`] owns everything it mutates
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mailblocks_common::FileStore;
//! use mailblocks_editor::{Editor, EditorConfig, Mutation, Position};
//!
//! let mut store = FileStore::new("newsletter.json");
//! let mut editor = Editor::open(&store, EditorConfig::default())?;
//!
//! editor.apply(Mutation::InsertRow { index: Position::End })?;
//! editor.save_to(&mut store)?;
//! ```

mod config;
mod drop;
mod editor;
mod errors;
mod mutations;
mod patch;
mod session;
mod undo_stack;

pub use config::{EditorConfig, IdStrategy, DEFAULT_CONFIG_NAME};
pub use drop::{
    plan_drop, resolve_drop_index, row_drop_index, row_move_index, DragOrigin, DropSide,
};
pub use editor::{EditResult, Editor};
pub use errors::EditorError;
pub use mutations::{
    Capability, EngineOptions, Mutation, MutationError, MutationOutcome, Position,
};
pub use patch::{merge, PatchMode};
pub use session::{DragPayload, DragSession, Hover, HoverTarget, Selection, SelectionKind};
pub use undo_stack::{EditBatch, UndoStack};

// Re-export common types for convenience
pub use mailblocks_model::{Content, ContentType, Template};
