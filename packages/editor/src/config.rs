use crate::errors::EditorError;
use crate::mutations::EngineOptions;
use mailblocks_common::IdCensus;
use mailblocks_model::{IDGenerator, IdSource, RandomIds, Template};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "mailblocks.config.json";

/// How the editor mints ids for new rows, columns and blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random v4 UUIDs
    #[default]
    Random,
    /// `{seed}-{n}` counter seeded from the body id
    Sequential,
}

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo levels kept (0 = unlimited)
    #[serde(default = "default_max_undo_levels")]
    pub max_undo_levels: usize,

    /// Refuse edits that capability flags forbid
    #[serde(default = "default_true")]
    pub enforce_capabilities: bool,

    /// Give inserted blocks a fresh id when theirs is already taken
    #[serde(default = "default_true")]
    pub reassign_duplicate_ids: bool,

    /// Replacement for malformed padding/radius shorthands
    #[serde(default = "default_shorthand_fallback")]
    pub shorthand_fallback: String,

    #[serde(default)]
    pub id_strategy: IdStrategy,
}

fn default_max_undo_levels() -> usize {
    100
}

fn default_true() -> bool {
    true
}

fn default_shorthand_fallback() -> String {
    "0px".to_string()
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_file(&config_path)
        } else {
            // Return default config if none exists
            Ok(Self::default())
        }
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let content = std::fs::read_to_string(path)?;
        let config: EditorConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            enforce_capabilities: self.enforce_capabilities,
            reassign_duplicate_ids: self.reassign_duplicate_ids,
            shorthand_fallback: self.shorthand_fallback.clone(),
        }
    }

    /// Id source for editing `template`.
    ///
    /// Sequential ids are seeded from the body id and resume after the
    /// highest counter already present in the document.
    pub fn id_source(&self, template: &Template) -> Box<dyn IdSource> {
        match self.id_strategy {
            IdStrategy::Random => Box::new(RandomIds),
            IdStrategy::Sequential => {
                let mut ids = IDGenerator::new(&template.body.id);
                ids.resume_after(IdCensus::of(template).ids());
                Box::new(ids)
            }
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_undo_levels: default_max_undo_levels(),
            enforce_capabilities: true,
            reassign_duplicate_ids: true,
            shorthand_fallback: default_shorthand_fallback(),
            id_strategy: IdStrategy::Random,
        }
    }
}
