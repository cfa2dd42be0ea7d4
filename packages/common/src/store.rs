use crate::error::CommonError;
use crate::result::CommonResult;
use mailblocks_model::Template;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Load/save collaborator for a single document.
///
/// The persisted layout is the in-memory shape, `counters` and
/// `schemaVersion` included.
pub trait DocumentStore {
    fn load(&self) -> CommonResult<Template>;

    fn save(&mut self, template: &Template) -> CommonResult<()>;
}

/// Pretty-printed JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> CommonResult<Template> {
        if !self.path.exists() {
            return Err(CommonError::NotFound(self.path.clone()));
        }
        let raw = fs::read_to_string(&self.path)?;
        let template: Template = serde_json::from_str(&raw)?;
        info!(path = %self.path.display(), rows = template.body.rows.len(), "Loaded template");
        Ok(template)
    }

    fn save(&mut self, template: &Template) -> CommonResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut json = serde_json::to_string_pretty(template)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "Saved template");
        Ok(())
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<Template>,
    pub saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(template: Template) -> Self {
        Self {
            document: Some(template),
            saves: 0,
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> CommonResult<Template> {
        self.document
            .clone()
            .ok_or_else(|| CommonError::from("memory store is empty"))
    }

    fn save(&mut self, template: &Template) -> CommonResult<()> {
        self.document = Some(template.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_model::{IDGenerator, Row};

    fn sample() -> Template {
        let mut ids = IDGenerator::from_seed("s");
        let mut template = Template::blank(&mut ids);
        template.counters.insert("u_row".to_string(), 4);
        template.body.rows.push(Row::new(&mut ids));
        template
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested/template.json"));
        assert!(!store.exists());

        let template = sample();
        store.save(&template).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, template);
        assert_eq!(loaded.counters.get("u_row"), Some(&4));
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing.json"));
        assert!(matches!(store.load(), Err(CommonError::NotFound(_))));
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(FileStore::new(path).load(), Err(CommonError::Json(_))));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().is_err());

        store.save(&sample()).unwrap();
        assert_eq!(store.saves, 1);
        assert_eq!(store.load().unwrap(), sample());
    }
}
