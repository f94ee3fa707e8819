//! Template store that prefers project files over a fallback store.

use std::path::{Path, PathBuf};

use tracing::debug;

use kiln_core::{
    application::{ApplicationError, ports::TemplateStore},
    error::KilnResult,
};

/// Reads `<dir>/<name>` when present, otherwise asks `fallback`.
pub struct FilesystemStore {
    dir: PathBuf,
    fallback: Box<dyn TemplateStore>,
}

impl FilesystemStore {
    pub fn new(dir: impl Into<PathBuf>, fallback: Box<dyn TemplateStore>) -> Self {
        Self {
            dir: dir.into(),
            fallback,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TemplateStore for FilesystemStore {
    fn get(&self, name: &str) -> KilnResult<String> {
        let path = self.dir.join(name);
        if path.is_file() {
            debug!(path = %path.display(), "Using project template override");
            return std::fs::read_to_string(&path).map_err(|e| {
                ApplicationError::FilesystemError {
                    path,
                    reason: format!("Failed to read template: {e}"),
                }
                .into()
            });
        }
        self.fallback.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_store::InMemoryStore;
    use tempfile::TempDir;

    #[test]
    fn project_file_shadows_builtin() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("app.py"), "custom ${main_routes}").unwrap();

        let store = FilesystemStore::new(tmp.path(), Box::new(InMemoryStore::with_builtin()));
        assert_eq!(store.get("app.py").unwrap(), "custom ${main_routes}");
    }

    #[test]
    fn falls_back_when_absent() {
        let tmp = TempDir::new().unwrap();
        let store = FilesystemStore::new(
            tmp.path().join("missing"),
            Box::new(InMemoryStore::with_builtin()),
        );
        assert!(store.get("app.py").unwrap().contains("bottle"));
    }
}
