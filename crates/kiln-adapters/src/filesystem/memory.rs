//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use kiln_core::{
    application::{ApplicationError, ports::{DirEntry, Filesystem}},
    error::KilnResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle after boxing one
/// into a service.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dirs(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.directories.contains(parent),
            _ => true,
        }
    }

    fn collect_files(&self, dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
        for (path, _) in self.files.iter().filter(|(p, _)| p.parent() == Some(dir)) {
            if let Ok(rel) = path.strip_prefix(root) {
                out.push(rel.to_path_buf());
            }
        }
        let subdirs: Vec<&PathBuf> = self
            .directories
            .iter()
            .filter(|d| d.parent() == Some(dir))
            .collect();
        for sub in subdirs {
            self.collect_files(sub, root, out);
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        self.put(path, content);
        self
    }

    /// Add a file in place, creating its parent directories.
    pub fn put(&self, path: impl AsRef<Path>, content: &str) {
        let path = path.as_ref();
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = path.parent() {
            inner.add_dirs(parent);
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.files.clear();
        inner.directories.clear();
    }

    fn read(&self) -> KilnResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn write(&self) -> KilnResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }
}

fn not_found(path: &Path, what: &str) -> kiln_core::error::KilnError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{what} does not exist"),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> KilnResult<()> {
        self.write()?.add_dirs(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()> {
        let mut inner = self.write()?;
        if !inner.parent_exists(path) {
            return Err(not_found(path, "Parent directory"));
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> KilnResult<String> {
        self.read()?
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path, "File"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read().is_ok_and(|inner| inner.files.contains_key(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .is_ok_and(|inner| inner.directories.contains(path))
    }

    fn remove_file(&self, path: &Path) -> KilnResult<()> {
        self.write()?
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path, "File"))
    }

    fn remove_dir_all(&self, path: &Path) -> KilnResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "Directory"));
        }
        inner.files.retain(|p, _| !p.starts_with(path));
        inner.directories.retain(|d| !d.starts_with(path));
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> KilnResult<Vec<DirEntry>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "Directory"));
        }
        let files = inner.files.keys().map(|p| (p, false));
        let dirs = inner.directories.iter().map(|d| (d, true));
        let mut entries: Vec<DirEntry> = files
            .chain(dirs)
            .filter(|(p, _)| p.parent() == Some(path))
            .map(|(p, is_dir)| DirEntry {
                name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                path: p.clone(),
                is_dir,
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn walk_files(&self, path: &Path) -> KilnResult<Vec<PathBuf>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "Directory"));
        }
        let mut out = Vec::new();
        inner.collect_files(path, path, &mut out);
        Ok(out)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> KilnResult<()> {
        let mut inner = self.write()?;
        let content = inner
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| not_found(from, "File"))?;
        if !inner.parent_exists(to) {
            return Err(not_found(to, "Parent directory"));
        }
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());
        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.read_file("/a/b.txt").as_deref(), Some("x"));
    }

    #[test]
    fn walk_matches_local_ordering() {
        let fs = MemoryFilesystem::new()
            .with_file("/r/a/nested/deep.scss", "")
            .with_file("/r/a/_one.scss", "")
            .with_file("/r/z.scss", "");
        let files = fs.walk_files(Path::new("/r")).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("z.scss"),
                PathBuf::from("a/_one.scss"),
                PathBuf::from("a/nested/deep.scss"),
            ]
        );
    }

    #[test]
    fn read_dir_lists_files_and_dirs() {
        let fs = MemoryFilesystem::new()
            .with_file("/css/b.css", "")
            .with_file("/css/critical/styles.css", "");
        let entries = fs.read_dir(Path::new("/css")).unwrap();
        let names: Vec<(&str, bool)> = entries.iter().map(|e| (e.name.as_str(), e.is_dir)).collect();
        assert_eq!(names, [("b.css", false), ("critical", true)]);
    }

    #[test]
    fn remove_dir_all_removes_descendants_only() {
        let fs = MemoryFilesystem::new()
            .with_file("/www/static/favicon/favicon.ico", "")
            .with_file("/www/static/css/a.css", "")
            .with_file("/www/app.py", "");
        fs.remove_dir_all(Path::new("/www/static/css")).unwrap();
        assert!(!fs.exists(Path::new("/www/static/css")));
        assert!(fs.is_file(Path::new("/www/static/favicon/favicon.ico")));
        assert!(fs.is_file(Path::new("/www/app.py")));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let handle = fs.clone();
        fs.put("/x.txt", "shared");
        assert_eq!(handle.read_file("/x.txt").as_deref(), Some("shared"));
    }
}
