//! Local filesystem adapter using std::fs.

use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use kiln_core::{
    application::{ApplicationError, ports::{DirEntry, Filesystem}},
    error::{KilnError, KilnResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> KilnResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> KilnResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_file(&self, path: &Path) -> KilnResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir_all(&self, path: &Path) -> KilnResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn read_dir(&self, path: &Path) -> KilnResult<Vec<DirEntry>> {
        let reader = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;
        let mut entries = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|e| map_io_error(path, e, "list directory"))?;
            let is_dir = entry
                .file_type()
                .map_err(|e| map_io_error(&entry.path(), e, "inspect entry"))?
                .is_dir();
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn walk_files(&self, path: &Path) -> KilnResult<Vec<PathBuf>> {
        let walker = WalkDir::new(path)
            .min_depth(1)
            .follow_links(true)
            .sort_by(|a, b| files_first(a.file_type().is_dir(), b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name())));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.loop_ancestor().is_some() => {
                    warn!(path = ?e.path(), "Skipping symlink loop");
                    continue;
                }
                Err(e) => {
                    let at = e.path().unwrap_or(path).to_path_buf();
                    return Err(map_io_error(
                        &at,
                        io::Error::other(e.to_string()),
                        "walk directory",
                    ));
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(path) {
                files.push(rel.to_path_buf());
            }
        }
        Ok(files)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> KilnResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, &format!("copy to {}", to.display())))
    }
}

fn files_first(a_is_dir: bool, b_is_dir: bool) -> Ordering {
    a_is_dir.cmp(&b_is_dir)
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> KilnError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn walk_lists_files_before_subdirectories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join("a/nested")).unwrap();
        std::fs::write(root.join("a/nested/deep.scss"), "").unwrap();
        std::fs::write(root.join("a/_one.scss"), "").unwrap();
        std::fs::write(root.join("z.scss"), "").unwrap();

        let files = LocalFilesystem::new().walk_files(root).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("z.scss"),
                PathBuf::from("a/_one.scss"),
                PathBuf::from("a/nested/deep.scss"),
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn walk_follows_symlinks() {
        let tmp = TempDir::new().unwrap();
        let shared = tmp.path().join("shared");
        let views = tmp.path().join("views");
        std::fs::create_dir_all(shared.join("parts")).unwrap();
        std::fs::create_dir(&views).unwrap();
        std::fs::write(shared.join("about.tpl"), "<h1>about</h1>").unwrap();
        std::fs::write(shared.join("parts/nav.tpl"), "").unwrap();
        std::os::unix::fs::symlink(shared.join("about.tpl"), views.join("about.tpl")).unwrap();
        std::os::unix::fs::symlink(shared.join("parts"), views.join("parts")).unwrap();
        std::os::unix::fs::symlink(&views, views.join("loop")).unwrap();

        let files = LocalFilesystem::new().walk_files(&views).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("about.tpl"), PathBuf::from("parts/nav.tpl")]
        );
    }

    #[test]
    fn read_dir_is_sorted() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("b.css"), "").unwrap();
        std::fs::write(tmp.path().join("a.css"), "").unwrap();
        std::fs::create_dir(tmp.path().join("critical")).unwrap();

        let entries = LocalFilesystem::new().read_dir(tmp.path()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a.css", "b.css", "critical"]);
        assert!(entries[2].is_dir);
    }

    #[test]
    fn missing_file_maps_to_filesystem_error() {
        let err = LocalFilesystem::new()
            .read_to_string(Path::new("/definitely/not/here.txt"))
            .unwrap_err();
        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn copy_overwrites_destination() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("from.txt");
        let to = tmp.path().join("to.txt");
        std::fs::write(&from, "new").unwrap();
        std::fs::write(&to, "old").unwrap();

        LocalFilesystem::new().copy_file(&from, &to).unwrap();
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "new");
    }
}
