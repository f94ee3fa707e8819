//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kiln-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::OutputStyle;
use crate::error::KilnResult;

/// One child of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kiln_adapters::filesystem::LocalFilesystem` (production)
/// - `kiln_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Listings are sorted by name so builds are deterministic across platforms.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KilnResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> KilnResult<()>;

    fn read_to_string(&self, path: &Path) -> KilnResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn remove_file(&self, path: &Path) -> KilnResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> KilnResult<()>;

    /// Immediate children of `path`, sorted by name.
    fn read_dir(&self, path: &Path) -> KilnResult<Vec<DirEntry>>;

    /// Every regular file below `path`, relative to it, in walk order.
    ///
    /// Files of a directory come before its subdirectories' files; siblings
    /// are sorted by name.
    fn walk_files(&self, path: &Path) -> KilnResult<Vec<PathBuf>>;

    /// Copy a single file, overwriting `to`.
    fn copy_file(&self, from: &Path, to: &Path) -> KilnResult<()>;
}

/// Port for the SCSS compiler.
pub trait StylesheetCompiler: Send + Sync {
    /// Compile one stylesheet source file and return the CSS text.
    fn compile(&self, source: &Path, style: OutputStyle) -> KilnResult<String>;
}

/// Port for SVG → PNG rendering.
pub trait SvgRasterizer: Send + Sync {
    /// Render `svg` as a `size`×`size` PNG at `destination`.
    fn rasterize(&self, svg: &Path, destination: &Path, size: u32) -> KilnResult<()>;
}

/// Port for packing PNGs into a multi-resolution ICO.
pub trait IconPacker: Send + Sync {
    fn pack(&self, pngs: &[PathBuf], destination: &Path) -> KilnResult<()>;
}

/// Port for template storage and retrieval.
///
/// Implemented by:
/// - `kiln_adapters::template_store::InMemoryStore` (built-in templates)
/// - `kiln_adapters::template_store::FilesystemStore` (project overrides)
pub trait TemplateStore: Send + Sync {
    /// Blueprint text of the named template.
    fn get(&self, name: &str) -> KilnResult<String>;
}
