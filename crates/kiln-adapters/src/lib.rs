//! Infrastructure adapters for Kiln.
//!
//! This crate implements the ports defined in `kiln-core::application::ports`.
//! It contains all external dependencies, process spawning and I/O.

pub mod builtin_templates;
pub mod filesystem;
pub mod template_store;
pub mod tools;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use template_store::{FilesystemStore, InMemoryStore};
pub use tools::{ImageMagickPacker, InkscapeRasterizer, SassCli, ToolCommand};
