//! Application layer for Kiln.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (BuildService and one service per generator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer reads and writes through ports and delegates every
//! text decision to `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    BuildReport, BuildService, FaviconReport, FaviconService, HeadService, RouteReport,
    RouteService, StylesheetReport, StylesheetService, TemplateService, Toolchain,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    DirEntry, Filesystem, IconPacker, StylesheetCompiler, SvgRasterizer, TemplateStore,
};

pub use error::{ApplicationError, BuildPhase};
