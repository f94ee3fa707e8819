//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kiln-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `StylesheetCompiler`: SCSS → CSS
//!   - `SvgRasterizer`, `IconPacker`: favicon rendering
//!   - `TemplateStore`: Template blueprints
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    DirEntry, Filesystem, IconPacker, StylesheetCompiler, SvgRasterizer, TemplateStore,
};
