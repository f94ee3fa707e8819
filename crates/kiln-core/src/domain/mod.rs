// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Kiln.
//!
//! This module contains the pure text-generation logic of a build. It never
//! touches the filesystem or spawns processes; services in the application
//! layer read inputs through ports and hand plain strings to these functions.
//!
//! ## Layout
//!
//! - [`template`]: banner markers and `${name}` substitution
//! - [`stylesheet`]: import manifests, critical inlining, deferred loading
//! - [`routes`]: view and static route entries
//! - [`head`]: head slots, Open Graph and stylesheet links
//! - [`favicon`]: resolution tables and favicon links
//! - [`layout`]: where inputs and outputs live
//! - [`naming`]: file prefix conventions
pub mod error;
pub mod favicon;
pub mod head;
pub mod layout;
pub mod naming;
pub mod routes;
pub mod stylesheet;
pub mod template;

pub use error::{DomainError, ErrorCategory};
pub use favicon::{FaviconHead, Flavor, Raster};
pub use head::HeadSlot;
pub use layout::{BuildLayout, BuildOptions};
pub use routes::{RouteEntry, StaticFolder, StaticRoute, ViewRoute};
pub use stylesheet::{DeferredStyles, ImportManifest, OutputStyle, Pass};
pub use template::{Banner, Fragment, Substitutions, Template, Value};
