//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "build the site" or "render the favicon set".

pub mod build_service;
pub mod favicon_service;
pub mod head_service;
pub mod route_service;
pub mod stylesheet_service;
pub mod template_service;

pub use build_service::{BuildReport, BuildService, Toolchain};
pub use favicon_service::{FaviconReport, FaviconService};
pub use head_service::HeadService;
pub use route_service::{RouteReport, RouteService};
pub use stylesheet_service::{StylesheetReport, StylesheetService};
pub use template_service::{APP_TEMPLATE, TemplateService, render_to};
