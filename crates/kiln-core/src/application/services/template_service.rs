//! Template Service - blueprint loading and rendering to disk.

use std::path::Path;

use tracing::debug;

use crate::{
    application::ports::{Filesystem, TemplateStore},
    domain::{DomainError, Substitutions, Template},
    error::KilnResult,
};

/// Name of the application entry-point blueprint.
pub const APP_TEMPLATE: &str = "app.py";

/// Service for template operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Fetch a blueprint by name and compile its banners.
    pub fn load(&self, name: &str) -> KilnResult<Template> {
        let blueprint = self.store.get(name)?;
        if blueprint.trim().is_empty() {
            return Err(DomainError::EmptyTemplate { name: name.into() }.into());
        }
        Ok(Template::compile(&blueprint))
    }
}

/// Substitute `values` into `template` and write the result to `destination`.
///
/// The destination is overwritten. Write failures surface unchanged.
pub fn render_to(
    fs: &dyn Filesystem,
    template: &Template,
    destination: &Path,
    values: &Substitutions,
) -> KilnResult<()> {
    let text = template.substitute(values);
    debug!(path = %destination.display(), bytes = text.len(), "Rendering template");
    fs.write_file(destination, &text)
}
