//! Templates that ship inside the binary.
//!
//! Blueprints live as plain files under `crates/kiln-adapters/templates/` and
//! are embedded at compile time, so a build never depends on the working
//! directory. A project can shadow any of them from `dev/templates/` through
//! [`FilesystemStore`](crate::template_store::FilesystemStore).

/// Application entry point: bottle routes, CLI flags and server start-up.
pub const APP: &str = include_str!("../templates/app.py");

const BUILTIN: &[(&str, &str)] = &[("app.py", APP)];

/// Blueprint text of a built-in template.
pub fn get(name: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, text)| *text)
}

/// Names of every built-in template.
pub fn names() -> Vec<&'static str> {
    BUILTIN.iter().map(|(name, _)| *name).collect()
}
