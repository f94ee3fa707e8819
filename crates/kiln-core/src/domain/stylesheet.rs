//! Critical / non-critical stylesheet logic.
//!
//! Everything here is a pure function of its inputs; the stylesheet service
//! does the reading, compiling and writing.
//!
//! ## Passes
//!
//! | Pass | Source | Output | Lifetime |
//! |------|--------|--------|----------|
//! | critical | `sass/*.scss` | `css/critical/*.css` | inlined into views, then deleted |
//! | non-critical | `sass/non-critical/*.scss` | `css/*.css` | served, loaded deferred |

use std::collections::BTreeSet;
use std::fmt;

use super::naming::{is_partial, stem};

/// Aggregate import file regenerated for every pass.
pub const MANIFEST_NAME: &str = "_all.scss";
/// Base name of the stylesheet linked on every page.
pub const GENERAL_STYLESHEET: &str = "styles";
pub const MODULES_DIR: &str = "modules";
pub const PARTIALS_DIR: &str = "partials";
pub const NON_CRITICAL_DIR: &str = "non-critical";
pub const CRITICAL_DIR: &str = "critical";
pub const SASS_CACHE_DIR: &str = ".sass-cache";

/// Name of the marked block appended to the shared footer.
pub const DEFERRED_BLOCK: &str = "deferred-styles";

const SASS_EXTENSIONS: &[&str] = &["scss", "sass"];

/// Compiler output formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    Expanded,
    Compressed,
}

impl OutputStyle {
    pub fn for_deploy(deploy: bool) -> Self {
        if deploy {
            Self::Compressed
        } else {
            Self::Expanded
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::Compressed => "compressed",
        }
    }
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which product set a compilation pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Critical,
    NonCritical,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => f.write_str("critical"),
            Self::NonCritical => f.write_str("non-critical"),
        }
    }
}

/// `.scss` / `.sass`, case-insensitive.
pub fn has_sass_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| SASS_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// A file that belongs in an import manifest.
///
/// The manifest itself never imports itself.
pub fn is_import_candidate(name: &str) -> bool {
    has_sass_extension(name) && name != MANIFEST_NAME
}

/// A file compiled to its own `.css` output.
pub fn is_compile_target(name: &str) -> bool {
    has_sass_extension(name) && !is_partial(name)
}

/// `styles.scss` → `styles.css`.
pub fn css_file_name(source_name: &str) -> String {
    format!("{}.css", stem(source_name))
}

// ============================================================================
// Import manifest
// ============================================================================

/// The `_all.scss` aggregate: modules strictly before partials.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportManifest {
    modules: Vec<String>,
    partials: Vec<String>,
}

impl ImportManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module import (mixins, variables). Path must be POSIX.
    pub fn add_module(&mut self, path: impl Into<String>) {
        self.modules.push(path.into());
    }

    pub fn add_partial(&mut self, path: impl Into<String>) {
        self.partials.push(path.into());
    }

    pub fn len(&self) -> usize {
        self.modules.len() + self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Import paths in emission order.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.modules
            .iter()
            .chain(self.partials.iter())
            .map(String::as_str)
    }

    /// One `@import "path";` line per entry.
    pub fn render(&self) -> String {
        self.imports()
            .map(|path| format!("@import \"{}\";", path.replace('\\', "/")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ============================================================================
// Critical inlining
// ============================================================================

/// General critical CSS followed by the page's own critical CSS.
pub fn embedded_css(general: Option<&str>, page: Option<&str>) -> String {
    let mut css = String::new();
    css.push_str(general.unwrap_or_default());
    css.push_str(page.unwrap_or_default());
    css
}

/// Scripting block that binds `embeded_css` for the view template.
pub fn embedded_block(css: &str) -> String {
    format!("<%\nembeded_css = {}\n%>\n", python_string(css))
}

/// Prepend the embedded block to `view`; `None` when there is nothing to embed.
///
/// Not idempotent: applying it to an already-inlined view prepends again.
pub fn inline_critical(view: &str, embedded: &str) -> Option<String> {
    if embedded.is_empty() {
        return None;
    }
    Some(format!("{}{}", embedded_block(embedded), view))
}

fn python_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Python list literal used by template conditionals: `['a', 'b']`.
pub fn python_list<S: AsRef<str>>(items: &[S]) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.as_ref().replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}

// ============================================================================
// Stylesheet links
// ============================================================================

pub fn stylesheet_link(href: &str) -> String {
    format!("    <link rel=\"stylesheet\" type=\"text/css\" href=\"/{href}\">")
}

/// Link the current view's own sheet when it is one of `pages`.
pub fn page_stylesheet_block<S: AsRef<str>>(pages: &[S]) -> String {
    format!(
        "    % if template in {}:\n    <link rel=\"stylesheet\" type=\"text/css\" href=\"/{{{{template}}}}.css\">\n    % end",
        python_list(pages)
    )
}

// ============================================================================
// Deferred loading
// ============================================================================

const DEFERRED_LOADER: &str = r#"<script>
    var loadDeferredStyles = function() {
        var addStylesNode = document.getElementById("deferred-styles");
        var replacement = document.createElement("div");
        replacement.innerHTML = addStylesNode.textContent;
        document.body.appendChild(replacement);
        addStylesNode.parentElement.removeChild(addStylesNode);
    };
    var raf = window.requestAnimationFrame || window.mozRequestAnimationFrame ||
        window.webkitRequestAnimationFrame || window.msRequestAnimationFrame;
    if (raf) raf(function() { window.setTimeout(loadDeferredStyles, 0); });
    else window.onload = loadDeferredStyles;
</script>"#;

/// Non-critical sheets split into always-loaded and page-gated sets.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeferredStyles {
    shared: Vec<String>,
    pages: Vec<String>,
}

impl DeferredStyles {
    /// Partition persisted sheet base names against the set of view names.
    ///
    /// The general stylesheet is excluded: it is linked from the head.
    pub fn partition<I, S>(sheets: I, views: &BTreeSet<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deferred = Self::default();
        for sheet in sheets {
            let sheet = sheet.into();
            if sheet == GENERAL_STYLESHEET {
                continue;
            }
            if views.contains(&sheet) {
                deferred.pages.push(sheet);
            } else {
                deferred.shared.push(sheet);
            }
        }
        deferred
    }

    pub fn shared(&self) -> &[String] {
        &self.shared
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.shared.is_empty() && self.pages.is_empty()
    }

    /// `<noscript>` fallback plus the script that promotes it into the DOM.
    pub fn render(&self) -> String {
        let mut lines = vec!["<noscript id=\"deferred-styles\">".to_string()];
        lines.extend(
            self.shared
                .iter()
                .map(|sheet| stylesheet_link(&format!("{sheet}.css"))),
        );
        if !self.pages.is_empty() {
            lines.push(page_stylesheet_block(&self.pages));
        }
        lines.push("</noscript>".to_string());
        lines.push(DEFERRED_LOADER.to_string());
        lines.join("\n")
    }
}

// ============================================================================
// Marked blocks
// ============================================================================

fn begin_marker(name: &str) -> String {
    format!("<!-- kiln:{name}:begin -->")
}

fn end_marker(name: &str) -> String {
    format!("<!-- kiln:{name}:end -->")
}

/// Append `body` wrapped in named markers unless the block is already there.
///
/// Returns `None` when `document` already carries the block.
pub fn inject_once(document: &str, name: &str, body: &str) -> Option<String> {
    let begin = begin_marker(name);
    if document.contains(&begin) {
        return None;
    }
    let mut out = String::with_capacity(document.len() + body.len() + 64);
    out.push_str(document);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&begin);
    out.push('\n');
    out.push_str(body);
    out.push('\n');
    out.push_str(&end_marker(name));
    out.push('\n');
    Some(out)
}
