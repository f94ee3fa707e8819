//! Route entries for the generated application.
//!
//! A route is either a [`ViewRoute`] (renders a page template) or a
//! [`StaticRoute`] (serves a file from a folder). Both are rendered through
//! [`RouteEntry::to_fragment`], so the app template receives one homogeneous
//! list per slot.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use super::error::DomainError;
use super::naming::{is_internal, last_segment, strip_extension};
use super::template::{Fragment, Substitutions, Template, Value};

/// View served at the site root.
pub const INDEX_VIEW: &str = "index";
/// Handler bound to the site root.
pub const ROOT_HANDLER: &str = "load_root";
const HANDLER_PREFIX: &str = "load_";

static VIEW_ROUTE_TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::compile(
        "@route('/${path}')\n\
         def ${method_name}():\n    \
         return template('${template}', request=request, template='${template_name}')\n",
    )
});

static STATIC_ROUTE_TEMPLATE: LazyLock<Template> = LazyLock::new(|| {
    Template::compile(
        "@get('/${path}')\n\
         def load_resource():\n    \
         return static_file('${file}', root='${root}')\n",
    )
});

/// Maps a URL path to a rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRoute {
    pub path: String,
    pub handler: String,
    /// View path without extension, relative to `views/`.
    pub template: String,
    /// Last segment of `template`; exposed to the view as `template`.
    pub template_name: String,
}

/// Maps a URL path to a file under a serving root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    pub path: String,
    pub file: String,
    pub root: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEntry {
    View(ViewRoute),
    Static(StaticRoute),
}

impl RouteEntry {
    /// Pair the entry with its route template.
    pub fn to_fragment(&self) -> Fragment {
        match self {
            Self::View(route) => Fragment::new(
                VIEW_ROUTE_TEMPLATE.clone(),
                Substitutions::new()
                    .with("path", route.path.as_str())
                    .with("method_name", route.handler.as_str())
                    .with("template", route.template.as_str())
                    .with("template_name", route.template_name.as_str()),
            ),
            Self::Static(route) => Fragment::new(
                STATIC_ROUTE_TEMPLATE.clone(),
                Substitutions::new()
                    .with("path", route.path.as_str())
                    .with("file", route.file.as_str())
                    .with("root", route.root.as_str()),
            ),
        }
    }

    pub fn render(&self) -> String {
        self.to_fragment().render()
    }

    pub fn path(&self) -> &str {
        match self {
            Self::View(route) => &route.path,
            Self::Static(route) => &route.path,
        }
    }
}

/// Substitution value for a list of routes.
pub fn routes_value(entries: &[RouteEntry]) -> Value {
    Value::Fragments(entries.iter().map(RouteEntry::to_fragment).collect())
}

/// Handler identifier for a view path: `blog/first-post` → `load_blog__first_post`.
///
/// Separators fold to `__`; any other character that cannot appear in an
/// identifier folds to `_`.
pub fn handler_name(route: &str) -> String {
    if route == INDEX_VIEW {
        return ROOT_HANDLER.to_string();
    }
    let mut handler = String::from(HANDLER_PREFIX);
    for c in route.chars() {
        match c {
            '/' => handler.push_str("__"),
            c if c.is_ascii_alphanumeric() || c == '_' => handler.push(c),
            _ => handler.push('_'),
        }
    }
    handler
}

/// Route paths are emitted inside single-quoted literals.
fn check_view_path(route: &str) -> Result<(), DomainError> {
    if route.contains('\'') {
        return Err(DomainError::InvalidViewPath {
            path: route.to_string(),
            reason: "quotes are not allowed in view paths".to_string(),
        });
    }
    Ok(())
}

/// One view route per non-internal file, in the order given.
///
/// `files` are POSIX paths relative to the views directory. Fails when two
/// paths fold into the same handler identifier.
pub fn view_routes<S: AsRef<str>>(files: &[S]) -> Result<Vec<RouteEntry>, DomainError> {
    let mut handlers: BTreeMap<String, String> = BTreeMap::new();
    let mut entries = Vec::new();

    for file in files {
        let file = file.as_ref();
        if is_internal(last_segment(file)) {
            continue;
        }
        let route = strip_extension(file);
        check_view_path(route)?;

        let handler = handler_name(route);
        if let Some(first) = handlers.get(&handler) {
            return Err(DomainError::HandlerCollision {
                handler,
                first: first.clone(),
                second: route.to_string(),
            });
        }
        handlers.insert(handler.clone(), route.to_string());

        let path = if route == INDEX_VIEW { "" } else { route };
        entries.push(RouteEntry::View(ViewRoute {
            path: path.to_string(),
            handler,
            template: route.to_string(),
            template_name: last_segment(route).to_string(),
        }));
    }
    Ok(entries)
}

/// One static route per file, path and file identical, served from `root`.
pub fn static_routes<S: AsRef<str>>(root: &str, files: &[S]) -> Vec<RouteEntry> {
    files
        .iter()
        .map(|file| {
            let file = file.as_ref().to_string();
            RouteEntry::Static(StaticRoute {
                path: file.clone(),
                file,
                root: root.to_string(),
            })
        })
        .collect()
}

// ============================================================================
// Static folders
// ============================================================================

/// Static sub-folders that get their own route slot in the app template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticFolder {
    Favicon,
    Image,
    Font,
    Css,
    Js,
}

impl StaticFolder {
    pub const ALL: [StaticFolder; 5] = [
        StaticFolder::Favicon,
        StaticFolder::Image,
        StaticFolder::Font,
        StaticFolder::Css,
        StaticFolder::Js,
    ];

    /// Directory name under `static/`.
    pub fn dir(self) -> &'static str {
        match self {
            Self::Favicon => "favicon",
            Self::Image => "img",
            Self::Font => "font",
            Self::Css => "css",
            Self::Js => "js",
        }
    }

    /// Serving root relative to `www/`.
    pub fn root(self) -> String {
        format!("{}/{}", super::layout::STATIC_DIR, self.dir())
    }

    /// App template placeholder receiving this folder's routes.
    pub fn slot(self) -> &'static str {
        match self {
            Self::Favicon => "favicon_routes",
            Self::Image => "image_routes",
            Self::Font => "font_routes",
            Self::Css => "css_routes",
            Self::Js => "js_routes",
        }
    }
}

impl fmt::Display for StaticFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views(entries: &[RouteEntry]) -> Vec<(&str, &str, &str)> {
        entries
            .iter()
            .map(|e| match e {
                RouteEntry::View(v) => (v.path.as_str(), v.handler.as_str(), v.template.as_str()),
                RouteEntry::Static(_) => panic!("expected view route"),
            })
            .collect()
    }

    #[test]
    fn index_and_about() {
        let entries = view_routes(&["index.tpl", "about.tpl"]).unwrap();
        assert_eq!(
            views(&entries),
            vec![("", "load_root", "index"), ("about", "load_about", "about")]
        );
    }

    #[test]
    fn internal_views_are_skipped() {
        let entries = view_routes(&["~head.tpl", "contact.tpl", "blog/~sidebar.tpl"]).unwrap();
        assert_eq!(views(&entries), vec![("contact", "load_contact", "contact")]);
    }

    #[test]
    fn nested_views_fold_separators() {
        let entries = view_routes(&["blog/first-post.tpl"]).unwrap();
        let RouteEntry::View(route) = &entries[0] else {
            panic!("expected view route");
        };
        assert_eq!(route.path, "blog/first-post");
        assert_eq!(route.handler, "load_blog__first_post");
        assert_eq!(route.template_name, "first-post");
    }

    #[test]
    fn nested_index_is_not_the_root() {
        let entries = view_routes(&["docs/index.tpl"]).unwrap();
        assert_eq!(views(&entries), vec![("docs/index", "load_docs__index", "docs/index")]);
    }

    #[test]
    fn colliding_handlers_are_rejected() {
        let err = view_routes(&["a-b.tpl", "a_b.tpl"]).unwrap_err();
        assert_eq!(
            err,
            DomainError::HandlerCollision {
                handler: "load_a_b".into(),
                first: "a-b".into(),
                second: "a_b".into(),
            }
        );
    }

    #[test]
    fn view_named_root_collides_with_index() {
        let err = view_routes(&["index.tpl", "root.tpl"]).unwrap_err();
        assert!(matches!(err, DomainError::HandlerCollision { .. }));
    }

    #[test]
    fn quoted_names_are_rejected() {
        let err = view_routes(&["it's.tpl"]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidViewPath { .. }));
    }

    #[test]
    fn any_other_name_is_routable() {
        let entries = view_routes(&["page.v2.tpl", "café.tpl", "about us.tpl"]).unwrap();
        assert_eq!(
            views(&entries),
            vec![
                ("page.v2", "load_page_v2", "page.v2"),
                ("café", "load_caf_", "café"),
                ("about us", "load_about_us", "about us"),
            ]
        );
    }

    #[test]
    fn folded_punctuation_can_collide() {
        let err = view_routes(&["page.v2.tpl", "page-v2.tpl"]).unwrap_err();
        assert!(matches!(err, DomainError::HandlerCollision { .. }));
    }

    #[test]
    fn static_route_for_single_file() {
        let entries = static_routes("static/img", &["logo.png"]);
        assert_eq!(
            entries,
            vec![RouteEntry::Static(StaticRoute {
                path: "logo.png".into(),
                file: "logo.png".into(),
                root: "static/img".into(),
            })]
        );
    }

    #[test]
    fn view_route_renders_handler_source() {
        let entries = view_routes(&["about.tpl"]).unwrap();
        assert_eq!(
            entries[0].render(),
            "@route('/about')\n\
             def load_about():\n    \
             return template('about', request=request, template='about')\n"
        );
    }

    #[test]
    fn static_route_renders_handler_source() {
        let entries = static_routes("static/font", &["sans/regular.woff2"]);
        assert_eq!(
            entries[0].render(),
            "@get('/sans/regular.woff2')\n\
             def load_resource():\n    \
             return static_file('sans/regular.woff2', root='static/font')\n"
        );
    }

    #[test]
    fn routes_value_joins_fragments() {
        let entries = static_routes("static/js", &["a.js", "b.js"]);
        let text = routes_value(&entries).resolve();
        assert_eq!(text.matches("@get(").count(), 2);
        assert!(text.contains("root='static/js')\n\n@get('/b.js')"));
    }

    #[test]
    fn static_folders() {
        assert_eq!(StaticFolder::Image.root(), "static/img");
        assert_eq!(StaticFolder::Js.slot(), "js_routes");
        assert_eq!(StaticFolder::ALL.len(), 5);
    }
}
