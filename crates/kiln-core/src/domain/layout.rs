//! Input and output directory layout of a build.
//!
//! Every service receives a [`BuildLayout`] instead of relying on the process
//! working directory.
//!
//! ```text
//! <project_root>/                 <build_root>/
//! ├── dev/                        └── www/
//! │   ├── sass/                       ├── app.py
//! │   │   ├── modules/                ├── views/
//! │   │   └── non-critical/           └── static/
//! │   ├── views/                          ├── css/
//! │   ├── py/routes.py                    │   └── critical/   (transient)
//! │   └── templates/  (optional)          ├── favicon/
//! └── res/                                ├── img/
//!     ├── favicon.svg                     ├── font/
//!     ├── static/                         └── js/
//!     ├── img/
//!     └── font/
//! ```

use std::path::{Path, PathBuf};

pub const WWW_DIR: &str = "www";
pub const VIEWS_DIR: &str = "views";
pub const STATIC_DIR: &str = "static";
pub const CSS_DIR: &str = "css";
pub const FAVICON_DIR: &str = "favicon";
pub const APP_FILE: &str = "app.py";
pub const HEAD_TEMPLATE: &str = "~head.tpl";
pub const FOOTER_TEMPLATE: &str = "~footer.tpl";

/// Resolved paths for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    project_root: PathBuf,
    build_root: PathBuf,
}

impl BuildLayout {
    /// `project_root` holds `dev/` and `res/`; `build_root` receives `www/`.
    pub fn new(project_root: impl Into<PathBuf>, build_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            build_root: build_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    // ── inputs ────────────────────────────────────────────────────────────

    pub fn sass_dir(&self) -> PathBuf {
        self.project_root.join("dev").join("sass")
    }

    pub fn views_source(&self) -> PathBuf {
        self.project_root.join("dev").join(VIEWS_DIR)
    }

    /// Hand-authored route source spliced verbatim into the app file.
    pub fn api_routes_source(&self) -> PathBuf {
        self.project_root.join("dev").join("py").join("routes.py")
    }

    /// Project-level overrides for built-in templates.
    pub fn templates_source(&self) -> PathBuf {
        self.project_root.join("dev").join("templates")
    }

    pub fn favicon_svg(&self) -> PathBuf {
        self.project_root.join("res").join("favicon.svg")
    }

    pub fn resource_dir(&self, name: &str) -> PathBuf {
        self.project_root.join("res").join(name)
    }

    // ── outputs ───────────────────────────────────────────────────────────

    pub fn www(&self) -> PathBuf {
        self.build_root.join(WWW_DIR)
    }

    pub fn views_dir(&self) -> PathBuf {
        self.www().join(VIEWS_DIR)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.www().join(STATIC_DIR)
    }

    pub fn static_subdir(&self, name: &str) -> PathBuf {
        self.static_dir().join(name)
    }

    pub fn css_dir(&self) -> PathBuf {
        self.static_subdir(CSS_DIR)
    }

    pub fn critical_css_dir(&self) -> PathBuf {
        self.css_dir().join(super::stylesheet::CRITICAL_DIR)
    }

    pub fn favicon_dir(&self) -> PathBuf {
        self.static_subdir(FAVICON_DIR)
    }

    pub fn head_template(&self) -> PathBuf {
        self.views_dir().join(HEAD_TEMPLATE)
    }

    pub fn footer_template(&self) -> PathBuf {
        self.views_dir().join(FOOTER_TEMPLATE)
    }

    pub fn app_file(&self) -> PathBuf {
        self.www().join(APP_FILE)
    }
}

/// Switches that change how a build behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Compressed CSS and deployment run mode.
    pub deploy: bool,
    /// Keep `www/static/favicon` across the reset so icons are not re-rendered.
    pub reuse: bool,
}
