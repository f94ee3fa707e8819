//! Route Service - enumerates servable files and assembles the app file.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::Filesystem,
    domain::{
        BuildLayout, RouteEntry, StaticFolder, Substitutions,
        layout::STATIC_DIR,
        naming::to_posix,
        routes::{self, routes_value},
    },
    error::KilnResult,
};

use super::template_service::{APP_TEMPLATE, TemplateService, render_to};

/// Route counts of an assembled app file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteReport {
    pub main_routes: usize,
    pub static_routes: usize,
    pub api_routes_bytes: usize,
}

pub struct RouteService<'a> {
    fs: &'a dyn Filesystem,
    templates: &'a TemplateService,
    layout: &'a BuildLayout,
}

impl<'a> RouteService<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        templates: &'a TemplateService,
        layout: &'a BuildLayout,
    ) -> Self {
        Self {
            fs,
            templates,
            layout,
        }
    }

    /// One view route per non-internal file under `www/views`.
    pub fn main_routes(&self) -> KilnResult<Vec<RouteEntry>> {
        let dir = self.layout.views_dir();
        if !self.fs.is_dir(&dir) {
            return Ok(Vec::new());
        }
        let files: Vec<String> = self.fs.walk_files(&dir)?.iter().map(|p| to_posix(p)).collect();
        Ok(routes::view_routes(&files)?)
    }

    /// Routes for every file below one static sub-folder.
    pub fn folder_routes(&self, folder: StaticFolder) -> KilnResult<Vec<RouteEntry>> {
        let dir = self.layout.static_subdir(folder.dir());
        if !self.fs.is_dir(&dir) {
            debug!(%folder, "Static folder absent");
            return Ok(Vec::new());
        }
        let files: Vec<String> = self.fs.walk_files(&dir)?.iter().map(|p| to_posix(p)).collect();
        Ok(routes::static_routes(&folder.root(), &files))
    }

    /// Routes for files sitting directly in `www/static`.
    pub fn top_level_static_routes(&self) -> KilnResult<Vec<RouteEntry>> {
        let dir = self.layout.static_dir();
        if !self.fs.is_dir(&dir) {
            return Ok(Vec::new());
        }
        let files: Vec<String> = self
            .fs
            .read_dir(&dir)?
            .into_iter()
            .filter(|entry| !entry.is_dir)
            .map(|entry| entry.name)
            .collect();
        Ok(routes::static_routes(STATIC_DIR, &files))
    }

    /// Hand-authored routes, passed through untouched.
    pub fn api_routes(&self) -> KilnResult<String> {
        let path = self.layout.api_routes_source();
        if !self.fs.is_file(&path) {
            warn!(path = %path.display(), "No API routes found");
            return Ok(String::new());
        }
        self.fs.read_to_string(&path)
    }

    /// Render the app template into `www/app.py`.
    #[instrument(skip_all, fields(dest = %self.layout.app_file().display()))]
    pub fn assemble(&self) -> KilnResult<RouteReport> {
        let template = self.templates.load(APP_TEMPLATE)?;

        let main = self.main_routes()?;
        let api = self.api_routes()?;
        let top_level = self.top_level_static_routes()?;

        let mut report = RouteReport {
            main_routes: main.len(),
            static_routes: top_level.len(),
            api_routes_bytes: api.len(),
        };

        let mut values = Substitutions::new()
            .with("doc_string", "")
            .with("main_routes", routes_value(&main))
            .with("api_routes", api)
            .with("static_routes", routes_value(&top_level));

        for folder in StaticFolder::ALL {
            let entries = self.folder_routes(folder)?;
            debug!(%folder, routes = entries.len(), "Static routes");
            report.static_routes += entries.len();
            values.insert(folder.slot(), routes_value(&entries));
        }

        render_to(self.fs, &template, &self.layout.app_file(), &values)?;
        info!(
            main = report.main_routes,
            static_routes = report.static_routes,
            "App file assembled"
        );
        Ok(report)
    }
}
