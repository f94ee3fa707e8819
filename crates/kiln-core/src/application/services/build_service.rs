//! Build Service - main application orchestrator.
//!
//! This service runs one build from start to finish:
//! 1. Reset `www/`
//! 2. Copy views and resources
//! 3. Stylesheets
//! 4. Favicons
//! 5. Head template
//! 6. Routes and `app.py`
//!
//! Phases run strictly in order; the first failure aborts the rest and is
//! reported with the phase it happened in.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, BuildPhase,
        ports::{Filesystem, IconPacker, StylesheetCompiler, SvgRasterizer, TemplateStore},
    },
    domain::{
        BuildLayout, BuildOptions,
        layout::{FAVICON_DIR, STATIC_DIR},
        naming::{any_component, file_name, is_disabled, is_hidden, is_internal},
    },
    error::{KilnError, KilnResult},
};

use super::{
    favicon_service::{FaviconReport, FaviconService},
    head_service::HeadService,
    route_service::{RouteReport, RouteService},
    stylesheet_service::{StylesheetReport, StylesheetService},
    template_service::TemplateService,
};

/// Resource folders copied into `www/static`, as (source under `res/`, destination under `static/`).
const RESOURCES: &[(&str, &str)] = &[("static", ""), ("img", "img"), ("font", "font")];

/// External programs a build shells out to.
pub struct Toolchain {
    pub compiler: Box<dyn StylesheetCompiler>,
    pub rasterizer: Box<dyn SvgRasterizer>,
    pub packer: Box<dyn IconPacker>,
}

/// Summary of a finished build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub views_copied: usize,
    pub resources_copied: usize,
    pub stylesheets: StylesheetReport,
    pub favicons: FaviconReport,
    pub routes: RouteReport,
}

impl BuildReport {
    pub fn favicon_complete(&self) -> bool {
        self.favicons.head.is_complete()
    }
}

/// Main build service.
pub struct BuildService {
    filesystem: Box<dyn Filesystem>,
    tools: Toolchain,
    templates: TemplateService,
    layout: BuildLayout,
    options: BuildOptions,
}

impl BuildService {
    /// Create a new build service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        tools: Toolchain,
        store: Box<dyn TemplateStore>,
        layout: BuildLayout,
        options: BuildOptions,
    ) -> Self {
        Self {
            filesystem,
            tools,
            templates: TemplateService::new(store),
            layout,
            options,
        }
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Run every phase in order.
    #[instrument(
        skip_all,
        fields(
            source = %self.layout.project_root().display(),
            target = %self.layout.build_root().display(),
            deploy = self.options.deploy,
            reuse = self.options.reuse
        )
    )]
    pub fn build(&self) -> KilnResult<BuildReport> {
        info!("Starting build");
        let mut report = BuildReport::default();

        self.run(BuildPhase::Reset, || self.reset())?;
        let (views, resources) = self.run(BuildPhase::Copy, || self.copy())?;
        report.views_copied = views;
        report.resources_copied = resources;

        report.stylesheets = self.run(BuildPhase::Stylesheets, || {
            StylesheetService::new(
                self.filesystem.as_ref(),
                self.tools.compiler.as_ref(),
                &self.layout,
                self.options,
            )
            .generate()
        })?;

        report.favicons = self.run(BuildPhase::Favicon, || {
            FaviconService::new(
                self.filesystem.as_ref(),
                self.tools.rasterizer.as_ref(),
                self.tools.packer.as_ref(),
            )
            .generate(&self.layout.favicon_svg(), &self.layout.favicon_dir())
        })?;

        self.run(BuildPhase::Head, || {
            HeadService::new(self.filesystem.as_ref(), &self.layout).generate()
        })?;

        report.routes = self.run(BuildPhase::Routes, || {
            RouteService::new(self.filesystem.as_ref(), &self.templates, &self.layout).assemble()
        })?;

        info!(
            views = report.views_copied,
            routes = report.routes.main_routes,
            "Build completed successfully"
        );
        Ok(report)
    }

    fn run<T>(&self, phase: BuildPhase, step: impl FnOnce() -> KilnResult<T>) -> KilnResult<T> {
        debug!(%phase, "Phase started");
        step().map_err(|e: KilnError| e.in_phase(phase))
    }

    // -------------------------------------------------------------------------
    // Reset
    // -------------------------------------------------------------------------

    /// Empty `www/`. With `reuse`, rendered favicons survive.
    fn reset(&self) -> KilnResult<()> {
        let fs = self.filesystem.as_ref();
        let www = self.layout.www();

        if fs.exists(&www) {
            if self.options.reuse && fs.is_dir(&self.layout.favicon_dir()) {
                info!("Reusing existing favicons");
                self.clear_except_favicons(&www)?;
            } else {
                debug!(path = %www.display(), "Removing previous output");
                fs.remove_dir_all(&www)?;
            }
        }
        fs.create_dir_all(&www)
    }

    fn clear_except_favicons(&self, www: &Path) -> KilnResult<()> {
        let fs = self.filesystem.as_ref();
        for entry in fs.read_dir(www)? {
            if entry.name == STATIC_DIR && entry.is_dir {
                for child in fs.read_dir(&entry.path)? {
                    if child.name == FAVICON_DIR && child.is_dir {
                        continue;
                    }
                    remove_entry(fs, &child.path, child.is_dir)?;
                }
            } else {
                remove_entry(fs, &entry.path, entry.is_dir)?;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Copy
    // -------------------------------------------------------------------------

    fn copy(&self) -> KilnResult<(usize, usize)> {
        let fs = self.filesystem.as_ref();

        let views_source = self.layout.views_source();
        if !fs.is_dir(&views_source) {
            return Err(ApplicationError::MissingPrecondition {
                phase: BuildPhase::Copy,
                what: "views directory",
                path: views_source,
            }
            .into());
        }
        let views = copy_tree(fs, &views_source, &self.layout.views_dir(), |rel| {
            !any_component(rel, |part| is_disabled(part) || is_hidden(part))
        })?;
        debug!(views, "Views copied");

        fs.create_dir_all(&self.layout.static_dir())?;
        let mut resources = 0;
        for (source, dest) in RESOURCES {
            let from = self.layout.resource_dir(source);
            if !fs.is_dir(&from) {
                warn!(folder = %format!("res/{source}"), "Resource folder not found");
                continue;
            }
            let to = self.layout.static_subdir(dest);
            resources += copy_tree(fs, &from, &to, |rel| {
                let name = file_name(rel);
                !is_hidden(&name) && !is_internal(&name)
            })?;
        }
        debug!(resources, "Resources copied");
        Ok((views, resources))
    }
}

fn remove_entry(fs: &dyn Filesystem, path: &Path, is_dir: bool) -> KilnResult<()> {
    if is_dir {
        fs.remove_dir_all(path)
    } else {
        fs.remove_file(path)
    }
}

/// Copy every file under `from` accepted by `keep` to the same relative path under `to`.
fn copy_tree(
    fs: &dyn Filesystem,
    from: &Path,
    to: &Path,
    keep: impl Fn(&Path) -> bool,
) -> KilnResult<usize> {
    fs.create_dir_all(to)?;
    let mut copied = 0;
    for rel in fs.walk_files(from)? {
        if !keep(&rel) {
            debug!(file = %rel.display(), "Skipped");
            continue;
        }
        let dest = to.join(&rel);
        if let Some(parent) = dest.parent() {
            fs.create_dir_all(parent)?;
        }
        fs.copy_file(&from.join(&rel), &dest)?;
        copied += 1;
    }
    Ok(copied)
}
