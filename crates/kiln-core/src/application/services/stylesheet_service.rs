//! Stylesheet Service - critical / non-critical compilation and inlining.
//!
//! Per build:
//! 1. Compile the critical pass into `css/critical/`
//! 2. Compile the non-critical pass into `css/` (when `non-critical/` exists)
//! 3. Prepend general + page critical CSS to every view
//! 4. Delete `css/critical/`
//! 5. Inject the deferred-load block into the shared footer

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, BuildPhase, ports::{Filesystem, StylesheetCompiler}},
    domain::{
        BuildLayout, BuildOptions, DeferredStyles, ImportManifest, OutputStyle, Pass,
        naming::{
            file_name, is_disabled, is_hidden, is_internal, is_partial, last_segment, stem,
            to_posix,
        },
        stylesheet::{
            self, DEFERRED_BLOCK, GENERAL_STYLESHEET, MANIFEST_NAME, MODULES_DIR,
            NON_CRITICAL_DIR, PARTIALS_DIR, SASS_CACHE_DIR,
        },
    },
    error::KilnResult,
};

/// What a stylesheet run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylesheetReport {
    pub critical_compiled: usize,
    pub non_critical_compiled: usize,
    pub views_inlined: usize,
    pub footer_injected: bool,
}

pub struct StylesheetService<'a> {
    fs: &'a dyn Filesystem,
    compiler: &'a dyn StylesheetCompiler,
    layout: &'a BuildLayout,
    style: OutputStyle,
}

impl<'a> StylesheetService<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        compiler: &'a dyn StylesheetCompiler,
        layout: &'a BuildLayout,
        options: BuildOptions,
    ) -> Self {
        Self {
            fs,
            compiler,
            layout,
            style: OutputStyle::for_deploy(options.deploy),
        }
    }

    /// Run every stylesheet step against the output tree.
    #[instrument(skip_all, fields(style = %self.style))]
    pub fn generate(&self) -> KilnResult<StylesheetReport> {
        let sass_dir = self.layout.sass_dir();
        if !self.fs.is_dir(&sass_dir) {
            return Err(ApplicationError::MissingPrecondition {
                phase: BuildPhase::Stylesheets,
                what: "stylesheet sources",
                path: sass_dir,
            }
            .into());
        }

        self.fs.create_dir_all(&self.layout.critical_css_dir())?;

        let compiled = self.compile_passes();
        self.remove_artifacts()?;
        let (critical_compiled, non_critical_compiled) = compiled?;

        let views = self.view_names()?;
        let views_inlined = self.inline_critical()?;
        self.fs.remove_dir_all(&self.layout.critical_css_dir())?;

        let footer_injected = self.inject_deferred(&views)?;

        let report = StylesheetReport {
            critical_compiled,
            non_critical_compiled,
            views_inlined,
            footer_injected,
        };
        info!(
            critical = report.critical_compiled,
            non_critical = report.non_critical_compiled,
            inlined = report.views_inlined,
            "Stylesheets generated"
        );
        Ok(report)
    }

    fn compile_passes(&self) -> KilnResult<(usize, usize)> {
        let critical = self.compile_pass(Pass::Critical)?;
        let non_critical = if self.fs.is_dir(&self.pass_root(Pass::NonCritical)) {
            self.compile_pass(Pass::NonCritical)?
        } else {
            debug!("No non-critical stylesheets");
            0
        };
        Ok((critical, non_critical))
    }

    fn pass_root(&self, pass: Pass) -> PathBuf {
        match pass {
            Pass::Critical => self.layout.sass_dir(),
            Pass::NonCritical => self.layout.sass_dir().join(NON_CRITICAL_DIR),
        }
    }

    fn pass_output(&self, pass: Pass) -> PathBuf {
        match pass {
            Pass::Critical => self.layout.critical_css_dir(),
            Pass::NonCritical => self.layout.css_dir(),
        }
    }

    // ------------------------------------------------------------------------
    // Manifest + compilation
    // ------------------------------------------------------------------------

    /// Build the `_all.scss` import list for a pass.
    pub fn manifest(&self, pass: Pass) -> KilnResult<ImportManifest> {
        let root = self.pass_root(pass);
        let mut manifest = ImportManifest::new();

        for import in self.imports_under(&root, MODULES_DIR)? {
            manifest.add_module(import);
        }

        match pass {
            Pass::Critical => {
                for entry in self.fs.read_dir(&root)? {
                    if !entry.is_dir
                        && is_partial(&entry.name)
                        && stylesheet::is_import_candidate(&entry.name)
                    {
                        manifest.add_partial(entry.name);
                    }
                }
            }
            Pass::NonCritical => {
                for import in self.imports_under(&root, PARTIALS_DIR)? {
                    manifest.add_partial(import);
                }
            }
        }
        Ok(manifest)
    }

    fn imports_under(&self, root: &Path, folder: &str) -> KilnResult<Vec<String>> {
        let dir = root.join(folder);
        if !self.fs.is_dir(&dir) {
            return Ok(Vec::new());
        }
        Ok(self
            .fs
            .walk_files(&dir)?
            .iter()
            .filter(|rel| stylesheet::is_import_candidate(&file_name(rel)))
            .map(|rel| format!("{folder}/{}", to_posix(rel)))
            .collect())
    }

    fn compile_pass(&self, pass: Pass) -> KilnResult<usize> {
        let root = self.pass_root(pass);
        let output = self.pass_output(pass);

        let manifest = self.manifest(pass)?;
        debug!(%pass, imports = manifest.len(), "Writing import manifest");
        self.fs
            .write_file(&root.join(MANIFEST_NAME), &manifest.render())?;

        self.fs.create_dir_all(&output)?;
        let mut compiled = 0;
        for entry in self.fs.read_dir(&root)? {
            if entry.is_dir || !stylesheet::is_compile_target(&entry.name) {
                continue;
            }
            let css = self.compiler.compile(&entry.path, self.style)?;
            let dest = output.join(stylesheet::css_file_name(&entry.name));
            debug!(%pass, source = %entry.name, dest = %dest.display(), "Compiled stylesheet");
            self.fs.write_file(&dest, &css)?;
            compiled += 1;
        }
        Ok(compiled)
    }

    /// Remove generated manifests and compiler caches from the source tree.
    fn remove_artifacts(&self) -> KilnResult<()> {
        let sass_dir = self.layout.sass_dir();
        let mut caches: BTreeSet<PathBuf> = BTreeSet::new();

        for rel in self.fs.walk_files(&sass_dir)? {
            let mut prefix = PathBuf::new();
            let mut in_cache = false;
            for part in rel.iter() {
                prefix.push(part);
                if part == OsStr::new(SASS_CACHE_DIR) {
                    caches.insert(sass_dir.join(&prefix));
                    in_cache = true;
                    break;
                }
            }
            if !in_cache && file_name(&rel) == MANIFEST_NAME {
                self.fs.remove_file(&sass_dir.join(&rel))?;
            }
        }
        for cache in caches {
            debug!(path = %cache.display(), "Removing compiler cache");
            self.fs.remove_dir_all(&cache)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------------

    /// Paths of routable views, relative to the views directory.
    fn view_files(&self) -> KilnResult<Vec<PathBuf>> {
        let views_dir = self.layout.views_dir();
        if !self.fs.is_dir(&views_dir) {
            return Ok(Vec::new());
        }
        Ok(self
            .fs
            .walk_files(&views_dir)?
            .into_iter()
            .filter(|rel| {
                let name = file_name(rel);
                !is_internal(&name) && !is_disabled(&name) && !is_hidden(&name)
            })
            .collect())
    }

    fn view_names(&self) -> KilnResult<BTreeSet<String>> {
        Ok(self
            .view_files()?
            .iter()
            .map(|rel| stem(last_segment(&to_posix(rel))).to_string())
            .collect())
    }

    fn read_critical(&self, name: &str) -> KilnResult<Option<String>> {
        let path = self.layout.critical_css_dir().join(format!("{name}.css"));
        if !self.fs.is_file(&path) {
            return Ok(None);
        }
        self.fs.read_to_string(&path).map(Some)
    }

    /// Prepend critical CSS to every view; returns how many changed.
    fn inline_critical(&self) -> KilnResult<usize> {
        let general = self.read_critical(GENERAL_STYLESHEET)?;
        if general.is_none() {
            debug!("No general critical stylesheet");
        }

        let mut inlined = 0;
        for rel in self.view_files()? {
            let name = stem(&file_name(&rel)).to_string();
            let page = if name == GENERAL_STYLESHEET {
                None
            } else {
                self.read_critical(&name)?
            };
            let embedded = stylesheet::embedded_css(general.as_deref(), page.as_deref());

            let path = self.layout.views_dir().join(&rel);
            let view = self.fs.read_to_string(&path)?;
            match stylesheet::inline_critical(&view, &embedded) {
                Some(text) => {
                    debug!(view = %name, bytes = embedded.len(), "Inlined critical CSS");
                    self.fs.write_file(&path, &text)?;
                    inlined += 1;
                }
                None => debug!(view = %name, "No critical CSS for view"),
            }
        }
        Ok(inlined)
    }

    // ------------------------------------------------------------------------
    // Deferred footer
    // ------------------------------------------------------------------------

    /// Base names of the persisted CSS files.
    pub fn persisted_sheets(&self) -> KilnResult<Vec<String>> {
        persisted_sheets(self.fs, &self.layout.css_dir())
    }

    fn inject_deferred(&self, views: &BTreeSet<String>) -> KilnResult<bool> {
        let footer = self.layout.footer_template();
        if !self.fs.is_file(&footer) {
            warn!(path = %footer.display(), "Footer template not found, deferred styles skipped");
            return Ok(false);
        }

        let deferred = DeferredStyles::partition(self.persisted_sheets()?, views);
        if deferred.is_empty() {
            debug!("No deferred stylesheets");
            return Ok(false);
        }

        let text = self.fs.read_to_string(&footer)?;
        match stylesheet::inject_once(&text, DEFERRED_BLOCK, &deferred.render()) {
            Some(updated) => {
                self.fs.write_file(&footer, &updated)?;
                info!(
                    shared = deferred.shared().len(),
                    pages = deferred.pages().len(),
                    "Deferred styles appended to footer"
                );
                Ok(true)
            }
            None => {
                debug!("Footer already carries deferred styles");
                Ok(false)
            }
        }
    }
}

/// `.css` files directly under `css_dir`, without extension, sorted.
pub fn persisted_sheets(fs: &dyn Filesystem, css_dir: &Path) -> KilnResult<Vec<String>> {
    if !fs.is_dir(css_dir) {
        return Ok(Vec::new());
    }
    Ok(fs
        .read_dir(css_dir)?
        .into_iter()
        .filter(|entry| {
            !entry.is_dir
                && entry
                    .name
                    .rsplit_once('.')
                    .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("css"))
        })
        .map(|entry| stem(&entry.name).to_string())
        .collect())
}
