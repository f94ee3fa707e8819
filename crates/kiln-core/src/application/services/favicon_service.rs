//! Favicon Service - icon set rendering and head markup.
//!
//! PNGs and the ICO are memoized by presence: a file that already exists is
//! never rendered again, whatever its content.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, BuildPhase,
        ports::{Filesystem, IconPacker, SvgRasterizer},
    },
    domain::{
        FaviconHead,
        favicon::{self, HEAD_FILE, ICO_FILE},
    },
    error::KilnResult,
};

/// What a favicon run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaviconReport {
    pub rendered: usize,
    pub reused: usize,
    pub packed: bool,
    pub head: FaviconHead,
}

pub struct FaviconService<'a> {
    fs: &'a dyn Filesystem,
    rasterizer: &'a dyn SvgRasterizer,
    packer: &'a dyn IconPacker,
}

impl<'a> FaviconService<'a> {
    pub fn new(
        fs: &'a dyn Filesystem,
        rasterizer: &'a dyn SvgRasterizer,
        packer: &'a dyn IconPacker,
    ) -> Self {
        Self {
            fs,
            rasterizer,
            packer,
        }
    }

    /// Render the icon set from `svg` into `dest`, then write `head.html`.
    #[instrument(skip_all, fields(svg = %svg.display(), dest = %dest.display()))]
    pub fn generate(&self, svg: &Path, dest: &Path) -> KilnResult<FaviconReport> {
        if !self.fs.is_file(svg) {
            return Err(ApplicationError::MissingPrecondition {
                phase: BuildPhase::Favicon,
                what: "favicon source",
                path: svg.to_path_buf(),
            }
            .into());
        }
        self.fs.create_dir_all(dest)?;

        let ico = dest.join(ICO_FILE);
        let ico_present = self.fs.is_file(&ico);
        let ico_only = favicon::ico_only_resolutions();

        let mut report = FaviconReport::default();
        for raster in favicon::raster_plan() {
            // only needed for packing, which is already done
            if ico_present
                && raster.flavor == favicon::Flavor::Favicon
                && ico_only.contains(&raster.resolution)
            {
                continue;
            }
            let path = dest.join(&raster.file_name);
            if self.fs.is_file(&path) {
                report.reused += 1;
                continue;
            }
            debug!(file = %raster.file_name, size = raster.resolution, "Rasterizing");
            self.rasterizer.rasterize(svg, &path, raster.resolution)?;
            report.rendered += 1;
        }

        if ico_present {
            debug!("favicon.ico present, packing skipped");
        } else {
            let sources: Vec<PathBuf> = favicon::ico_sources()
                .iter()
                .map(|name| dest.join(name))
                .collect();
            self.packer.pack(&sources, &ico)?;
            report.packed = true;

            for res in ico_only {
                let path = dest.join(favicon::Flavor::Favicon.file_name(res));
                if self.fs.is_file(&path) {
                    self.fs.remove_file(&path)?;
                }
            }
        }

        report.head = self.head_elements(dest);
        if !report.head.is_complete() {
            warn!(missing = ?report.head.missing, "Favicon head markup is incomplete");
        }
        self.fs.write_file(&dest.join(HEAD_FILE), &report.head.markup)?;

        info!(
            rendered = report.rendered,
            reused = report.reused,
            packed = report.packed,
            "Favicons generated"
        );
        Ok(report)
    }

    /// Favicon links for the files present in `dir`.
    pub fn head_elements(&self, dir: &Path) -> FaviconHead {
        favicon::head_elements(|file| self.fs.is_file(&dir.join(file)))
    }
}
