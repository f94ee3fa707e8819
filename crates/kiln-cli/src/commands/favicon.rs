//! `kiln favicon`: render the icon set outside a full build.

use serde_json::json;
use tracing::instrument;

use kiln_adapters::{ImageMagickPacker, InkscapeRasterizer, LocalFilesystem};
use kiln_core::{application::FaviconService, domain::layout::FAVICON_DIR};

use crate::{cli::FaviconArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Generate PNGs, `favicon.ico` and `head.html` into `DEST/favicon`.
#[instrument(skip_all, fields(svg = %args.svg.display()))]
pub fn execute(args: FaviconArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dest = args.dest.join(FAVICON_DIR);

    let fs = LocalFilesystem::new();
    let rasterizer = InkscapeRasterizer::new(&config.tools.rasterizer);
    let packer = ImageMagickPacker::new(&config.tools.icon_packer);

    let report = FaviconService::new(&fs, &rasterizer, &packer).generate(&args.svg, &dest)?;

    if output.is_json() {
        output.json(&json!({
            "dest": dest,
            "rendered": report.rendered,
            "reused": report.reused,
            "packed": report.packed,
            "missing": report.head.missing,
        }))?;
        return Ok(());
    }

    output.success(&format!("Favicons written to {}", dest.display()))?;
    output.field("rendered", report.rendered)?;
    output.field("reused", report.reused)?;
    output.field("ico", if report.packed { "packed" } else { "kept" })?;
    if !report.head.is_complete() {
        output.warning(&format!(
            "head.html is missing: {}",
            report.head.missing.join(", ")
        ))?;
    }
    Ok(())
}
