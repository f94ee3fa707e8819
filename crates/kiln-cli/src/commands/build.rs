//! Implementation of the `kiln build` command.
//!
//! Responsibility: resolve paths and switches, wire the adapters into a
//! `BuildService`, run it once, and display the report. No build logic
//! lives here.

use std::path::PathBuf;

use serde_json::json;
use tracing::{debug, instrument};

use kiln_adapters::{
    FilesystemStore, ImageMagickPacker, InMemoryStore, InkscapeRasterizer, LocalFilesystem,
    SassCli,
};
use kiln_core::{
    application::{BuildReport, BuildService, Toolchain},
    domain::{BuildLayout, BuildOptions},
};

use crate::{
    cli::BuildArgs,
    config::{AppConfig, ToolsConfig},
    error::CliResult,
    output::OutputManager,
};

/// Execute the `kiln build` command.
#[instrument(skip_all, fields(source = %args.source.display()))]
pub fn execute(args: BuildArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let layout = resolve_layout(&args);
    let options = BuildOptions {
        deploy: args.deploy || config.build.deploy,
        reuse: args.reuse || config.build.reuse,
    };
    debug!(?options, tools = ?config.tools, "Build configured");

    if !output.is_json() {
        output.info(&format!(
            "Building {} from {}",
            layout.www().display(),
            layout.project_root().display()
        ))?;
    }

    let service = BuildService::new(
        Box::new(LocalFilesystem::new()),
        toolchain(&config.tools),
        Box::new(FilesystemStore::new(
            layout.templates_source(),
            Box::new(InMemoryStore::with_builtin()),
        )),
        layout,
        options,
    );
    let report = service.build()?;

    show_report(&report, service.layout(), options, &output)
}

/// `--path` defaults to the source directory.
fn resolve_layout(args: &BuildArgs) -> BuildLayout {
    let target: PathBuf = args.path.clone().unwrap_or_else(|| args.source.clone());
    BuildLayout::new(args.source.clone(), target)
}

fn toolchain(tools: &ToolsConfig) -> Toolchain {
    Toolchain {
        compiler: Box::new(SassCli::new(&tools.sass)),
        rasterizer: Box::new(InkscapeRasterizer::new(&tools.rasterizer)),
        packer: Box::new(ImageMagickPacker::new(&tools.icon_packer)),
    }
}

fn show_report(
    report: &BuildReport,
    layout: &BuildLayout,
    options: BuildOptions,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(&json!({
            "www": layout.www(),
            "deploy": options.deploy,
            "reuse": options.reuse,
            "views_copied": report.views_copied,
            "resources_copied": report.resources_copied,
            "stylesheets": {
                "critical": report.stylesheets.critical_compiled,
                "non_critical": report.stylesheets.non_critical_compiled,
                "views_inlined": report.stylesheets.views_inlined,
                "footer_injected": report.stylesheets.footer_injected,
            },
            "favicons": {
                "rendered": report.favicons.rendered,
                "reused": report.favicons.reused,
                "packed": report.favicons.packed,
                "missing": report.favicons.head.missing,
            },
            "routes": {
                "main": report.routes.main_routes,
                "static": report.routes.static_routes,
            },
        }))?;
        return Ok(());
    }

    output.success(&format!("Built {}", layout.app_file().display()))?;
    output.field("views", report.views_copied)?;
    output.field("resources", report.resources_copied)?;
    output.field(
        "stylesheets",
        format!(
            "{} critical, {} deferred",
            report.stylesheets.critical_compiled, report.stylesheets.non_critical_compiled
        ),
    )?;
    output.field(
        "favicons",
        format!(
            "{} rendered, {} reused",
            report.favicons.rendered, report.favicons.reused
        ),
    )?;
    output.field(
        "routes",
        format!(
            "{} pages, {} static files",
            report.routes.main_routes, report.routes.static_routes
        ),
    )?;

    if !report.favicon_complete() {
        output.warning(&format!(
            "Head markup is missing favicons: {}",
            report.favicons.head.missing.join(", ")
        ))?;
    }
    if options.deploy {
        output.info("Deploy build: run `python app.py --deploy` in www/")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn args(path: Option<&str>, source: &str) -> BuildArgs {
        BuildArgs {
            path: path.map(PathBuf::from),
            source: PathBuf::from(source),
            deploy: false,
            reuse: false,
        }
    }

    #[test]
    fn output_defaults_to_source() {
        let layout = resolve_layout(&args(None, "site"));
        assert_eq!(layout.www(), Path::new("site/www"));
        assert_eq!(layout.sass_dir(), Path::new("site/dev/sass"));
    }

    #[test]
    fn explicit_path_moves_only_output() {
        let layout = resolve_layout(&args(Some("dist"), "site"));
        assert_eq!(layout.www(), Path::new("dist/www"));
        assert_eq!(layout.views_source(), Path::new("site/dev/views"));
    }
}
