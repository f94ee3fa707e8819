//! SVG rasterizer backed by Inkscape.

use std::path::Path;

use tracing::instrument;

use kiln_core::{application::ports::SvgRasterizer, error::KilnResult};

use super::command::ToolCommand;

pub const DEFAULT_INKSCAPE: &str = "inkscape";

/// Runs `inkscape --export-type=png --export-filename=<dest> -w N -h N <svg>`.
#[derive(Debug, Clone)]
pub struct InkscapeRasterizer {
    command: ToolCommand,
}

impl InkscapeRasterizer {
    pub fn new(command: &str) -> Self {
        Self {
            command: ToolCommand::parse(command, DEFAULT_INKSCAPE),
        }
    }

    fn args(svg: &Path, destination: &Path, size: u32) -> Vec<String> {
        vec![
            "--export-type=png".into(),
            format!("--export-filename={}", destination.display()),
            "-w".into(),
            size.to_string(),
            "-h".into(),
            size.to_string(),
            svg.display().to_string(),
        ]
    }
}

impl Default for InkscapeRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_INKSCAPE)
    }
}

impl SvgRasterizer for InkscapeRasterizer {
    #[instrument(skip(self), fields(tool = %self.command))]
    fn rasterize(&self, svg: &Path, destination: &Path, size: u32) -> KilnResult<()> {
        self.command.run(Self::args(svg, destination, size))?;
        Ok(())
    }
}
