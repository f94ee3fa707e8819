//! ICO packer backed by ImageMagick.

use std::path::{Path, PathBuf};

use tracing::instrument;

use kiln_core::{application::ports::IconPacker, error::KilnResult};

use super::command::ToolCommand;

pub const DEFAULT_CONVERT: &str = "convert";

/// Runs `convert <png>... <dest>`; the `.ico` extension selects the format.
#[derive(Debug, Clone)]
pub struct ImageMagickPacker {
    command: ToolCommand,
}

impl ImageMagickPacker {
    pub fn new(command: &str) -> Self {
        Self {
            command: ToolCommand::parse(command, DEFAULT_CONVERT),
        }
    }
}

impl Default for ImageMagickPacker {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERT)
    }
}

impl IconPacker for ImageMagickPacker {
    #[instrument(skip(self, pngs), fields(tool = %self.command, count = pngs.len()))]
    fn pack(&self, pngs: &[PathBuf], destination: &Path) -> KilnResult<()> {
        let args = pngs
            .iter()
            .map(PathBuf::as_path)
            .chain(std::iter::once(destination));
        self.command.run(args)?;
        Ok(())
    }
}
