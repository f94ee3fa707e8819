//! SCSS compiler backed by the `sass` command line (Dart Sass).

use std::path::Path;

use tracing::instrument;

use kiln_core::{
    application::ports::StylesheetCompiler, domain::OutputStyle, error::KilnResult,
};

use super::command::ToolCommand;

pub const DEFAULT_SASS: &str = "sass";

/// Runs `sass --no-source-map --style=<style> <source>` and reads stdout.
#[derive(Debug, Clone)]
pub struct SassCli {
    command: ToolCommand,
}

impl SassCli {
    pub fn new(command: &str) -> Self {
        Self {
            command: ToolCommand::parse(command, DEFAULT_SASS),
        }
    }

    fn args(source: &Path, style: OutputStyle) -> Vec<String> {
        vec![
            "--no-source-map".into(),
            format!("--style={}", style.as_str()),
            source.display().to_string(),
        ]
    }
}

impl Default for SassCli {
    fn default() -> Self {
        Self::new(DEFAULT_SASS)
    }
}

impl StylesheetCompiler for SassCli {
    #[instrument(skip(self), fields(tool = %self.command))]
    fn compile(&self, source: &Path, style: OutputStyle) -> KilnResult<String> {
        let output = self.command.run(Self::args(source, style))?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_follow_output_style() {
        let args = SassCli::args(Path::new("dev/sass/styles.scss"), OutputStyle::Compressed);
        assert_eq!(
            args,
            ["--no-source-map", "--style=compressed", "dev/sass/styles.scss"]
        );
    }
}
