//! External command execution.
//!
//! Every tool adapter funnels through [`ToolCommand::run`], which captures
//! output and turns spawn failures and non-zero exits into typed errors.

use std::{
    ffi::{OsStr, OsString},
    fmt,
    process::{Command, Output},
};

use tracing::{debug, trace};

use kiln_core::{application::ApplicationError, error::KilnResult};

/// A program plus fixed leading arguments, e.g. `npx sass`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    leading: Vec<String>,
}

impl ToolCommand {
    /// Split a configured command line on whitespace.
    ///
    /// An empty string falls back to `default`.
    pub fn parse(command_line: &str, default: &str) -> Self {
        let mut words = command_line.split_whitespace().map(str::to_owned);
        match words.next() {
            Some(program) => Self {
                program,
                leading: words.collect(),
            },
            None => Self {
                program: default.to_owned(),
                leading: Vec::new(),
            },
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run to completion and return the captured output.
    ///
    /// # Errors
    /// `ToolUnavailable` when the program cannot be started, `ToolFailed`
    /// when it exits unsuccessfully.
    pub fn run<I, S>(&self, args: I) -> KilnResult<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args
            .into_iter()
            .map(|a| a.as_ref().to_os_string())
            .collect();

        debug!(command = %self, args = ?args, "Running external tool");
        let output = Command::new(&self.program)
            .args(&self.leading)
            .args(&args)
            .output()
            .map_err(|e| ApplicationError::ToolUnavailable {
                tool: self.program.clone(),
                reason: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            trace!(tool = %self.program, stderr = %stderr.trim(), "Tool diagnostics");
        }

        if !output.status.success() {
            return Err(ApplicationError::ToolFailed {
                tool: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }
        Ok(output)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.leading {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_core::error::KilnError;

    #[test]
    fn parse_splits_leading_arguments() {
        let cmd = ToolCommand::parse("npx  sass", "sass");
        assert_eq!(cmd.program(), "npx");
        assert_eq!(cmd.to_string(), "npx sass");
    }

    #[test]
    fn parse_empty_uses_default() {
        assert_eq!(ToolCommand::parse("  ", "convert").program(), "convert");
    }

    #[test]
    fn missing_program_is_unavailable() {
        let err = ToolCommand::parse("kiln-no-such-tool-xyz", "")
            .run(["--version"])
            .unwrap_err();
        assert!(matches!(
            err,
            KilnError::Application(ApplicationError::ToolUnavailable { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_failure() {
        let err = ToolCommand::parse("sh", "").run(["-c", "echo broken >&2; exit 3"]).unwrap_err();
        match err {
            KilnError::Application(ApplicationError::ToolFailed { tool, stderr, .. }) => {
                assert_eq!(tool, "sh");
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn success_captures_stdout() {
        let output = ToolCommand::parse("sh", "").run(["-c", "printf ok"]).unwrap();
        assert_eq!(output.stdout, b"ok");
    }

    #[cfg(unix)]
    #[test]
    fn empty_arguments_reach_the_tool() {
        let output = ToolCommand::parse("sh", "")
            .run(["-c", "printf '%s|' \"$@\"", "sh", "", "x"])
            .unwrap();
        assert_eq!(output.stdout, b"|x|");
    }
}
