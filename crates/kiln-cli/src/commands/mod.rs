//! One module per subcommand. Each `execute` translates arguments into core
//! calls and renders the result.

pub mod build;
pub mod completions;
pub mod config;
pub mod favicon;
pub mod init;
