//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kiln",
    bin_name = "kiln",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f525} Build a server-rendered site skeleton from views, SCSS and an SVG icon",
    long_about = "Kiln copies views and resources into www/, splits stylesheets into \
                  inlined critical CSS and deferred non-critical CSS, renders the favicon \
                  set, fills the shared <head> and writes the bottle app.py.",
    after_help = "EXAMPLES:\n\
        \x20 kiln build\n\
        \x20 kiln build --source ./site --path ./dist --deploy\n\
        \x20 kiln favicon res/favicon.svg www/static\n\
        \x20 kiln completions bash > /usr/share/bash-completion/completions/kiln",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the full build.
    #[command(
        visible_alias = "b",
        about = "Build www/ from the project sources",
        after_help = "EXAMPLES:\n\
            \x20 kiln build                       # sources and output in the current directory\n\
            \x20 kiln build --path ../out         # write ../out/www\n\
            \x20 kiln build --deploy --reuse      # compressed CSS, keep rendered favicons"
    )]
    Build(BuildArgs),

    /// Render the favicon set on its own.
    #[command(
        about = "Generate favicons and their head markup",
        after_help = "EXAMPLES:\n\
            \x20 kiln favicon                          # ./favicon.svg into ./favicon\n\
            \x20 kiln favicon logo.svg public          # logo.svg into public/favicon"
    )]
    Favicon(FaviconArgs),

    /// Initialise a Kiln configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kiln init                       # platform config directory\n\
            \x20 kiln --config kiln.toml init    # explicit location\n\
            \x20 kiln init --force               # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kiln completions bash > ~/.local/share/bash-completion/completions/kiln\n\
            \x20 kiln completions zsh  > ~/.zfunc/_kiln\n\
            \x20 kiln completions fish > ~/.config/fish/completions/kiln.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Kiln configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kiln config get tools.sass\n\
            \x20 kiln config list\n\
            \x20 kiln config path"
    )]
    Config(ConfigCommands),
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `kiln build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Directory that receives `www/`. Defaults to the source directory.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Directory to create www/ in"
    )]
    pub path: Option<PathBuf>,

    /// Project directory holding `dev/` and `res/`.
    #[arg(
        short = 's',
        long = "source",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory with dev/ and res/"
    )]
    pub source: PathBuf,

    /// Compress stylesheets and run the generated app in deployment mode.
    #[arg(short = 'd', long = "deploy", help = "Build for deployment")]
    pub deploy: bool,

    /// Keep `www/static/favicon` from the previous build.
    #[arg(short = 'r', long = "reuse", help = "Reuse previously rendered favicons")]
    pub reuse: bool,
}

// ── favicon ───────────────────────────────────────────────────────────────────

/// Arguments for `kiln favicon`.
#[derive(Debug, Args)]
pub struct FaviconArgs {
    /// Source SVG.
    #[arg(value_name = "SVG", default_value = "favicon.svg", help = "Source SVG file")]
    pub svg: PathBuf,

    /// Directory that receives `favicon/`.
    #[arg(value_name = "DEST", default_value = ".", help = "Directory to create favicon/ in")]
    pub dest: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `kiln init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kiln completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `kiln config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `tools.sass`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_defaults() {
        let cli = Cli::parse_from(["kiln", "build"]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.source, PathBuf::from("."));
        assert!(args.path.is_none());
        assert!(!args.deploy);
        assert!(!args.reuse);
    }

    #[test]
    fn build_flags() {
        let cli = Cli::parse_from([
            "kiln", "build", "--path", "out", "--source", "site", "--deploy", "--reuse",
        ]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.path, Some(PathBuf::from("out")));
        assert_eq!(args.source, PathBuf::from("site"));
        assert!(args.deploy && args.reuse);
    }

    #[test]
    fn build_alias() {
        let cli = Cli::parse_from(["kiln", "b", "-d"]);
        assert!(matches!(cli.command, Commands::Build(BuildArgs { deploy: true, .. })));
    }

    #[test]
    fn favicon_positional_defaults() {
        let cli = Cli::parse_from(["kiln", "favicon"]);
        let Commands::Favicon(args) = cli.command else {
            panic!("expected Favicon command");
        };
        assert_eq!(args.svg, PathBuf::from("favicon.svg"));
        assert_eq!(args.dest, PathBuf::from("."));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["kiln", "build", "-vv", "--no-color"]);
        assert_eq!(cli.global.verbose, 2);
        assert!(cli.global.no_color);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kiln", "--quiet", "--verbose", "build"]);
        assert!(result.is_err());
    }
}
