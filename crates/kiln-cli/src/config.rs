//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `KILN_*` environment variables, `__` between section and key
//!    (`KILN_TOOLS__SASS=npx sass`), including a `.env` file
//! 3. Config file (`--config FILE` or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use kiln_adapters::tools::{DEFAULT_CONVERT, DEFAULT_INKSCAPE, DEFAULT_SASS};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// External programs.
    pub tools: ToolsConfig,
    /// Build switch defaults.
    pub build: BuildConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Command lines for the external tools. A value may carry leading
/// arguments, e.g. `npx sass`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub sass: String,
    pub rasterizer: String,
    pub icon_packer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub deploy: bool,
    pub reuse: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tools: ToolsConfig {
                sass: DEFAULT_SASS.into(),
                rasterizer: DEFAULT_INKSCAPE.into(),
                icon_packer: DEFAULT_CONVERT.into(),
            },
            build: BuildConfig::default(),
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// With `strict`, an explicit `config_file` must exist; `kiln init`
    /// loads non-strictly because it is about to create that file.
    pub fn load(config_file: Option<&Path>, strict: bool) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;

        let file = match config_file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(strict),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let merged = Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix("KILN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        merged
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kiln.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "kiln", "kiln")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kiln.toml"))
    }

    /// The file `init` and `config path` refer to.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file.map_or_else(Self::config_path, Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_tools_are_the_stock_programs() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.tools.sass, "sass");
        assert_eq!(cfg.tools.rasterizer, "inkscape");
        assert_eq!(cfg.tools.icon_packer, "convert");
    }

    #[test]
    fn default_build_is_development() {
        let cfg = AppConfig::default();
        assert!(!cfg.build.deploy);
        assert!(!cfg.build.reuse);
    }

    #[test]
    fn file_overrides_only_what_it_names() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kiln.toml");
        std::fs::write(&path, "[tools]\nsass = \"npx sass\"\n\n[build]\ndeploy = true\n").unwrap();

        let cfg = AppConfig::load(Some(&path), true).unwrap();
        assert_eq!(cfg.tools.sass, "npx sass");
        assert_eq!(cfg.tools.rasterizer, "inkscape");
        assert!(cfg.build.deploy);
        assert!(!cfg.build.reuse);
    }

    #[test]
    fn strict_load_requires_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("absent.toml");
        assert!(AppConfig::load(Some(&missing), true).is_err());
        assert_eq!(
            AppConfig::load(Some(&missing), false).unwrap().tools,
            AppConfig::default().tools
        );
    }

    #[test]
    fn default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[tools]"));
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn active_path_prefers_explicit_file() {
        let explicit = Path::new("/tmp/kiln.toml");
        assert_eq!(AppConfig::active_path(Some(explicit)), explicit);
        assert_eq!(AppConfig::active_path(None), AppConfig::config_path());
    }
}
