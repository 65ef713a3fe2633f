//! Site configuration management for `press.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── assets     # [assets] typed manifest + bundle rewrite
//! │   ├── build      # [build] and [build.render]
//! │   ├── locales    # [locales]
//! │   └── minify     # [minify]
//! ├── types/         # Diagnostics and field paths
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! The loaded `SiteConfig` is owned by `main` and lent to each pass.
//! A pass that overrides `assets` or `locale` restores them before
//! returning.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    AssetLists, AssetManifest, BuildConfig, LocalesConfig, MinifierConfig, MinifyConfig,
    RenderConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    utils::path::{normalize_path, resolve_in_root},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing press.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Active locale, rewritten per pass by `export`
    pub locale: Option<String>,

    /// Build settings
    pub build: BuildConfig,

    /// Locale discovery and export settings
    pub locales: LocalesConfig,

    /// Asset manifest
    pub assets: AssetManifest,

    /// Minifier settings
    pub minify: MinifyConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cwd, &cli.config)
            .ok_or_else(|| ConfigError::NotFound(cwd.join(&cli.config)))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);
        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);

        config.apply_command_options(&cli.command);
        config.normalize_paths(&root);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Active locale label for log lines.
    pub fn locale_label(&self) -> &str {
        self.locale.as_deref().unwrap_or("default")
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, command: &Commands) {
        self.apply_build_args(command.build_args());
        match command {
            Commands::Build { locale, .. } => {
                if locale.is_some() {
                    self.locale = locale.clone();
                }
            }
            Commands::Export { export, .. } => {
                Self::update_option(&mut self.locales.export, export.as_ref());
            }
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.source, args.source.as_ref());
        Self::update_option(&mut self.build.destination, args.destination.as_ref());
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.build.source = resolve_in_root(&self.build.source, &root);
        self.build.destination = resolve_in_root(&self.build.destination, &root);
        self.build.workspace = resolve_in_root(&self.build.workspace, &root);
        self.locales.dir = resolve_in_root(&self.locales.dir, &root);
        self.locales.export = resolve_in_root(&self.locales.export, &root);
        self.set_root(&root);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate(&mut diag);
        self.assets.validate(&mut diag);
        self.minify.validate(&mut diag);
        self.validate_layout(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    /// Check that the directories a build wipes stay apart from each
    /// other and from the site itself.
    ///
    /// `destination`, `workspace` and `export` are all deleted and
    /// recreated, so none may contain the source or the project root.
    /// They may live inside the source tree, since `_`-prefixed entries
    /// are never published.
    fn validate_layout(&self, diag: &mut ConfigDiagnostics) {
        let build = &self.build;
        let export = &self.locales.export;

        for (field, dir) in [
            (FieldPath::new("build.destination"), &build.destination),
            (FieldPath::new("build.workspace"), &build.workspace),
            (FieldPath::new("locales.export"), export),
        ] {
            if build.source.starts_with(dir) || self.root.starts_with(dir) {
                diag.error_with_hint(
                    field,
                    format!("`{}` contains the site source and would be deleted", dir.display()),
                    "use a dedicated folder such as `_site`",
                );
            }
        }

        if overlaps(&build.workspace, &build.destination) {
            diag.error(
                FieldPath::new("build.workspace"),
                "workspace must not overlap build.destination",
            );
        }
        if overlaps(&build.workspace, export) {
            diag.error(
                FieldPath::new("build.workspace"),
                "workspace must not overlap locales.export",
            );
        }
        if overlaps(export, &build.destination) {
            diag.error(
                FieldPath::new("locales.export"),
                "export directory must not overlap build.destination",
            );
        }
    }
}

/// Whether either path contains the other.
fn overlaps(a: &Path, b: &Path) -> bool {
    a.starts_with(b) || b.starts_with(a)
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config rooted at `root`, with all paths resolved under it.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(root: &Path, content: &str) -> SiteConfig {
    let (mut parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.normalize_paths(root);
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = toml::from_str::<SiteConfig>("[build\nminify = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.get_root(), Path::new(""));
        assert!(config.locale.is_none());
        assert_eq!(config.build.destination, PathBuf::from("_site"));
        assert_eq!(config.locales.export, PathBuf::from("_production"));
        assert!(config.assets.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config: SiteConfig = toml::from_str(
            r#"
            locale = "en"

            [build]
            destination = "public"
            minify = true

            [assets.css]
            lib = ["a"]
            custom = ["b"]

            [minify]
            library_prefix = "vendor/"
            "#,
        )
        .unwrap();
        assert_eq!(config.locale.as_deref(), Some("en"));
        assert_eq!(config.build.destination, PathBuf::from("public"));
        assert!(config.build.minify);
        assert_eq!(config.assets.css.custom, vec!["b"]);
        assert_eq!(config.minify.library_prefix, "vendor/");
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) = SiteConfig::parse_with_ignored("[build]\nminfy = true").unwrap();
        assert_eq!(ignored, vec!["build.minfy"]);
    }

    #[test]
    fn test_paths_resolved_under_root() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config(dir.path(), "");
        let root = normalize_path(dir.path());
        assert_eq!(config.get_root(), root);
        assert_eq!(config.build.destination, root.join("_site"));
        assert_eq!(config.build.workspace, root.join("_minify"));
        assert_eq!(config.locales.dir, root.join("_locales"));
        assert_eq!(config.locales.export, root.join("_production"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = <Cli as clap::Parser>::parse_from([
            "tola-press", "build", "-d", "out", "--minify", "-l", "fr",
        ]);
        let mut config = SiteConfig::default();
        config.apply_command_options(&cli.command);
        assert_eq!(config.build.destination, PathBuf::from("out"));
        assert!(config.build.minify);
        assert_eq!(config.locale.as_deref(), Some("fr"));
    }

    #[test]
    fn test_validate_collects_errors() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config(
            dir.path(),
            r#"
            [locales]
            export = "_site"
            [assets.js]
            custom = ["app", "app"]
            "#,
        );
        let err = config.validate().unwrap_err();
        let diag = match err.downcast::<ConfigError>() {
            Ok(ConfigError::Diagnostics(diag)) => diag,
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(diag.errors().len(), 2);
    }

    fn layout_errors(content: &str) -> Vec<&'static str> {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config(dir.path(), content);
        match config.validate() {
            Ok(()) => Vec::new(),
            Err(err) => match err.downcast::<ConfigError>() {
                Ok(ConfigError::Diagnostics(diag)) => {
                    diag.errors().iter().map(|e| e.field.as_str()).collect()
                }
                other => panic!("unexpected error: {other:?}"),
            },
        }
    }

    #[test]
    fn test_default_layout_is_valid() {
        assert!(layout_errors("").is_empty());
    }

    #[test]
    fn test_workspace_inside_destination_rejected() {
        let errors = layout_errors("[build]\nworkspace = \"_site/_minify\"");
        assert_eq!(errors, vec!["build.workspace"]);
    }

    #[test]
    fn test_destination_inside_workspace_rejected() {
        let errors = layout_errors("[build]\nworkspace = \"_out\"\ndestination = \"_out/site\"");
        assert_eq!(errors, vec!["build.workspace"]);
    }

    #[test]
    fn test_workspace_inside_export_rejected() {
        let errors = layout_errors("[build]\nworkspace = \"_production/_minify\"");
        assert_eq!(errors, vec!["build.workspace"]);
    }

    #[test]
    fn test_destination_equal_to_source_rejected() {
        let errors = layout_errors("[build]\ndestination = \".\"");
        assert!(errors.contains(&"build.destination"));
    }

    #[test]
    fn test_destination_containing_root_rejected() {
        let errors = layout_errors("[build]\ndestination = \"..\"");
        assert!(errors.contains(&"build.destination"));
    }

    #[test]
    fn test_export_equal_to_root_rejected() {
        let errors = layout_errors("[locales]\nexport = \".\"");
        assert!(errors.contains(&"locales.export"));
    }

    #[test]
    fn test_workspace_equal_to_source_rejected() {
        let errors = layout_errors("[build]\nworkspace = \".\"");
        assert!(errors.contains(&"build.workspace"));
    }

    #[test]
    fn test_export_inside_destination_rejected() {
        let errors = layout_errors("[locales]\nexport = \"_site/_production\"");
        assert_eq!(errors, vec!["locales.export"]);
    }
}
