//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "."
//! destination = "_site"
//! workspace = "_minify"
//! minify = true
//!
//! [build.render]
//! command = ["jekyll", "build", "-s", "$PRESS_SOURCE", "-d", "$PRESS_DESTINATION"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::validate_command;
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Site source tree.
    pub source: PathBuf,

    /// Render output directory.
    pub destination: PathBuf,

    /// Temp workspace for minify passes. Destroyed at the end of each pass.
    pub workspace: PathBuf,

    /// Run a minify pass instead of a plain build.
    pub minify: bool,

    /// Site render operation.
    pub render: RenderConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: ".".into(),
            destination: "_site".into(),
            workspace: "_minify".into(),
            minify: false,
            render: RenderConfig::default(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.source.is_dir() {
            diag.error(
                FieldPath::new("build.source"),
                format!("source directory `{}` not found", self.source.display()),
            );
        }
        self.render.validate(diag);
    }
}

/// External site generator. Empty command selects the built-in copy renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub command: Vec<String>,
}

impl RenderConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.command.is_empty() {
            validate_command(&self.command, FieldPath::new("build.render.command"), diag);
        }
    }
}
