//! `[minify]` section configuration.
//!
//! Each asset kind uses the built-in minifier unless a command is set.
//! Commands receive `$PRESS_INPUTS` (ordered input files) and
//! `$PRESS_OUTPUT` (bundle path).
//!
//! ```toml
//! [minify]
//! library_prefix = "vendor/"
//! css = { command = ["cleancss", "-o", "$PRESS_OUTPUT", "$PRESS_INPUTS"] }
//! ```

use serde::{Deserialize, Serialize};

use super::validate_command;
use crate::asset::{AssetKind, DEFAULT_LIBRARY_PREFIX};
use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Subfolder of `assets/<kind>/` holding library files.
    pub library_prefix: String,
    pub css: MinifierConfig,
    pub js: MinifierConfig,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            library_prefix: DEFAULT_LIBRARY_PREFIX.into(),
            css: MinifierConfig::default(),
            js: MinifierConfig::default(),
        }
    }
}

impl MinifyConfig {
    pub fn get(&self, kind: AssetKind) -> &MinifierConfig {
        match kind {
            AssetKind::Css => &self.css,
            AssetKind::Js => &self.js,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.library_prefix.starts_with('/') || self.library_prefix.contains("..") {
            diag.error(
                FieldPath::new("minify.library_prefix"),
                format!("`{}` must be a relative folder", self.library_prefix),
            );
        }
        if !self.css.command.is_empty() {
            validate_command(&self.css.command, FieldPath::new("minify.css.command"), diag);
        }
        if !self.js.command.is_empty() {
            validate_command(&self.js.command, FieldPath::new("minify.js.command"), diag);
        }
    }
}

/// Minifier for one asset kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifierConfig {
    /// External command; empty selects the built-in minifier.
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_builtin() {
        let config = MinifyConfig::default();
        assert_eq!(config.library_prefix, "lib/");
        assert!(config.get(AssetKind::Css).command.is_empty());
        assert!(config.get(AssetKind::Js).command.is_empty());
    }

    #[test]
    fn test_absolute_prefix_rejected() {
        let config = MinifyConfig {
            library_prefix: "/lib/".into(),
            ..MinifyConfig::default()
        };
        let mut diag = ConfigDiagnostics::new();
        config.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
    }
}
