//! Configuration section definitions.

mod assets;
mod build;
mod locales;
mod minify;

pub use assets::{AssetLists, AssetManifest};
pub use build::{BuildConfig, RenderConfig};
pub use locales::LocalesConfig;
pub use minify::{MinifierConfig, MinifyConfig};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Check that an external command is non-empty and installed.
fn validate_command(command: &[String], field: FieldPath, diag: &mut ConfigDiagnostics) {
    let Some(cmd) = command.first() else {
        return;
    };
    if cmd.trim().is_empty() {
        diag.error(field, "command program is empty");
        return;
    }

    // Package runners can download tools at runtime
    let is_package_runner = ["npx", "bunx", "pnpx", "yarn", "dlx"].contains(&cmd.as_str());
    if which::which(cmd).is_err() && !is_package_runner {
        diag.error_with_hint(
            field,
            format!("`{cmd}` not found"),
            format!("install the command or update {field}"),
        );
    }
}
