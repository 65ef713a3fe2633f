//! Built-in renderer: mirrors the source tree into the destination.
//!
//! Entries starting with `_` or `.` are site internals (`_locales`,
//! `_site`, `_production`, dotfiles) and are not published.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::Renderer;
use crate::{config::SiteConfig, debug, workspace};

pub struct CopyRenderer;

impl Renderer for CopyRenderer {
    fn render(&self, config: &SiteConfig) -> Result<PathBuf> {
        let source = &config.build.source;
        let dest = &config.build.destination;

        workspace::ensure_clean(dest)
            .with_context(|| format!("Failed to clear destination: {}", dest.display()))?;

        let entries = workspace::sorted_entries(source)
            .with_context(|| format!("Failed to read source: {}", source.display()))?;

        let mut copied = 0;
        for entry in entries.iter().filter(|e| is_published(e, config)) {
            let Some(name) = entry.file_name() else {
                continue;
            };
            copied += workspace::copy_tree(entry, &dest.join(name))
                .with_context(|| format!("Failed to copy {}", entry.display()))?;
        }

        debug!("render"; "copied {} files into {}", copied, dest.display());
        Ok(dest.clone())
    }
}

fn is_published(path: &Path, config: &SiteConfig) -> bool {
    let internal = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|n| n.starts_with('_') || n.starts_with('.'));

    !internal
        && path != config.build.destination
        && path != config.build.workspace
        && path != config.locales.export
        && path != config.config_path
}
