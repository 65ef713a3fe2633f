//! Site building orchestration.
//!
//! A plain build renders once. A minify pass runs:
//!
//! - **Render** - build the site with the original asset manifest
//! - **Workspace** - recreate the temp workspace
//! - **Extract** - stage the built library/custom assets
//! - **Minify** - merge each kind into `<bundle>.css` / `<bundle>.js`
//! - **Swap** - install the bundle manifest on the live config
//! - **Re-render** - build again against the bundle, then restore the manifest
//! - **Prune** - delete the per-file assets the render left behind
//! - **Install** - copy the bundles into `assets/css` and `assets/js`
//! - **Cleanup** - destroy the workspace
//!
//! Extract, Minify, Install and both renders are fatal on failure.
//! Nothing is pruned before both bundles exist.

mod pass;


use std::path::PathBuf;

use crate::{config::SiteConfig, error::PipelineError, log, render::Renderer};

pub use pass::minify_pass;

/// Result of one build or minify pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Rendered output directory.
    pub output: PathBuf,
    /// Bundle basename, for minify passes.
    pub bundle: Option<String>,
}

/// Run a plain build or a minify pass, depending on `[build] minify`.
pub fn run(config: &mut SiteConfig, renderer: &dyn Renderer) -> Result<BuildReport, PipelineError> {
    if config.build.minify {
        minify_pass(config, renderer)
    } else {
        build_site(config, renderer)
    }
}

/// Render the site once.
pub fn build_site(config: &SiteConfig, renderer: &dyn Renderer) -> Result<BuildReport, PipelineError> {
    let output = render(config, renderer)?;
    log!("build"; "done");
    Ok(BuildReport {
        output,
        bundle: None,
    })
}

/// Render with progress messages.
fn render(config: &SiteConfig, renderer: &dyn Renderer) -> Result<PathBuf, PipelineError> {
    log!("build"; "Source: {}", config.build.source.display());
    log!("build"; "Destination: {}", config.build.destination.display());
    log!("build"; "generating ({})...", config.locale_label());
    renderer.render(config).map_err(PipelineError::Render)
}
