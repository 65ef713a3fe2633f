//! Minifier invocation.
//!
//! A minify pass stages the built assets into the workspace with
//! [`extract`], then hands each kind's ordered file list to a
//! [`Minifier`], which writes one merged bundle.
//!
//! | Variant           | Backend                                |
//! |-------------------|----------------------------------------|
//! | `LibraryMinifier` | in-process: oxc (JS), lightningcss (CSS) |
//! | `CommandMinifier` | external tool from `[minify.<kind>]`   |

mod command;
mod library;

pub use command::CommandMinifier;
pub use library::LibraryMinifier;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::{
    asset::{AssetKind, ResolvedAsset},
    config::SiteConfig,
    error::PipelineError,
    workspace,
};

/// Merge and minify an ordered list of files into one output file.
pub trait Minifier {
    /// `sources` are concatenated in order; `output` must exist afterwards.
    fn minify(&self, workspace: &Path, sources: &[PathBuf], output: &Path) -> Result<()>;
}

/// Pick the minifier configured for `kind`.
pub fn for_kind(config: &SiteConfig, kind: AssetKind) -> Box<dyn Minifier> {
    let command = &config.minify.get(kind).command;
    if command.is_empty() {
        Box::new(LibraryMinifier::new(kind))
    } else {
        Box::new(CommandMinifier::new(command.clone()))
    }
}

/// Copy resolved assets into `workspace/<kind>/`, keeping their order.
///
/// Returns the staged copies. Any failed copy aborts the extraction.
pub fn extract(workspace: &Path, assets: &[ResolvedAsset]) -> Result<Vec<PathBuf>, PipelineError> {
    assets
        .iter()
        .map(|asset| {
            let staged = workspace.join(asset.kind.ext()).join(&asset.name);
            workspace::copy_tree(&asset.path, &staged)
                .map(|_| staged)
                .map_err(|source| PipelineError::Extract {
                    path: asset.path.clone(),
                    source,
                })
        })
        .collect()
}
