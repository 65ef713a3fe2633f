//! Pipeline error taxonomy.
//!
//! Only the failures that would leave the output tree inconsistent are
//! represented here. Best-effort steps (workspace cleanup, locale scan)
//! report through `std::io::Result` and are logged by their callers.

use std::path::PathBuf;
use thiserror::Error;

use crate::asset::AssetKind;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("site render failed")]
    Render(#[source] anyhow::Error),

    #[error("extraction failed: could not stage `{}`", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not minify JS or CSS ({kind} bundle)")]
    Minify {
        kind: AssetKind,
        #[source]
        source: anyhow::Error,
    },

    #[error("could not copy minified assets to `{}`", .path.display())]
    Install {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not recreate export directory `{}`", .path.display())]
    ExportDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not export output to `{}`", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("build failed for locale `{locale}`")]
    Locale {
        locale: String,
        #[source]
        source: Box<PipelineError>,
    },

    #[error("interrupted before locale `{locale}`")]
    Interrupted { locale: String },
}

impl PipelineError {
    /// Wrap a pass failure with the locale it happened in.
    pub fn in_locale(self, locale: &str) -> Self {
        Self::Locale {
            locale: locale.to_owned(),
            source: Box::new(self),
        }
    }
}
