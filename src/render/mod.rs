//! Site render operation.
//!
//! The orchestrator treats rendering as an opaque full rebuild:
//! `render(config)` regenerates the destination directory from the
//! source tree using whatever asset manifest and locale `config` holds
//! at that moment.
//!
//! | Renderer          | Selected when                  |
//! |-------------------|--------------------------------|
//! | `CopyRenderer`    | `[build.render] command` empty |
//! | `CommandRenderer` | command configured             |

mod command;
mod copy;

pub use command::CommandRenderer;
pub use copy::CopyRenderer;

use anyhow::Result;
use std::path::PathBuf;

use crate::config::SiteConfig;

/// Render the site described by `config`, returning the output directory.
pub trait Renderer {
    fn render(&self, config: &SiteConfig) -> Result<PathBuf>;
}

/// Pick the renderer configured in `[build.render]`.
pub fn from_config(config: &SiteConfig) -> Box<dyn Renderer> {
    if config.build.render.command.is_empty() {
        Box::new(CopyRenderer)
    } else {
        Box::new(CommandRenderer::new(config.build.render.command.clone()))
    }
}
