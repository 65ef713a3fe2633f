//! Tola Press - locale exports and minified asset bundles for static sites.

mod asset;
mod build;
mod cli;
mod config;
mod core;
mod error;
mod locale;
mod logger;
mod minify;
mod render;
mod utils;
mod workspace;

#[cfg(test)]
mod test_helpers;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use render::Renderer;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let mut config = SiteConfig::load(&cli)?;
    let renderer = render::from_config(&config);

    match &cli.command {
        Commands::Build { .. } => build::run(&mut config, renderer.as_ref()).map(|_| ())?,
        Commands::Export { .. } => export(&mut config, renderer.as_ref())?,
    }
    Ok(())
}

// =============================================================================
// Export Command
// =============================================================================

fn export(config: &mut SiteConfig, renderer: &dyn Renderer) -> Result<()> {
    let exported = locale::build_all_locales(config, renderer)?;
    if exported.is_empty() {
        log!("locale"; "no locales found in {}", config.locales.dir.display());
        eprintln!("hint: add one `<locale>.<ext>` file per locale, e.g. `en.yml`");
    }
    Ok(())
}
