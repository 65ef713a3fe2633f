//! Multi-locale export.
//!
//! Locales are discovered from `[locales] dir` (one `<id>.<ext>` file per
//! locale). Each locale is built in turn against the live config and the
//! rendered output is copied to `<export>/<id>/`. The first failing
//! locale halts the run.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashSet;

use crate::{
    build, config::SiteConfig, debug, error::PipelineError, log, render::Renderer, workspace,
};

/// Ordered locale ids discovered for one run.
pub type LocaleSet = Vec<String>;

/// Locale ids found in `dir`, sorted.
///
/// Hidden files and files without an extension are ignored. A missing
/// directory yields no locales.
pub fn discover_locales(dir: &Path) -> io::Result<LocaleSet> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut seen = FxHashSet::default();
    let mut locales = LocaleSet::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none() {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if id.is_empty() || id.starts_with('.') {
            continue;
        }
        if seen.insert(id.to_owned()) {
            locales.push(id.to_owned());
        }
    }
    locales.sort();
    Ok(locales)
}

/// Build every discovered locale and export each into `[locales] export`.
///
/// Returns the `(locale, export path)` pairs in build order. An empty
/// list means no locales were found and nothing was built.
pub fn build_all_locales(
    config: &mut SiteConfig,
    renderer: &dyn Renderer,
) -> Result<Vec<(String, PathBuf)>, PipelineError> {
    let locales = match discover_locales(&config.locales.dir) {
        Ok(locales) => locales,
        Err(e) => {
            debug!("locale"; "could not read {}: {}", config.locales.dir.display(), e);
            LocaleSet::new()
        }
    };
    if locales.is_empty() {
        return Ok(Vec::new());
    }

    export_locales(config, renderer, &locales, crate::core::is_shutdown)
}

/// Build and export `locales` in order, checking `interrupted` before each.
fn export_locales(
    config: &mut SiteConfig,
    renderer: &dyn Renderer,
    locales: &[String],
    interrupted: impl Fn() -> bool,
) -> Result<Vec<(String, PathBuf)>, PipelineError> {
    let export = config.locales.export.clone();
    workspace::ensure_clean(&export).map_err(|source| PipelineError::ExportDir {
        path: export.clone(),
        source,
    })?;

    let saved = config.locale.take();
    let mut exported = Vec::with_capacity(locales.len());
    let mut result = Ok(());
    for locale in locales {
        if interrupted() {
            result = Err(PipelineError::Interrupted {
                locale: locale.clone(),
            });
            break;
        }

        log!("locale"; "building {}", locale);
        config.locale = Some(locale.clone());
        match export_one(config, renderer, &export, locale) {
            Ok(path) => exported.push((locale.clone(), path)),
            Err(e) => {
                result = Err(e.in_locale(locale));
                break;
            }
        }
    }
    config.locale = saved;
    result?;

    for (locale, path) in &exported {
        log!("export"; "Exported {} to: {}", locale, path.display());
    }
    Ok(exported)
}

fn export_one(
    config: &mut SiteConfig,
    renderer: &dyn Renderer,
    export: &Path,
    locale: &str,
) -> Result<PathBuf, PipelineError> {
    let report = build::run(config, renderer)?;
    let dest = export.join(locale);
    workspace::copy_tree(&report.output, &dest).map_err(|source| PipelineError::Export {
        path: dest.clone(),
        source,
    })?;
    Ok(dest)
}
