//! Minify pass phases.

use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{BuildReport, render};
use crate::{
    asset::{self, AssetKind, AssetOrigin, MinifiedBundle, bundle_name},
    config::{AssetManifest, SiteConfig},
    debug,
    error::PipelineError,
    log, minify,
    render::Renderer,
    workspace,
};

/// Render, bundle and re-render the site against the bundle.
///
/// The live config's asset manifest is swapped only for the second
/// render and is restored before this function returns, on every path.
pub fn minify_pass(
    config: &mut SiteConfig,
    renderer: &dyn Renderer,
) -> Result<BuildReport, PipelineError> {
    if config.assets.is_empty() {
        log!("warning"; "minify enabled but [assets] lists no files");
    }
    let output = render(config, renderer)?;

    let ws = config.build.workspace.clone();
    if let Err(e) = workspace::ensure_clean(&ws) {
        log!("warning"; "could not prepare workspace {}: {}", ws.display(), e);
    }

    let name = bundle_name();
    let bundles = match stage_and_minify(config, &output, &ws, &name) {
        Ok(bundles) => bundles,
        Err(e) => {
            cleanup(&ws);
            return Err(e);
        }
    };

    let result = rerender_and_install(config, renderer, &output, &name, &bundles);
    cleanup(&ws);
    result?;

    log!("build"; "done, bundled as {}", name);
    Ok(BuildReport {
        output,
        bundle: Some(name),
    })
}

/// Extract every kind first, then minify each into the workspace.
fn stage_and_minify(
    config: &SiteConfig,
    output: &Path,
    ws: &Path,
    name: &str,
) -> Result<Vec<MinifiedBundle>, PipelineError> {
    let prefix = &config.minify.library_prefix;

    let mut staged = Vec::with_capacity(AssetKind::ALL.len());
    for kind in AssetKind::ALL {
        let assets = asset::resolve_manifest(&config.assets, kind, prefix, output);
        let library = assets
            .iter()
            .filter(|a| a.origin == AssetOrigin::Library)
            .count();
        debug!("extract"; "{} {} files ({} library)", assets.len(), kind, library);
        staged.push((kind, minify::extract(ws, &assets)?));
    }

    let mut bundles = Vec::with_capacity(staged.len());
    for (kind, sources) in staged {
        let bundle = MinifiedBundle::new(ws, name, kind);
        minify_kind(config, ws, &sources, &bundle)
            .map_err(|source| PipelineError::Minify { kind, source })?;
        bundles.push(bundle);
    }
    Ok(bundles)
}

fn minify_kind(
    config: &SiteConfig,
    ws: &Path,
    sources: &[PathBuf],
    bundle: &MinifiedBundle,
) -> anyhow::Result<()> {
    // Pages still link the bundle, so a kind with no files gets an empty one
    if sources.is_empty() {
        debug!("minify"; "no {} files, writing empty bundle", bundle.kind);
        fs::write(&bundle.path, "")?;
        return Ok(());
    }

    log!("minify"; "{} {} files -> {}", sources.len(), bundle.kind, bundle.file_name());
    minify::for_kind(config, bundle.kind).minify(ws, sources, &bundle.path)
}

/// Swap, re-render, restore, prune and install.
fn rerender_and_install(
    config: &mut SiteConfig,
    renderer: &dyn Renderer,
    output: &Path,
    name: &str,
    bundles: &[MinifiedBundle],
) -> Result<(), PipelineError> {
    let derived = config.assets.derive(name);
    let original = std::mem::replace(&mut config.assets, derived);
    let rendered = render(config, renderer);
    config.assets = original;
    rendered?;

    prune(&config.assets, &config.minify.library_prefix, output);
    install(bundles, output)
}

/// Delete the per-file assets listed in `manifest`. Best-effort.
fn prune(manifest: &AssetManifest, prefix: &str, output: &Path) {
    for kind in AssetKind::ALL {
        for resolved in asset::resolve_manifest(manifest, kind, prefix, output) {
            match fs::remove_file(&resolved.path) {
                Ok(()) => debug!("prune"; "{}", resolved.name),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    log!("warning"; "could not remove {}: {}", resolved.path.display(), e);
                }
            }
        }

        // Only succeeds once the library folder is empty
        if !prefix.is_empty() {
            let lib_dir = asset::asset_dir(output, kind).join(prefix);
            match fs::remove_dir(&lib_dir) {
                Ok(()) => debug!("prune"; "{}", lib_dir.display()),
                Err(e)
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::NotFound | std::io::ErrorKind::DirectoryNotEmpty
                    ) => {}
                Err(e) => {
                    debug!("prune"; "could not remove {}: {}", lib_dir.display(), e);
                }
            }
        }
    }
}

/// Copy each bundle into `assets/<kind>/` of the output tree.
fn install(bundles: &[MinifiedBundle], output: &Path) -> Result<(), PipelineError> {
    for bundle in bundles {
        let dest = asset::asset_dir(output, bundle.kind).join(bundle.file_name());
        workspace::copy_tree(&bundle.path, &dest)
            .map_err(|source| PipelineError::Install { path: dest, source })?;
    }
    Ok(())
}

fn cleanup(ws: &Path) {
    if let Err(e) = workspace::destroy(ws) {
        log!("warning"; "could not remove workspace {}: {}", ws.display(), e);
    }
}
