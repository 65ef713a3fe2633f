//! Manifest to file path resolution.
//!
//! Pure functions: library entries always precede custom entries, and
//! manifest order is preserved inside each list.
//!
//! ```text
//! css = { lib = ["normalize"], custom = ["main"] }
//!
//! resolve(css, Css, "lib/")         -> ["lib/normalize.css", "main.css"]
//! qualify("_site/assets/css", ..)   -> ["_site/assets/css/lib/normalize.css", "_site/assets/css/main.css"]
//! ```

use std::path::{Path, PathBuf};

use super::{AssetKind, AssetOrigin};
use crate::config::{AssetLists, AssetManifest};

/// Library subfolder used when `[minify] library_prefix` is not set.
pub const DEFAULT_LIBRARY_PREFIX: &str = "lib/";

/// A fully-qualified asset file tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// Name relative to the kind's asset directory, e.g. `lib/a.css`.
    pub name: String,
    pub path: PathBuf,
    pub kind: AssetKind,
    pub origin: AssetOrigin,
}

/// Directory holding assets of `kind` inside a rendered site.
pub fn asset_dir(output: &Path, kind: AssetKind) -> PathBuf {
    output.join("assets").join(kind.ext())
}

/// Relative file names for one manifest entry, library first.
pub fn resolve(lists: &AssetLists, kind: AssetKind, library_prefix: &str) -> Vec<String> {
    let ext = kind.ext();
    let library = lists
        .library
        .iter()
        .flatten()
        .map(|name| format!("{library_prefix}{name}.{ext}"));
    let custom = lists.custom.iter().map(|name| format!("{name}.{ext}"));
    library.chain(custom).collect()
}

/// Prefix every name with `base_dir`.
pub fn qualify(base_dir: &Path, names: &[String]) -> Vec<PathBuf> {
    names.iter().map(|name| base_dir.join(name)).collect()
}

/// Resolve one asset kind of `manifest` against a rendered output tree.
pub fn resolve_manifest(
    manifest: &AssetManifest,
    kind: AssetKind,
    library_prefix: &str,
    output: &Path,
) -> Vec<ResolvedAsset> {
    let lists = manifest.get(kind);
    let library_len = lists.library.as_ref().map_or(0, Vec::len);
    let names = resolve(lists, kind, library_prefix);
    let paths = qualify(&asset_dir(output, kind), &names);

    names
        .into_iter()
        .zip(paths)
        .enumerate()
        .map(|(idx, (name, path))| ResolvedAsset {
            name,
            path,
            kind,
            origin: if idx < library_len {
                AssetOrigin::Library
            } else {
                AssetOrigin::Custom
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists(library: &[&str], custom: &[&str]) -> AssetLists {
        AssetLists {
            library: Some(library.iter().map(ToString::to_string).collect()),
            custom: custom.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_library_before_custom() {
        let entry = lists(&["jquery", "bootstrap"], &["app", "admin"]);
        assert_eq!(
            resolve(&entry, AssetKind::Js, "lib/"),
            vec!["lib/jquery.js", "lib/bootstrap.js", "app.js", "admin.js"]
        );
    }

    #[test]
    fn test_empty_lists() {
        assert!(resolve(&lists(&[], &[]), AssetKind::Css, "lib/").is_empty());
        assert_eq!(
            resolve(&lists(&[], &["main"]), AssetKind::Css, "lib/"),
            vec!["main.css"]
        );

        let no_library = AssetLists {
            library: None,
            custom: vec!["bundle".into()],
        };
        assert_eq!(resolve(&no_library, AssetKind::Css, "lib/"), vec!["bundle.css"]);
    }

    #[test]
    fn test_custom_prefix() {
        let entry = lists(&["normalize"], &[]);
        assert_eq!(
            resolve(&entry, AssetKind::Css, "vendor/"),
            vec!["vendor/normalize.css"]
        );
    }

    #[test]
    fn test_qualify() {
        let names = vec!["lib/a.css".to_string(), "b.css".to_string()];
        assert_eq!(
            qualify(Path::new("/site/assets/css"), &names),
            vec![
                PathBuf::from("/site/assets/css/lib/a.css"),
                PathBuf::from("/site/assets/css/b.css"),
            ]
        );
    }

    #[test]
    fn test_resolve_manifest_tags_origin() {
        let manifest = AssetManifest {
            css: lists(&["a"], &["b"]),
            js: lists(&[], &["c"]),
        };
        let css = resolve_manifest(&manifest, AssetKind::Css, "lib/", Path::new("/out"));
        assert_eq!(css.len(), 2);
        assert_eq!(css[0].name, "lib/a.css");
        assert_eq!(css[0].path, PathBuf::from("/out/assets/css/lib/a.css"));
        assert_eq!(css[0].origin, AssetOrigin::Library);
        assert_eq!(css[1].path, PathBuf::from("/out/assets/css/b.css"));
        assert_eq!(css[1].origin, AssetOrigin::Custom);

        let js = resolve_manifest(&manifest, AssetKind::Js, "lib/", Path::new("/out"));
        assert_eq!(js.len(), 1);
        assert_eq!(js[0].kind, AssetKind::Js);
        assert_eq!(js[0].path, PathBuf::from("/out/assets/js/c.js"));
    }
}
