//! `[assets]` section: the typed asset manifest.
//!
//! # Example
//!
//! ```toml
//! [assets.css]
//! lib = ["normalize", "grid"]
//! custom = ["main"]
//!
//! [assets.js]
//! lib = ["jquery"]
//! custom = ["app"]
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::asset::AssetKind;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Library and custom file names for one asset kind, without extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetLists {
    /// Third-party files, resolved under the library prefix.
    /// `None` once a bundle has replaced them.
    #[serde(rename = "lib", alias = "library", skip_serializing_if = "Option::is_none")]
    pub library: Option<Vec<String>>,

    /// Site-authored files.
    pub custom: Vec<String>,
}

/// Per-kind asset lists, validated once at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    pub css: AssetLists,
    pub js: AssetLists,
}

impl AssetManifest {
    pub fn get(&self, kind: AssetKind) -> &AssetLists {
        match kind {
            AssetKind::Css => &self.css,
            AssetKind::Js => &self.js,
        }
    }

    fn get_mut(&mut self, kind: AssetKind) -> &mut AssetLists {
        match kind {
            AssetKind::Css => &mut self.css,
            AssetKind::Js => &mut self.js,
        }
    }

    /// Whether any kind lists at least one file.
    pub fn is_empty(&self) -> bool {
        AssetKind::ALL.iter().all(|&kind| {
            let lists = self.get(kind);
            lists.custom.is_empty() && lists.library.as_ref().is_none_or(Vec::is_empty)
        })
    }

    /// Manifest that points every kind at the single bundle `output_name`.
    ///
    /// Library lists are dropped and custom lists become `[output_name]`.
    /// `self` is left untouched so it can be restored after the swap.
    pub fn derive(&self, output_name: &str) -> Self {
        let mut derived = self.clone();
        for kind in AssetKind::ALL {
            let lists = derived.get_mut(kind);
            lists.library = None;
            lists.custom = vec![output_name.to_owned()];
        }
        derived
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for kind in AssetKind::ALL {
            let lists = self.get(kind);
            let (lib_field, custom_field) = match kind {
                AssetKind::Css => (
                    FieldPath::new("assets.css.lib"),
                    FieldPath::new("assets.css.custom"),
                ),
                AssetKind::Js => (
                    FieldPath::new("assets.js.lib"),
                    FieldPath::new("assets.js.custom"),
                ),
            };
            if let Some(library) = &lists.library {
                validate_names(library, lib_field, diag);
            }
            validate_names(&lists.custom, custom_field, diag);
        }
    }
}

/// Names must be non-empty, relative, unique within their list.
fn validate_names(names: &[String], field: FieldPath, diag: &mut ConfigDiagnostics) {
    let mut seen = FxHashSet::default();
    for (idx, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            diag.error(field, format!("[{idx}] empty asset name"));
            continue;
        }
        if name.starts_with('/') || name.split('/').any(|part| part == "..") {
            diag.error_with_hint(
                field,
                format!("[{idx}] `{name}` must stay inside the assets directory"),
                "use a name relative to assets/<kind>/, without `..`",
            );
        }
        if !seen.insert(name.as_str()) {
            diag.error(field, format!("[{idx}] duplicate asset name `{name}`"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> AssetManifest {
        toml::from_str(
            r#"
            [css]
            lib = ["a"]
            custom = ["b"]
            [js]
            lib = []
            custom = ["c"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_lists() {
        let m = manifest();
        assert_eq!(m.css.library, Some(vec!["a".to_string()]));
        assert_eq!(m.css.custom, vec!["b"]);
        assert_eq!(m.js.library, Some(vec![]));
        assert_eq!(m.js.custom, vec!["c"]);
    }

    #[test]
    fn test_library_alias() {
        let m: AssetManifest = toml::from_str("[css]\nlibrary = [\"x\"]").unwrap();
        assert_eq!(m.css.library, Some(vec!["x".to_string()]));
        assert!(m.js.custom.is_empty());
    }

    #[test]
    fn test_derive_replaces_lists() {
        let original = manifest();
        let snapshot = original.clone();

        let derived = original.derive("min-1-0");

        assert_eq!(original, snapshot);
        for kind in AssetKind::ALL {
            assert_eq!(derived.get(kind).library, None);
            assert_eq!(derived.get(kind).custom, vec!["min-1-0"]);
        }
    }

    #[test]
    fn test_derive_serializes_without_library() {
        let derived = manifest().derive("min-1-0");
        let json = serde_json::to_string(&derived).unwrap();
        assert_eq!(
            json,
            r#"{"css":{"custom":["min-1-0"]},"js":{"custom":["min-1-0"]}}"#
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(AssetManifest::default().is_empty());
        assert!(!manifest().is_empty());
    }

    #[test]
    fn test_validate_ok() {
        let mut diag = ConfigDiagnostics::new();
        manifest().validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_validate_duplicates_within_list() {
        let m: AssetManifest =
            toml::from_str("[css]\nlib = [\"a\", \"a\"]\ncustom = [\"a\"]").unwrap();
        let mut diag = ConfigDiagnostics::new();
        m.validate(&mut diag);
        // Same name across lib/custom is allowed
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "assets.css.lib");
    }

    #[test]
    fn test_validate_bad_names() {
        let m: AssetManifest =
            toml::from_str("[js]\ncustom = [\"\", \"../escape\", \"/abs\"]").unwrap();
        let mut diag = ConfigDiagnostics::new();
        m.validate(&mut diag);
        assert_eq!(diag.errors().len(), 3);
    }
}
