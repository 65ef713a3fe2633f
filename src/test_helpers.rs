//! Shared fixtures for orchestration tests.

use anyhow::{Result, bail};
use std::{
    cell::RefCell,
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

use crate::{
    asset::{AssetKind, resolve},
    config::{AssetManifest, SiteConfig, test_parse_config},
    render::{CopyRenderer, Renderer},
};

/// `css: {lib: [a], custom: [b]}, js: {lib: [], custom: [c]}`
pub const SCENARIO_CONFIG: &str = r#"
[assets.css]
lib = ["a"]
custom = ["b"]

[assets.js]
lib = []
custom = ["c"]
"#;

/// Site source tree matching `SCENARIO_CONFIG`, with two locales.
pub fn scenario_site(extra_config: &str) -> (TempDir, SiteConfig) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "assets/css/lib/a.css", ".a { color: red; }\n");
    write(root, "assets/css/b.css", ".b { margin: 0; }\n");
    write(root, "assets/js/c.js", "window.c = function () { return 1; };\n");
    write(root, "assets/img/logo.svg", "<svg/>");
    write(root, "about/index.html", "<p>about</p>");
    write(root, "_locales/en.yml", "hello: Hello");
    write(root, "_locales/de.yml", "hello: Hallo");

    let config = test_parse_config(root, &format!("{SCENARIO_CONFIG}\n{extra_config}"));
    (dir, config)
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Every file under `dir` keyed by relative path.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    jwalk::WalkDir::new(dir)
        .skip_hidden(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let path = e.path();
            let rel = path.strip_prefix(dir).unwrap().to_path_buf();
            (rel, fs::read(&path).unwrap())
        })
        .collect()
}

/// File names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Copy renderer that also writes an `index.html` linking every
/// manifest asset, and records the config each call saw.
#[derive(Default)]
pub struct TestRenderer {
    pub calls: RefCell<Vec<(Option<String>, AssetManifest)>>,
    /// 1-based call number that fails.
    pub fail_on_call: Option<usize>,
    /// Locale whose renders fail.
    pub fail_locale: Option<String>,
}

impl TestRenderer {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn failing_locale(locale: &str) -> Self {
        Self {
            fail_locale: Some(locale.into()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Renderer for TestRenderer {
    fn render(&self, config: &SiteConfig) -> Result<PathBuf> {
        let call = {
            let mut calls = self.calls.borrow_mut();
            calls.push((config.locale.clone(), config.assets.clone()));
            calls.len()
        };
        if self.fail_on_call == Some(call) {
            bail!("render {call} failed");
        }
        if self.fail_locale.is_some() && self.fail_locale == config.locale {
            bail!("render failed for {}", config.locale_label());
        }

        let out = CopyRenderer.render(config)?;
        let mut html = format!("<html lang=\"{}\">\n", config.locale_label());
        for kind in AssetKind::ALL {
            let names = resolve(config.assets.get(kind), kind, &config.minify.library_prefix);
            for name in names {
                html.push_str(&format!("<link href=\"/assets/{kind}/{name}\">\n"));
            }
        }
        fs::write(out.join("index.html"), html)?;
        Ok(out)
    }
}
