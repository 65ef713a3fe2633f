//! External renderer: runs the configured site generator.
//!
//! The live config is exposed to the generator through `$PRESS_*`
//! variables, both in the environment and as argument placeholders.
//! `PRESS_ASSETS` carries the current asset manifest as JSON, so a
//! re-render after the bundle swap links the bundle instead of the
//! original files.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use std::path::PathBuf;

use super::Renderer;
use crate::{config::SiteConfig, log, utils::exec::Cmd};

pub struct CommandRenderer {
    command: Vec<String>,
}

impl CommandRenderer {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

impl Renderer for CommandRenderer {
    fn render(&self, config: &SiteConfig) -> Result<PathBuf> {
        let vars = press_vars(config)?;
        let resolved = resolve_args(&self.command, &vars);

        let output = Cmd::from_slice(&resolved)
            .cwd(config.get_root())
            .envs(&vars)
            .run()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if !stdout.is_empty() {
            log!("render"; "{}", stdout);
        }

        let dest = &config.build.destination;
        if !dest.is_dir() {
            bail!("renderer did not produce {}", dest.display());
        }
        Ok(dest.clone())
    }
}

/// Build `$PRESS_*` variables describing the live config.
pub fn press_vars(config: &SiteConfig) -> Result<FxHashMap<String, String>> {
    let mut vars = FxHashMap::default();
    vars.insert("PRESS_ROOT".into(), config.get_root().display().to_string());
    vars.insert(
        "PRESS_SOURCE".into(),
        config.build.source.display().to_string(),
    );
    vars.insert(
        "PRESS_DESTINATION".into(),
        config.build.destination.display().to_string(),
    );
    vars.insert(
        "PRESS_LOCALE".into(),
        config.locale.clone().unwrap_or_default(),
    );
    vars.insert(
        "PRESS_ASSETS".into(),
        serde_json::to_string(&config.assets).context("Failed to encode asset manifest")?,
    );
    Ok(vars)
}

/// Replace `$PRESS_XXX` occurrences in command arguments.
fn resolve_args(args: &[String], vars: &FxHashMap<String, String>) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                result = result.replace(&format!("${key}"), value);
            }
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_press_vars() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(dir.path(), "[assets.css]\ncustom = [\"main\"]");
        config.locale = Some("de".into());

        let vars = press_vars(&config).unwrap();
        assert_eq!(vars["PRESS_LOCALE"], "de");
        assert_eq!(
            vars["PRESS_ASSETS"],
            r#"{"css":{"custom":["main"]},"js":{"custom":[]}}"#
        );
        assert!(vars["PRESS_DESTINATION"].ends_with("_site"));
    }

    #[test]
    fn test_resolve_args() {
        let mut vars = FxHashMap::default();
        vars.insert("PRESS_LOCALE".to_string(), "en".to_string());
        let args = vec!["--locale=$PRESS_LOCALE".to_string(), "plain".to_string()];
        assert_eq!(resolve_args(&args, &vars), vec!["--locale=en", "plain"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_command_renderer_sees_live_config() {
        let dir = TempDir::new().unwrap();
        let mut config = test_parse_config(dir.path(), "");
        config.locale = Some("fr".into());

        let renderer = CommandRenderer::new(vec![
            "sh".into(),
            "-c".into(),
            "mkdir -p \"$PRESS_DESTINATION\" && printf %s \"$PRESS_LOCALE\" > \"$PRESS_DESTINATION/locale.txt\""
                .into(),
        ]);
        let out = renderer.render(&config).unwrap();
        assert_eq!(fs::read_to_string(out.join("locale.txt")).unwrap(), "fr");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_renderer_failure() {
        let dir = TempDir::new().unwrap();
        let config = test_parse_config(dir.path(), "");
        let renderer = CommandRenderer::new(vec!["false".into()]);
        assert!(renderer.render(&config).is_err());
    }
}
