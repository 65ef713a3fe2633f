//! Subprocess-backed minifier.
//!
//! The configured command receives the ordered inputs and the bundle
//! path through placeholders:
//!
//! | Placeholder      | Expands to                                  |
//! |------------------|---------------------------------------------|
//! | `$PRESS_INPUTS`  | one argument per input file, in order       |
//! | `$PRESS_OUTPUT`  | bundle path                                 |
//!
//! Without `$PRESS_INPUTS` the inputs are appended to the command.
//! Without `$PRESS_OUTPUT` the tool's stdout becomes the bundle.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

use super::Minifier;
use crate::utils::exec::{Cmd, FilterRule};

const INPUTS: &str = "$PRESS_INPUTS";
const OUTPUT: &str = "$PRESS_OUTPUT";

/// Noise printed by node-based minifiers on every run.
const NPM_NOISE: FilterRule = FilterRule::new(&[
    "Browserslist: caniuse-lite is outdated",
    "npx browserslist@latest",
    "npm warn",
]);

pub struct CommandMinifier {
    command: Vec<String>,
}

impl CommandMinifier {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    /// Expand placeholders into the final argument list.
    fn expand(&self, sources: &[PathBuf], output: &Path) -> Vec<String> {
        let output = output.display().to_string();
        let inputs: Vec<String> = sources.iter().map(|p| p.display().to_string()).collect();

        let mut args = Vec::with_capacity(self.command.len() + inputs.len());
        for arg in &self.command {
            if arg == INPUTS {
                args.extend(inputs.iter().cloned());
            } else {
                args.push(arg.replace(OUTPUT, &output));
            }
        }
        if !self.command.iter().any(|arg| arg == INPUTS) {
            args.extend(inputs);
        }
        args
    }

    fn writes_output(&self) -> bool {
        self.command.iter().any(|arg| arg.contains(OUTPUT))
    }
}

impl Minifier for CommandMinifier {
    fn minify(&self, workspace: &Path, sources: &[PathBuf], output: &Path) -> Result<()> {
        let args = self.expand(sources, output);
        let result = Cmd::from_slice(&args)
            .cwd(workspace)
            .filter(&NPM_NOISE)
            .run()?;

        if !self.writes_output() {
            fs::write(output, &result.stdout)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
        if !output.is_file() {
            let program = self.command.first().map_or("minifier", String::as_str);
            bail!("`{program}` did not write {}", output.display());
        }
        Ok(())
    }
}
