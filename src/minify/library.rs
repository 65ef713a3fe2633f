//! In-process minification for JS and CSS bundles.
//!
//! Uses oxc for JavaScript and lightningcss for CSS.

use anyhow::{Context, Result, anyhow, bail};
use std::fs;
use std::path::{Path, PathBuf};

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier as OxcMinifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::Minifier;
use crate::asset::AssetKind;

/// Reads every source, joins them with a newline and minifies the
/// merged text in-process.
///
/// An empty JS result is a failure; an empty CSS result is written as is.
pub struct LibraryMinifier {
    kind: AssetKind,
}

impl LibraryMinifier {
    pub fn new(kind: AssetKind) -> Self {
        Self { kind }
    }

    fn minify_text(&self, source: &str) -> Option<String> {
        match self.kind {
            AssetKind::Css => minify_css(source),
            AssetKind::Js => minify_js(source),
        }
    }
}

impl Minifier for LibraryMinifier {
    fn minify(&self, _workspace: &Path, sources: &[PathBuf], output: &Path) -> Result<()> {
        let merged = sources
            .iter()
            .map(|path| {
                fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))
            })
            .collect::<Result<Vec<_>>>()?
            .join("\n");

        let minified = self
            .minify_text(&merged)
            .ok_or_else(|| anyhow!("failed to parse merged {} sources", self.kind))?;
        // A comment-only stylesheet legitimately minifies to nothing
        if self.kind == AssetKind::Js && minified.trim().is_empty() {
            bail!("minified {} bundle is empty", self.kind);
        }

        fs::write(output, minified)
            .with_context(|| format!("Failed to write {}", output.display()))
    }
}

/// Minify JavaScript source code.
///
/// Bundled files are classic scripts, so they are parsed as CommonJS
/// rather than as modules.
fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let source_type = SourceType::cjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = OxcMinifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Some(code)
}

/// Minify CSS source code.
fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}
