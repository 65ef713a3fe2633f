//! Asset kind definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of bundled asset. Doubles as the file extension and the
/// subdirectory under `assets/` in the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Css,
    Js,
}

impl AssetKind {
    /// Every kind, in the order a minify pass processes them.
    pub const ALL: [AssetKind; 2] = [AssetKind::Css, AssetKind::Js];

    /// File extension without the dot.
    pub const fn ext(self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Js => "js",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ext())
    }
}

/// Which manifest list an asset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOrigin {
    /// Third-party file under the library prefix.
    Library,
    /// Site-authored file.
    Custom,
}
