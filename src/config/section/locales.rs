//! `[locales]` section configuration.
//!
//! ```toml
//! [locales]
//! dir = "_locales"        # one file per locale: en.yml, de.yml
//! export = "_production"  # _production/<locale>/
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalesConfig {
    /// Locale definition directory.
    pub dir: PathBuf,

    /// Export directory, recreated for every multi-locale run.
    pub export: PathBuf,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            dir: "_locales".into(),
            export: "_production".into(),
        }
    }
}
