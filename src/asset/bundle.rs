//! Minified bundle naming.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::AssetKind;

/// Passes started by this process, so two passes in the same
/// millisecond still get distinct names.
static PASS_SEQ: AtomicU64 = AtomicU64::new(0);

/// Pass-unique bundle basename, e.g. `min-1760601600123-0`.
pub fn bundle_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = PASS_SEQ.fetch_add(1, Ordering::SeqCst);
    format!("min-{millis}-{seq}")
}

/// One merged, minified output file staged in the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifiedBundle {
    pub kind: AssetKind,
    pub name: String,
    pub path: PathBuf,
}

impl MinifiedBundle {
    pub fn new(workspace: &Path, name: &str, kind: AssetKind) -> Self {
        Self {
            kind,
            name: name.to_owned(),
            path: workspace.join(format!("{name}.{}", kind.ext())),
        }
    }

    /// File name the bundle is installed under (`<name>.<ext>`).
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.kind.ext())
    }
}
