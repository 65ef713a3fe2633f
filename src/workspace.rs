//! Ephemeral directories: the minify workspace and the export directory.
//!
//! Every operation here is best-effort. Failures come back as
//! `io::Result` for the caller to log and branch on; nothing in this
//! module aborts a multi-locale run by itself.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use jwalk::WalkDir;

/// Delete `path` if present, then create it empty.
pub fn ensure_clean(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else if path.exists() {
        fs::remove_file(path)?;
    }
    fs::create_dir_all(path)
}

/// Recursively delete `path`. Missing paths are not an error.
pub fn destroy(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Copy a file or a whole directory tree to `dest`.
///
/// Directories are merged into `dest`; existing files are overwritten.
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dest: &Path) -> io::Result<usize> {
    let meta = fs::metadata(src)?;
    if !meta.is_dir() {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dest)?;
        return Ok(1);
    }

    fs::create_dir_all(dest)?;
    let mut copied = 0;
    for entry in WalkDir::new(src).skip_hidden(false).min_depth(1) {
        let entry = entry.map_err(|e| io::Error::other(e.to_string()))?;
        let path = entry.path();
        let rel = path.strip_prefix(src).map_err(io::Error::other)?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&path, &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Immediate children of `dir`, sorted by name.
pub fn sorted_entries(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}
