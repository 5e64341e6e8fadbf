//! Filesystem helpers shared by the manifest store and materializer
//!
//! Uses tempfile + rename for atomic writes so a crashed process never
//! leaves a half-written manifest behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::PluginsResult;

/// Write content to a file atomically.
///
/// The content lands in a temp file in the target directory first and is
/// renamed into place, so readers observe either the old or the new file.
/// Parent directories are created as needed.
pub fn atomic_write(path: &Path, content: &str) -> PluginsResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Copy a directory tree, creating the destination.
///
/// Existing files at the destination are overwritten; the caller is
/// responsible for removing the destination first when replace semantics
/// are wanted.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> PluginsResult<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Remove a path, whether it is a file, a symlink or a directory tree.
pub fn remove_path(path: &Path) -> PluginsResult<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}
