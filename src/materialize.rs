//! Asset materializer
//!
//! Copies a package's discoverable assets into the project's `.claude/`
//! directory, kind by kind in a fixed order, and reports exactly which
//! relative paths it wrote. The manifest stores these paths verbatim.

use std::fs;
use std::path::Path;

use crate::assets::{AssetKind, TARGET_DIR};
use crate::error::PluginsResult;
use crate::fs::{copy_dir_recursive, remove_path};
use crate::locator::{eligible_entries, package_version};

/// Outcome of materializing one package.
#[derive(Debug, Clone, Default)]
pub struct MaterializeResult {
    /// Relative paths written, in kind-then-name order.
    pub files: Vec<String>,
    /// The package's declared version (defaulted when unreadable).
    pub version: String,
    /// Entries that failed to copy and were skipped.
    pub skipped: Vec<String>,
}

/// Copy every eligible asset from `package_path` into
/// `<project_root>/.claude/`.
///
/// Kinds are processed in the fixed [`AssetKind::ALL`] order and entries in
/// sorted name order, so the returned `files` sequence is reproducible. A
/// kind whose source directory is absent creates no target directory; one
/// that exists gets its target directory even if nothing is eligible. An
/// entry that fails to copy lands in `skipped` instead of failing the whole
/// operation.
pub fn materialize(package_path: &Path, project_root: &Path) -> PluginsResult<MaterializeResult> {
    let claude_dir = project_root.join(TARGET_DIR);
    let mut result = MaterializeResult {
        version: package_version(package_path),
        ..Default::default()
    };

    for kind in AssetKind::ALL {
        if !package_path.join(kind.dir_name()).is_dir() {
            continue;
        }

        let target_dir = claude_dir.join(kind.dir_name());
        fs::create_dir_all(&target_dir)?;

        for entry in eligible_entries(package_path, kind) {
            let rel = format!("{}/{}", kind.dir_name(), entry.name);
            let target = target_dir.join(&entry.name);

            let copied: PluginsResult<()> = if kind.is_directory_kind() {
                replace_dir(&entry.path, &target)
            } else {
                fs::copy(&entry.path, &target)
                    .map(|_| ())
                    .map_err(Into::into)
            };

            match copied {
                Ok(()) => result.files.push(rel),
                Err(_) => result.skipped.push(rel),
            }
        }
    }

    Ok(result)
}

/// Replace semantics for skill directories: a stale target tree must not
/// leak files into the fresh copy.
fn replace_dir(src: &Path, dst: &Path) -> PluginsResult<()> {
    if dst.exists() {
        remove_path(dst)?;
    }
    copy_dir_recursive(src, dst)
}
