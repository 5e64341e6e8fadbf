//! Single-package add and remove, plus the manifest listing
//!
//! These operate on one entry at a time and leave every other plugin's files
//! alone, unlike the full rebuild in [`super::sync`].

use std::path::Path;

use crate::error::{PluginsError, PluginsResult};
use crate::gitignore::update_gitignore;
use crate::hooks::inject_prepare_hook;
use crate::locator::{has_assets, locate_package};
use crate::manifest::{add_entry, read_manifest, remove_entry, remove_tracked_files};
use crate::materialize::materialize;

use super::{AddResult, ListResult, RemoveResult};

/// Copy one package's assets into `.claude/` and start tracking it.
///
/// Re-adding an already tracked package clears its old files first, so a new
/// version with fewer assets leaves no strays behind. A package without
/// discoverable assets succeeds with an empty file list and touches neither
/// the manifest nor package.json.
pub fn add_package(project_root: &Path, package_name: &str) -> PluginsResult<AddResult> {
    let Some(package_path) = locate_package(package_name, project_root) else {
        return Err(PluginsError::PackageNotFound {
            name: package_name.to_string(),
        });
    };

    let mut result = AddResult {
        package_name: package_name.to_string(),
        ..Default::default()
    };

    if !has_assets(&package_path) {
        return Ok(result);
    }

    let manifest = read_manifest(project_root);
    if let Some(existing) = manifest.get(package_name) {
        result.already_exists = true;
        remove_tracked_files(project_root, &existing.files)?;
    }

    let copied = materialize(&package_path, project_root)?;
    for skipped in &copied.skipped {
        result.warnings.push(format!("could not copy {skipped}"));
    }

    if !copied.files.is_empty() {
        add_entry(
            project_root,
            package_name,
            &copied.version,
            copied.files.clone(),
        )?;
        result.hook_injected = inject_prepare_hook(project_root);
        if let Err(err) = update_gitignore(project_root, &copied.files) {
            result
                .warnings
                .push(format!("could not update .gitignore: {err}"));
        }
    }

    result.version = Some(copied.version);
    result.files = copied.files;
    Ok(result)
}

/// Delete one package's tracked files and drop its manifest entry.
///
/// Only paths that still exist are reported as removed. The node_modules
/// package itself is untouched.
pub fn remove_package(project_root: &Path, package_name: &str) -> PluginsResult<RemoveResult> {
    let manifest = read_manifest(project_root);
    let Some(entry) = manifest.get(package_name) else {
        return Err(PluginsError::NotInstalled {
            name: package_name.to_string(),
        });
    };

    let files_removed = remove_tracked_files(project_root, &entry.files)?;
    remove_entry(project_root, package_name)?;

    Ok(RemoveResult {
        package_name: package_name.to_string(),
        files_removed,
    })
}

/// Report the manifest's plugin entries without touching the filesystem.
pub fn list_plugins(project_root: &Path) -> ListResult {
    ListResult {
        plugins: read_manifest(project_root).plugins,
    }
}
