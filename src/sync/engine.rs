//! Drift detection and the reconcile pass
//!
//! A sync run either terminates as a no-op (empty manifest, or nothing
//! drifted) or rebuilds the whole `.claude/` tree from the packages the old
//! manifest names. Rebuilding never discovers new packages; that is the add
//! operation's job.

use std::collections::HashMap;
use std::path::Path;

use crate::error::PluginsResult;
use crate::gitignore::update_gitignore;
use crate::locator::{discoverable_files, has_assets, locate_package, package_version};
use crate::manifest::{cleanup_tracked_files, read_manifest, write_manifest, Manifest, PluginEntry};
use crate::materialize::materialize;

use super::{PluginSummary, SyncOptions, SyncResult};

/// Reconcile `.claude/` with the manifest's packages.
///
/// Without `force`, the manifest entries are probed in sorted package order
/// and the run stops as "All plugins up to date" when nothing drifted. With
/// `force`, the probe is skipped and the tree is rebuilt unconditionally.
pub fn sync(project_root: &Path, options: SyncOptions) -> PluginsResult<SyncResult> {
    let manifest = read_manifest(project_root);

    if manifest.is_empty() {
        return Ok(SyncResult::no_op("No plugins to sync", 0));
    }

    let mut reason = None;
    if !options.force {
        match detect_drift(project_root, &manifest) {
            Some(drift) => reason = Some(drift),
            None => {
                return Ok(SyncResult::no_op(
                    "All plugins up to date",
                    manifest.plugins.len(),
                ))
            }
        }
    }

    let mut result = reconcile(project_root, &manifest)?;
    result.reason = reason;
    Ok(result)
}

/// Probe every entry for drift; the first drifted package short-circuits.
fn detect_drift(project_root: &Path, manifest: &Manifest) -> Option<String> {
    for (name, entry) in &manifest.plugins {
        let Some(package_path) = locate_package(name, project_root) else {
            return Some(format!("{name} was uninstalled"));
        };

        let current_version = package_version(&package_path);
        if current_version != entry.version {
            return Some(format!(
                "{} changed ({} → {})",
                name, entry.version, current_version
            ));
        }

        // Compared as sorted sets so newly added asset kinds are picked up
        // even without a version bump.
        let discoverable = discoverable_files(&package_path);
        let mut tracked = entry.files.clone();
        tracked.sort();
        if discoverable != tracked {
            return Some(format!("{name} has new discoverable assets"));
        }
    }

    None
}

/// Clear every tracked file, then rebuild the tree and a fresh manifest from
/// the old manifest's package names.
fn reconcile(project_root: &Path, old: &Manifest) -> PluginsResult<SyncResult> {
    cleanup_tracked_files(project_root)?;

    // Top-level keys we do not understand ride along unchanged.
    let mut new_manifest = Manifest {
        extra: old.extra.clone(),
        ..Default::default()
    };
    let mut ownership: HashMap<String, String> = HashMap::new();
    let mut result = SyncResult {
        synced: true,
        ..Default::default()
    };

    for name in old.plugins.keys() {
        let Some(package_path) = locate_package(name, project_root) else {
            result.removed_plugins.push(name.clone());
            continue;
        };

        if !has_assets(&package_path) {
            continue;
        }

        let copied = materialize(&package_path, project_root)?;
        for skipped in &copied.skipped {
            result.warnings.push(format!("{name}: could not copy {skipped}"));
        }

        if copied.files.is_empty() {
            continue;
        }

        for file in &copied.files {
            if let Some(previous) = ownership.get(file) {
                result
                    .conflicts
                    .push(format!("{file} ({previous} vs {name})"));
            }
            ownership.insert(file.clone(), name.clone());
        }

        result.total_files += copied.files.len();
        result.installed_plugins.push(PluginSummary {
            name: name.clone(),
            version: copied.version.clone(),
            file_count: copied.files.len(),
        });
        new_manifest.upsert(name.clone(), PluginEntry::new(copied.version, copied.files));
    }

    write_manifest(project_root, &new_manifest)?;
    result.plugin_count = new_manifest.plugins.len();

    let tracked: Vec<String> = new_manifest
        .plugins
        .values()
        .flat_map(|entry| entry.files.iter().cloned())
        .collect();
    if let Err(err) = update_gitignore(project_root, &tracked) {
        result.warnings.push(format!("could not update .gitignore: {err}"));
    }

    Ok(result)
}
