//! Plugin manifest store
//!
//! The manifest lives at `.claude/.plugins-manifest.json` inside the project
//! and records, per package, the version and the relative paths the last
//! sync materialized. A missing or unparseable manifest reads as empty; only
//! write failures are errors.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::assets::TARGET_DIR;
use crate::error::PluginsResult;
use crate::fs::{atomic_write, remove_path};

/// Manifest filename inside the `.claude` directory.
pub const MANIFEST_FILE: &str = ".plugins-manifest.json";

/// One installed plugin: the version seen at sync time and the relative
/// paths written under `.claude/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    pub version: String,
    #[serde(default)]
    pub files: Vec<String>,
    /// Keys this version does not know about survive a read/write cycle.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PluginEntry {
    pub fn new(version: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            version: version.into(),
            files,
            extra: BTreeMap::new(),
        }
    }
}

/// Durable record of installed-plugin state.
///
/// Entries live in a `BTreeMap` so every iteration (drift probing,
/// reconciliation, listing) sees the same sorted package order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub plugins: BTreeMap<String, PluginEntry>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn get(&self, package_name: &str) -> Option<&PluginEntry> {
        self.plugins.get(package_name)
    }

    /// Replace any existing entry for the package wholesale.
    pub fn upsert(&mut self, package_name: impl Into<String>, entry: PluginEntry) {
        self.plugins.insert(package_name.into(), entry);
    }

    pub fn remove(&mut self, package_name: &str) -> Option<PluginEntry> {
        self.plugins.remove(package_name)
    }
}

/// Absolute path of the manifest file for a project.
pub fn manifest_path(project_root: &Path) -> PathBuf {
    project_root.join(TARGET_DIR).join(MANIFEST_FILE)
}

/// Read the manifest. Missing, unreadable or malformed manifests read as
/// empty rather than failing.
pub fn read_manifest(project_root: &Path) -> Manifest {
    match fs::read_to_string(manifest_path(project_root)) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
        Err(_) => Manifest::new(),
    }
}

/// Write the manifest atomically, creating `.claude/` as needed.
///
/// Output is pretty-printed JSON with a trailing newline so the file diffs
/// cleanly under version control.
pub fn write_manifest(project_root: &Path, manifest: &Manifest) -> PluginsResult<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    atomic_write(&manifest_path(project_root), &format!("{json}\n"))
}

/// Upsert one entry and persist.
pub fn add_entry(
    project_root: &Path,
    package_name: &str,
    version: &str,
    files: Vec<String>,
) -> PluginsResult<()> {
    let mut manifest = read_manifest(project_root);
    manifest.upsert(package_name, PluginEntry::new(version, files));
    write_manifest(project_root, &manifest)
}

/// Drop one entry and persist. Absent entries are a no-op; removing the last
/// entry deletes the manifest file itself.
pub fn remove_entry(project_root: &Path, package_name: &str) -> PluginsResult<()> {
    let mut manifest = read_manifest(project_root);
    manifest.remove(package_name);

    if manifest.plugins.is_empty() && manifest.extra.is_empty() {
        let path = manifest_path(project_root);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        return Ok(());
    }

    write_manifest(project_root, &manifest)
}

/// Remove the given tracked paths (files or directories) from `.claude/`.
///
/// Returns the relative paths that actually existed and were removed, in
/// input order. Paths that would climb out of `.claude` are ignored.
pub fn remove_tracked_files(project_root: &Path, files: &[String]) -> PluginsResult<Vec<String>> {
    let claude_dir = project_root.join(TARGET_DIR);
    let mut removed = Vec::new();

    for rel in files {
        if escapes_target(rel) {
            continue;
        }
        let full = claude_dir.join(rel);
        if full.exists() {
            remove_path(&full)?;
            removed.push(rel.clone());
        }
    }

    Ok(removed)
}

/// Remove every path tracked by any manifest entry, leaving the manifest
/// itself untouched. Returns the flattened list of paths actually removed.
pub fn cleanup_tracked_files(project_root: &Path) -> PluginsResult<Vec<String>> {
    let manifest = read_manifest(project_root);
    let mut removed = Vec::new();

    for entry in manifest.plugins.values() {
        removed.extend(remove_tracked_files(project_root, &entry.files)?);
    }

    Ok(removed)
}

/// Tracked paths are `<kind>/<name>` relative to `.claude`; anything that
/// climbs out of it must never be deleted on the manifest's say-so.
fn escapes_target(rel: &str) -> bool {
    Path::new(rel)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
}
