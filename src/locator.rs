//! Package location and asset discovery
//!
//! Resolves a dependency's on-disk directory for a given project root, reads
//! its declared version and probes which assets it ships. Discovery is the
//! read-only twin of materialization: `discoverable_files` must list exactly
//! the paths a materialize call would write.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assets::{AssetKind, GITKEEP};

/// Version reported when a package has no readable version field.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Subset of a dependency's `package.json` this tool cares about.
#[derive(Debug, Deserialize)]
struct PackageMetadata {
    #[serde(default)]
    version: Option<String>,
}

/// Resolve a package's directory for the given project root.
///
/// Tries the flat layout first, then the pnpm virtual store, then hoisted
/// `node_modules` directories up the ancestor chain. Returns `None` when no
/// strategy finds a package directory.
pub fn locate_package(package_name: &str, project_root: &Path) -> Option<PathBuf> {
    let direct = project_root.join("node_modules").join(package_name);
    if direct.is_dir() {
        return Some(direct);
    }

    if let Some(found) = locate_in_pnpm_store(package_name, project_root) {
        return Some(found);
    }

    for ancestor in project_root.ancestors().skip(1) {
        let candidate = ancestor.join("node_modules").join(package_name);
        if candidate.is_dir() {
            return Some(candidate);
        }
    }

    None
}

/// pnpm keeps real package directories under
/// `node_modules/.pnpm/<pkg>@<version>/node_modules/<pkg>` and only links
/// direct dependencies at the top level.
fn locate_in_pnpm_store(package_name: &str, project_root: &Path) -> Option<PathBuf> {
    let store = project_root.join("node_modules").join(".pnpm");
    let entries = fs::read_dir(&store).ok()?;

    let mut slots: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    // Sorted so the same store entry wins when several versions are present.
    slots.sort();

    slots
        .into_iter()
        .map(|slot| slot.join("node_modules").join(package_name))
        .find(|candidate| candidate.is_dir())
}

/// Read the package's declared version.
///
/// Defaults to [`DEFAULT_VERSION`] when the metadata file is missing,
/// unreadable, malformed or carries no non-empty version string. Never
/// fails.
pub fn package_version(package_path: &Path) -> String {
    let raw = match fs::read_to_string(package_path.join("package.json")) {
        Ok(raw) => raw,
        Err(_) => return DEFAULT_VERSION.to_string(),
    };

    match serde_json::from_str::<PackageMetadata>(&raw) {
        Ok(meta) => match meta.version {
            Some(version) if !version.is_empty() => version,
            _ => DEFAULT_VERSION.to_string(),
        },
        Err(_) => DEFAULT_VERSION.to_string(),
    }
}

/// True iff at least one asset-kind subdirectory contains an entry other
/// than a `.gitkeep` placeholder.
///
/// Deliberately shape-agnostic: a stray file in `skills/` counts as "has
/// assets" even though materialization would skip it, so callers report the
/// package as empty-handed rather than unknown.
pub fn has_assets(package_path: &Path) -> bool {
    AssetKind::ALL.iter().any(|kind| {
        match fs::read_dir(package_path.join(kind.dir_name())) {
            Ok(entries) => entries.flatten().any(|e| e.file_name() != GITKEEP),
            Err(_) => false,
        }
    })
}

/// One would-be-materialized asset entry: its bare name and source path.
pub(crate) struct AssetEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Entries of `kind` that materialization would copy: `.gitkeep` filtered,
/// shape-checked (directories for skills, regular files otherwise) and
/// sorted by name. Entries whose metadata cannot be read are dropped.
pub(crate) fn eligible_entries(package_path: &Path, kind: AssetKind) -> Vec<AssetEntry> {
    let read = match fs::read_dir(package_path.join(kind.dir_name())) {
        Ok(read) => read,
        Err(_) => return Vec::new(),
    };

    let mut entries: Vec<AssetEntry> = read
        .flatten()
        .filter(|e| e.file_name() != GITKEEP)
        .filter_map(|e| {
            let path = e.path();
            // fs::metadata follows symlinks, which pnpm-style layouts use.
            let meta = fs::metadata(&path).ok()?;
            let eligible = if kind.is_directory_kind() {
                meta.is_dir()
            } else {
                meta.is_file()
            };
            eligible.then(|| AssetEntry {
                name: e.file_name().to_string_lossy().into_owned(),
                path,
            })
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Relative paths a materialize call would produce, sorted for stable
/// comparison against a manifest entry's `files`.
pub fn discoverable_files(package_path: &Path) -> Vec<String> {
    let mut files: Vec<String> = AssetKind::ALL
        .iter()
        .flat_map(|kind| {
            eligible_entries(package_path, *kind)
                .into_iter()
                .map(move |entry| format!("{}/{}", kind.dir_name(), entry.name))
        })
        .collect();

    files.sort();
    files
}
