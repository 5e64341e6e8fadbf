//! Manifest-driven synchronization engine
//!
//! `sync` reconciles the project's `.claude/` tree against whatever the
//! manifest's packages currently ship. `add_package`/`remove_package` mutate
//! one package at a time; `list_plugins` is a read-only manifest snapshot.
//! Every operation takes an explicit project root and never consults ambient
//! state, so callers (CLI, package-manager hooks, library consumers) stay in
//! control of where the engine runs.

mod engine;
mod ops;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::manifest::PluginEntry;

pub use engine::sync;
pub use ops::{add_package, list_plugins, remove_package};

/// Options for one sync invocation
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Reconcile even when nothing drifted
    pub force: bool,
}

/// Per-package install summary from a reconcile pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSummary {
    pub name: String,
    pub version: String,
    pub file_count: usize,
}

/// Result of one sync invocation
///
/// `removed_plugins`, `conflicts` and `warnings` are informational; they
/// never turn a sync into a failure.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    /// Whether a reconcile pass actually ran
    pub synced: bool,
    /// No-op explanation, or the drift that triggered the reconcile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub total_files: usize,
    pub plugin_count: usize,
    pub removed_plugins: Vec<String>,
    pub conflicts: Vec<String>,
    pub installed_plugins: Vec<PluginSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SyncResult {
    fn no_op(reason: &str, plugin_count: usize) -> Self {
        Self {
            synced: false,
            reason: Some(reason.to_string()),
            plugin_count,
            ..Default::default()
        }
    }
}

/// Result of adding a single package
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddResult {
    pub package_name: String,
    /// True when this add replaced an existing manifest entry
    pub already_exists: bool,
    /// Absent when the package ships no assets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub files: Vec<String>,
    /// Whether this call added the prepare hook to package.json
    pub hook_injected: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Result of removing a single package
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveResult {
    pub package_name: String,
    /// Tracked paths that existed on disk and were deleted
    pub files_removed: Vec<String>,
}

/// Manifest snapshot for display
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListResult {
    pub plugins: BTreeMap<String, PluginEntry>,
}
