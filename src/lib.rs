//! claude-plugins - Claude Code asset distribution via npm
//!
//! npm packages ship Claude Code skills, commands, agents and hooks in
//! top-level asset directories. claude-plugins copies those assets from
//! node_modules into the project's `.claude/` directory and tracks every
//! copied file in a manifest, so installs, upgrades and removals stay
//! reproducible.

pub mod assets;
pub mod error;
pub mod fs;
pub mod gitignore;
pub mod hooks;
pub mod locator;
pub mod manifest;
pub mod materialize;
pub mod sync;

// Re-exports for convenience
pub use assets::AssetKind;
pub use error::{PluginsError, PluginsResult};
pub use hooks::{has_prepare_hook, inject_prepare_hook, remove_prepare_hook};
pub use locator::locate_package;
pub use manifest::{Manifest, PluginEntry};
pub use materialize::{materialize, MaterializeResult};
pub use sync::{
    add_package, list_plugins, remove_package, sync, AddResult, ListResult, RemoveResult,
    SyncOptions, SyncResult,
};
