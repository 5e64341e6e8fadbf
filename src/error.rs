//! Error types for claude-plugins
//!
//! Uses `thiserror` for library errors. Only unrecoverable conditions become
//! errors: a missing or corrupt manifest reads as empty, a package with no
//! assets is a successful no-op, and a single unreadable asset is skipped.

use thiserror::Error;

/// Result type alias for plugin operations
pub type PluginsResult<T> = Result<T, PluginsError>;

/// Main error type for plugin operations
#[derive(Error, Debug)]
pub enum PluginsError {
    /// Package directory could not be resolved for an explicit add
    #[error("Package {name} not found in node_modules")]
    PackageNotFound { name: String },

    /// Remove was asked for a package with no manifest entry
    #[error("Plugin {name} is not installed")]
    NotInstalled { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest serialization error
    #[error("manifest serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
