//! Managed .gitignore section for materialized assets
//!
//! Copied assets are build artifacts of `npm install`, so the project's
//! .gitignore should hide them. Updates are append-only: user content is never
//! reordered or deleted, and a pattern the user already carries anywhere in
//! the file is not added again.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::PluginsResult;
use crate::fs::atomic_write;

/// Header line of the managed section.
pub const GITIGNORE_MARKER: &str = "# Claude plugins (managed by claude-plugins)";

/// Append ignore patterns for the given tracked paths (relative to
/// `.claude/`) to the project's .gitignore.
///
/// Returns true when the file was written. Calling again with the same paths
/// is a no-op, as is an empty path list. A file using CRLF line endings keeps
/// them.
pub fn update_gitignore(project_root: &Path, tracked_paths: &[String]) -> PluginsResult<bool> {
    if tracked_paths.is_empty() {
        return Ok(false);
    }

    let path = project_root.join(".gitignore");
    let existing = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err.into()),
    };
    let newline = if existing.contains("\r\n") { "\r\n" } else { "\n" };
    let existing_lines: BTreeSet<&str> = existing.lines().collect();

    let mut missing: Vec<String> = Vec::new();
    for tracked in tracked_paths {
        let pattern = format!("/.claude/{tracked}");
        if !existing_lines.contains(pattern.as_str()) && !missing.contains(&pattern) {
            missing.push(pattern);
        }
    }
    if missing.is_empty() {
        return Ok(false);
    }

    let mut content = existing.clone();
    if !content.is_empty() && !content.ends_with('\n') {
        content.push_str(newline);
    }
    if !existing_lines.contains(GITIGNORE_MARKER) {
        if !content.is_empty() {
            content.push_str(newline);
        }
        content.push_str(GITIGNORE_MARKER);
        content.push_str(newline);
    }
    for pattern in &missing {
        content.push_str(pattern);
        content.push_str(newline);
    }

    atomic_write(&path, &content)?;
    Ok(true)
}
