//! package.json prepare-script lifecycle
//!
//! `npm install` runs the prepare script, and the prepare script runs
//! `claude-plugins install`, so `.claude/` stays fresh after dependency
//! updates. Injection and removal rewrite only the script they have to and
//! keep every other package.json key intact.
//!
//! Every operation reports plain success or failure as a bool: a missing,
//! unreadable or malformed package.json reads as "nothing to do", never as an
//! error. A broken project metadata file must not make installs fail.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::fs::atomic_write;

/// Command the injected prepare script runs.
pub const HOOK_COMMAND: &str = "claude-plugins install";

fn package_json_path(project_root: &Path) -> PathBuf {
    project_root.join("package.json")
}

fn write_package_json(path: &Path, pkg: &Value) -> bool {
    let Ok(mut content) = serde_json::to_string_pretty(pkg) else {
        return false;
    };
    content.push('\n');
    atomic_write(path, &content).is_ok()
}

/// Add `claude-plugins install` to the package.json prepare script.
///
/// An existing prepare script is kept and the command appended with `&&`.
/// Returns false without writing when there is no usable package.json or the
/// hook is already present.
pub fn inject_prepare_hook(project_root: &Path) -> bool {
    let path = package_json_path(project_root);
    let Ok(content) = fs::read_to_string(&path) else {
        return false;
    };
    let Ok(mut pkg) = serde_json::from_str::<Value>(&content) else {
        return false;
    };
    let Some(root) = pkg.as_object_mut() else {
        return false;
    };

    let scripts = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(scripts) = scripts.as_object_mut() else {
        return false;
    };

    let prepare = match scripts.get("prepare").and_then(Value::as_str) {
        Some(existing) if existing.contains(HOOK_COMMAND) => return false,
        Some(existing) if !existing.trim().is_empty() => format!("{existing} && {HOOK_COMMAND}"),
        _ => HOOK_COMMAND.to_string(),
    };
    scripts.insert("prepare".to_string(), Value::String(prepare));

    write_package_json(&path, &pkg)
}

/// True when the package.json prepare script already runs the hook command.
pub fn has_prepare_hook(project_root: &Path) -> bool {
    let path = package_json_path(project_root);
    let Ok(content) = fs::read_to_string(&path) else {
        return false;
    };
    let Ok(pkg) = serde_json::from_str::<Value>(&content) else {
        return false;
    };

    pkg.get("scripts")
        .and_then(|scripts| scripts.get("prepare"))
        .and_then(Value::as_str)
        .is_some_and(|prepare| prepare.contains(HOOK_COMMAND))
}

/// Strip the hook command from the prepare script.
///
/// A prepare script that chained other commands keeps them. One that only ran
/// the hook is deleted outright, along with a scripts object left empty.
/// Returns false when there was nothing to remove.
pub fn remove_prepare_hook(project_root: &Path) -> bool {
    let path = package_json_path(project_root);
    let Ok(content) = fs::read_to_string(&path) else {
        return false;
    };
    let Ok(mut pkg) = serde_json::from_str::<Value>(&content) else {
        return false;
    };
    let Some(root) = pkg.as_object_mut() else {
        return false;
    };
    let Some(scripts) = root.get_mut("scripts").and_then(Value::as_object_mut) else {
        return false;
    };
    let Some(prepare) = scripts.get("prepare").and_then(Value::as_str) else {
        return false;
    };
    if !prepare.contains(HOOK_COMMAND) {
        return false;
    }

    let stripped = strip_hook_command(prepare);
    if stripped.is_empty() {
        scripts.remove("prepare");
    } else {
        scripts.insert("prepare".to_string(), Value::String(stripped));
    }
    if scripts.is_empty() {
        root.remove("scripts");
    }

    write_package_json(&path, &pkg)
}

/// Remove one hook invocation from a chained command line.
fn strip_hook_command(prepare: &str) -> String {
    prepare
        .replacen(&format!(" && {HOOK_COMMAND}"), "", 1)
        .replacen(&format!("{HOOK_COMMAND} && "), "", 1)
        .replacen(HOOK_COMMAND, "", 1)
        .trim()
        .to_string()
}
