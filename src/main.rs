//! claude-plugins CLI - Claude Code asset distribution via npm
//!
//! Usage: claude-plugins <COMMAND>
//!
//! Commands:
//!   install  Sync all plugins from the manifest into .claude/
//!   add      Copy one package's assets and start tracking it
//!   list     List installed plugins and their assets
//!   remove   Remove a plugin and its assets
//!   init     Wire the prepare hook into package.json

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};

use claude_plugins::hooks::{inject_prepare_hook, remove_prepare_hook};
use claude_plugins::locator::DEFAULT_VERSION;
use claude_plugins::sync::{add_package, list_plugins, remove_package, sync, SyncOptions};

/// claude-plugins - Plugin manager for Claude Code skills, commands, agents and hooks
#[derive(Parser, Debug)]
#[command(name = "claude-plugins")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    json: bool,

    /// Project root (defaults to the nearest ancestor with a package.json)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync all plugins from the manifest to the .claude directory
    Install {
        /// Force sync even if versions match
        #[arg(short, long)]
        force: bool,
    },

    /// Add and install a plugin (called from a plugin's postinstall)
    Add {
        /// Package name (auto-detected when run from a postinstall script)
        package: Option<String>,
    },

    /// List installed plugins and their assets
    List,

    /// Remove a plugin and its assets
    Remove {
        /// Package name to remove
        package: String,
    },

    /// Add the prepare hook to package.json (run as this package's postinstall)
    Init {
        /// Remove the hook instead of adding it
        #[arg(long)]
        remove: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Install { force } => cmd_install(&resolve_root(cli.root), force, cli.json),
        Commands::Add { package } => cmd_add(&resolve_root(cli.root), package, cli.json),
        Commands::List => cmd_list(&resolve_root(cli.root), cli.json),
        Commands::Remove { package } => cmd_remove(&resolve_root(cli.root), &package, cli.json),
        Commands::Init { remove } => cmd_init(cli.root, remove, cli.json),
    }
}

fn resolve_root(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(find_project_root)
}

/// Nearest ancestor of the working directory that holds a package.json,
/// skipping directories inside node_modules. Falls back to the working
/// directory itself.
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    for dir in cwd.ancestors() {
        if is_inside_node_modules(dir) {
            continue;
        }
        if dir.join("package.json").is_file() {
            return dir.to_path_buf();
        }
    }
    cwd
}

/// Project root for the init command: npm's INIT_CWD when it points at a
/// package.json, otherwise the ancestor walk. None skips init silently.
fn find_init_root() -> Option<PathBuf> {
    if let Ok(init_cwd) = env::var("INIT_CWD") {
        let dir = PathBuf::from(init_cwd);
        if dir.join("package.json").is_file() {
            return Some(dir);
        }
    }

    let cwd = env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| !is_inside_node_modules(dir) && dir.join("package.json").is_file())
        .map(Path::to_path_buf)
}

fn is_inside_node_modules(dir: &Path) -> bool {
    dir.components()
        .any(|component| component.as_os_str() == "node_modules")
}

fn ci_environment() -> bool {
    env::var("CI").is_ok_and(|value| !value.is_empty())
        || env::var("npm_config_global").is_ok_and(|value| !value.is_empty())
}

fn cmd_install(root: &Path, force: bool, json: bool) -> Result<()> {
    let result = sync(root, SyncOptions { force })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if !result.synced {
        println!("{}", result.reason.as_deref().unwrap_or("Nothing to sync."));
        return Ok(());
    }

    if force {
        println!("Syncing Claude plugins (forced)...");
    }

    for plugin in &result.installed_plugins {
        println!(
            "  Installed {}@{} ({} files)",
            plugin.name, plugin.version, plugin.file_count
        );
    }

    if !result.removed_plugins.is_empty() {
        println!(
            "\nRemoved {} uninstalled plugin(s) from manifest:",
            result.removed_plugins.len()
        );
        for name in &result.removed_plugins {
            println!("  - {name}");
        }
    }

    if !result.conflicts.is_empty() {
        println!(
            "\nWarning: {} file conflict(s) detected (later plugin overwrote earlier):",
            result.conflicts.len()
        );
        for conflict in &result.conflicts {
            println!("  {conflict}");
        }
    }

    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }

    println!(
        "\nDone. {} files from {} plugin(s).",
        result.total_files, result.plugin_count
    );
    Ok(())
}

fn cmd_add(root: &Path, package: Option<String>, json: bool) -> Result<()> {
    // npm sets npm_package_name while running a package's install scripts.
    let package = package.or_else(|| {
        env::var("npm_package_name")
            .ok()
            .filter(|name| !name.is_empty())
    });
    let Some(package_name) = package else {
        eprintln!("Error: Could not determine package name.");
        eprintln!("Please provide the package name as an argument: claude-plugins add <package>");
        process::exit(1);
    };

    let result = add_package(root, &package_name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.hook_injected {
        println!("Added prepare hook to package.json");
    }

    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }

    if result.files.is_empty() {
        println!("Package {package_name} has no Claude assets to install.");
        return Ok(());
    }

    let version = result.version.as_deref().unwrap_or(DEFAULT_VERSION);
    println!("Installed {package_name}@{version}:");
    for file in &result.files {
        println!("  .claude/{file}");
    }
    Ok(())
}

fn cmd_list(root: &Path, json: bool) -> Result<()> {
    let result = list_plugins(root);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.plugins.is_empty() {
        println!("No plugins installed.");
        return Ok(());
    }

    println!("Installed Claude plugins:\n");
    for (package_name, entry) in &result.plugins {
        println!("{}@{}", package_name, entry.version);
        for file in &entry.files {
            println!("  .claude/{file}");
        }
        println!();
    }
    Ok(())
}

fn cmd_remove(root: &Path, package_name: &str, json: bool) -> Result<()> {
    let result = remove_package(root, package_name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    for file in &result.files_removed {
        println!("Removed .claude/{file}");
    }
    println!("Removed {package_name}");
    Ok(())
}

fn cmd_init(root: Option<PathBuf>, remove: bool, json: bool) -> Result<()> {
    // Skip inside CI and during global installs, same as npm lifecycle
    // scripts are expected to.
    if ci_environment() {
        return Ok(());
    }
    let Some(root) = root.or_else(find_init_root) else {
        return Ok(());
    };

    if remove {
        let removed = remove_prepare_hook(&root);
        if json {
            println!("{}", serde_json::json!({ "hookRemoved": removed }));
        } else if removed {
            println!("[claude-plugins] Removed prepare hook from package.json");
        }
        return Ok(());
    }

    let injected = inject_prepare_hook(&root);
    if json {
        println!("{}", serde_json::json!({ "hookInjected": injected }));
    } else if injected {
        println!("[claude-plugins] Added prepare hook to package.json");
        println!("[claude-plugins] Plugins will sync on npm install AND npm update");
    }
    Ok(())
}
