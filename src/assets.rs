//! Asset model shared by the locator, materializer and sync engine
//!
//! Plugin packages ship assets in four top-level subdirectories. `skills/`
//! entries are whole directories (a skill is `SKILL.md` plus supplementals);
//! `commands/`, `agents/` and `hooks/` entries are individual files.
//! `.gitkeep` placeholders are never assets.

use serde::{Deserialize, Serialize};

/// Placeholder filename kept in otherwise-empty asset directories.
pub const GITKEEP: &str = ".gitkeep";

/// Directory that receives materialized assets, relative to the project root.
pub const TARGET_DIR: &str = ".claude";

/// Kind of plugin asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Directory-based skills (SKILL.md + supplementals)
    Skills,
    /// Slash-command files
    Commands,
    /// Specialized sub-agent files
    Agents,
    /// Lifecycle hook files
    Hooks,
}

impl AssetKind {
    /// All kinds in materialization order. The order is fixed so `files`
    /// sequences and conflict reports come out identical across runs.
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Skills,
        AssetKind::Commands,
        AssetKind::Agents,
        AssetKind::Hooks,
    ];

    /// Subdirectory name used on both the source and target side.
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Skills => "skills",
            AssetKind::Commands => "commands",
            AssetKind::Agents => "agents",
            AssetKind::Hooks => "hooks",
        }
    }

    /// Whether entries of this kind are directories rather than files.
    pub fn is_directory_kind(&self) -> bool {
        matches!(self, AssetKind::Skills)
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}
