// config.rs — Shell configuration from goals.toml.
//
// Every section and field is optional; a missing file means all defaults.
// Command-line flags are applied on top by main.rs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Top-level configuration from goals.toml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalsConfig {
    /// Where and when the snapshot is written.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shell output settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Snapshot location and persistence timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON snapshot (relative paths resolve against the
    /// working directory).
    #[serde(default = "default_data_path")]
    pub path: PathBuf,

    /// When the snapshot is written.
    #[serde(default)]
    pub persist: PersistPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            persist: PersistPolicy::default(),
        }
    }
}

/// When the session writes its snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Once, when the shell exits. Changes are lost if the process dies.
    #[default]
    OnExit,
    /// After every add, update, or delete, and again on exit.
    AfterEachChange,
}

/// Shell output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Emit ANSI colors.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Print the command overview when the shell starts.
    #[serde(default = "default_true")]
    pub banner: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            banner: true,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_true() -> bool {
    true
}

impl GoalsConfig {
    /// Parse config from TOML text.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from `path`, or defaults if the file doesn't exist.
    /// A file that exists but doesn't parse is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }
}
