//! Configuration types and structures

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration as read from one TOML layer or from command-line flags
///
/// Every scalar is optional so that layers can be merged: a layer only
/// overrides what it sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Path to the adb executable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adb: Option<PathBuf>,

    /// Device serial passed as `adb -s`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,

    /// Path separator used by the device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<char>,

    /// Patterns to ignore (exclude from sync)
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Maximum modification time difference, in seconds, still treated as unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance_secs: Option<u64>,

    /// Skip the device's virtual filesystems (`/proc/`, `/sys/`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_ignores: Option<bool>,

    /// Dry run mode (don't actually pull)
    #[serde(default)]
    pub dry_run: bool,
}
