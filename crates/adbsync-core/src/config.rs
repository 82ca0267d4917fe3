//! Configuration file parsing, merging, and resolution
//!
//! This module handles:
//! - Config file discovery (CLI path, project file, global XDG file)
//! - TOML parsing with serde
//! - Layer merging with precedence rules
//! - Validation and error reporting
//! - Resolution into the read-only [`SyncConfig`] the engine consumes

mod discovery;
mod merge;
mod types;
mod validation;


use std::path::{Path, PathBuf};
use std::time::Duration;

pub use discovery::{ConfigDiscovery, ConfigFiles, PROJECT_CONFIG_NAME};
pub use merge::ConfigMerger;
pub use types::Config;
pub use validation::ConfigValidator;

use crate::device::AdbChannel;
use crate::error::Result;

/// Separator used by Android devices
pub const DEFAULT_SEPARATOR: char = '/';

/// Default change-detection tolerance
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(2);

/// Default adb executable, looked up on `PATH`
pub const DEFAULT_ADB: &str = "adb";

/// Virtual and temporary filesystems skipped unless disabled
pub const SYSTEM_IGNORES: [&str; 5] = ["/proc/", "/acct/", "/dev/", "/tmp/", "/sys/"];

/// Settings read by the synchronization engine; never mutated during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Path separator of the device
    pub separator: char,
    /// Ignore patterns; an entry is skipped if any of them matches
    pub ignore: Vec<String>,
    /// Maximum timestamp difference treated as unchanged
    pub tolerance: Duration,
    /// Decide and report, but do not touch the local tree
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            ignore: Vec::new(),
            tolerance: DEFAULT_TOLERANCE,
            dry_run: false,
        }
    }
}

impl Config {
    /// Resolve into engine settings, filling in defaults
    ///
    /// System ignores come first unless `default_ignores` is `false`.
    #[must_use]
    pub fn sync_config(&self) -> SyncConfig {
        let mut ignore = Vec::with_capacity(SYSTEM_IGNORES.len() + self.ignore.len());
        if self.default_ignores.unwrap_or(true) {
            ignore.extend(SYSTEM_IGNORES.iter().map(ToString::to_string));
        }
        ignore.extend(self.ignore.iter().cloned());

        SyncConfig {
            separator: self.separator.unwrap_or(DEFAULT_SEPARATOR),
            ignore,
            tolerance: self
                .tolerance_secs
                .map_or(DEFAULT_TOLERANCE, Duration::from_secs),
            dry_run: self.dry_run,
        }
    }

    /// The adb executable to run
    #[must_use]
    pub fn adb_program(&self) -> PathBuf {
        self.adb
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ADB))
    }

    /// Build the device channel described by this configuration
    #[must_use]
    pub fn channel(&self) -> AdbChannel {
        AdbChannel::new(self.adb_program()).with_serial(self.serial.clone())
    }
}

/// Coordinates discovery, merging, and validation
pub struct ConfigManager;

impl ConfigManager {
    /// Load and merge configuration from all sources
    ///
    /// With `no_config`, no file is read and the defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if config files are invalid or cannot be read.
    pub fn load(cli_config_path: Option<&Path>, no_config: bool) -> Result<Config> {
        if no_config {
            return Ok(Config::default());
        }

        let config_files = ConfigDiscovery::discover(cli_config_path);
        let merged = ConfigMerger::merge(&config_files)?;
        ConfigValidator::validate(&merged)?;

        Ok(merged)
    }

    /// Layer command-line overrides over a loaded configuration and validate
    /// the result
    ///
    /// # Errors
    ///
    /// Returns an error if the combined configuration is invalid.
    pub fn with_overrides(mut config: Config, overrides: Config) -> Result<Config> {
        ConfigMerger::apply(&mut config, overrides);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
