//! Common types and utilities for command execution

use std::path::Path;

use adbsync_core::{Config, ConfigManager};
use anyhow::Context;

/// Execution options shared by commands
pub struct SyncOptions<'a> {
    /// Enable verbose output
    pub verbose: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
}

impl<'a> SyncOptions<'a> {
    /// Create new sync options
    #[must_use]
    pub const fn new(verbose: bool, config_path: Option<&'a Path>, no_config: bool) -> Self {
        Self {
            verbose,
            config_path,
            no_config,
        }
    }

    /// Load config files and layer the command-line overrides on top
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is unreadable or the result is invalid.
    pub fn load_config(&self, overrides: Config) -> anyhow::Result<Config> {
        let loaded = ConfigManager::load(self.config_path, self.no_config)
            .context("Failed to load configuration files")?;

        if self.verbose {
            tracing::debug!(?loaded, "Loaded configuration files");
        }

        ConfigManager::with_overrides(loaded, overrides).context("Invalid configuration")
    }
}
