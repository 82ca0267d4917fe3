//! Configuration merging with precedence rules
//!
//! # Merging Semantics
//!
//! - **Arrays** (`ignore`): additive, all patterns from all layers are combined
//! - **Optional scalars**: a higher-precedence layer overrides what it sets
//! - **`dry_run`**: OR semantics, any layer can turn it on

use std::fs;
use std::path::Path;

use super::discovery::ConfigFiles;
use super::types::Config;
use crate::error::{Error, Result};

/// Configuration merger
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple config files with precedence rules
    ///
    /// Precedence order (highest to lowest):
    /// 1. CLI config
    /// 2. .adbsync.toml
    /// 3. Global config
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn merge(files: &ConfigFiles) -> Result<Config> {
        let mut merged = Config::default();

        // Lowest to highest precedence
        for path in [&files.global, &files.project, &files.cli]
            .into_iter()
            .flatten()
        {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    /// Load a single config file and layer it over `base`
    fn merge_into(base: &mut Config, path: &Path) -> Result<()> {
        let display = path.display();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read config file {display}: {e}")))?;

        let layer: Config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse config file {display}: {e}")))?;

        Self::apply(base, layer);
        Ok(())
    }

    /// Layer `overlay` over `base`
    pub fn apply(base: &mut Config, overlay: Config) {
        base.ignore.extend(overlay.ignore);

        if overlay.adb.is_some() {
            base.adb = overlay.adb;
        }
        if overlay.serial.is_some() {
            base.serial = overlay.serial;
        }
        if overlay.separator.is_some() {
            base.separator = overlay.separator;
        }
        if overlay.tolerance_secs.is_some() {
            base.tolerance_secs = overlay.tolerance_secs;
        }
        if overlay.default_ignores.is_some() {
            base.default_ignores = overlay.default_ignores;
        }

        base.dry_run |= overlay.dry_run;
    }
}
