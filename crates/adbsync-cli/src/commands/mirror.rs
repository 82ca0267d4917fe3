use std::path::Path;

use adbsync_core::{Config, SyncEngine, SyncReporter};
use anyhow::Context;

use crate::commands::SyncOptions;

pub struct Mirror;

impl Mirror {
    pub fn execute(
        source: &str,
        target: &Path,
        config: &Config,
        options: &SyncOptions,
    ) -> anyhow::Result<()> {
        let channel = config.channel();

        if options.verbose {
            tracing::debug!(
                adb = %channel.program().display(),
                serial = ?config.serial,
                "Using device channel"
            );
        }

        let engine = SyncEngine::new(config.sync_config(), channel)
            .context("Failed to initialize sync engine")?;

        let result = engine
            .sync(source, target)
            .with_context(|| format!("Failed to mirror {source} into {}", target.display()))?;

        let summary = SyncReporter::generate_summary(&result);
        println!("{summary}");

        if engine.config().dry_run {
            println!("[DRY RUN] No files were changed");
        }

        Ok(())
    }
}
