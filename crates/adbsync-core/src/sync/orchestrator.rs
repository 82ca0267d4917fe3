//! Sync orchestration - walks the remote tree and drives per-file actions

use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use tracing::{debug, info};

use super::SyncResult;
use super::actions::{SkipReason, SyncActionResolver};
use super::executor::PullExecutor;
use crate::comparison::FileComparator;
use crate::config::SyncConfig;
use crate::device::DeviceChannel;
use crate::error::{Error, Result};
use crate::listing::{DirectoryEntry, ListingParser};
use crate::patterns::IgnoreSet;

/// A listed directory whose entries are still being processed
struct PendingDirectory {
    local: PathBuf,
    entries: vec::IntoIter<DirectoryEntry>,
}

/// Main sync engine
pub struct SyncEngine<C> {
    config: SyncConfig,
    ignore: IgnoreSet,
    parser: ListingParser,
    comparator: FileComparator,
    channel: C,
}

impl<C: DeviceChannel> SyncEngine<C> {
    /// Create a new sync engine
    ///
    /// Ignore patterns are compiled here, once.
    ///
    /// # Errors
    ///
    /// Returns an error if an ignore pattern is invalid.
    pub fn new(config: SyncConfig, channel: C) -> Result<Self> {
        let ignore = IgnoreSet::with_patterns(config.separator, &config.ignore)?;

        Ok(Self {
            ignore,
            parser: ListingParser::new(config.separator),
            comparator: FileComparator::new(config.tolerance),
            config,
            channel,
        })
    }

    /// Settings this engine runs with
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Mirror `remote_root` into `local_root`
    ///
    /// The remote root gets a trailing separator if it lacks one. The tree is
    /// walked depth-first in listing order: a subdirectory is finished before
    /// the entries listed after it are looked at.
    ///
    /// # Errors
    ///
    /// Returns the first listing, local directory creation, or pull error.
    /// Nothing after the failing entry is attempted.
    pub fn sync(&self, remote_root: &str, local_root: &Path) -> Result<SyncResult> {
        let mut result = SyncResult::default();
        let root = self.normalize_root(remote_root);

        info!(
            remote = %root,
            local = %local_root.display(),
            dry_run = self.config.dry_run,
            "Starting synchronization"
        );

        let resolver = SyncActionResolver::new(&self.ignore, self.comparator);
        let executor = PullExecutor::new(&self.channel, self.config.dry_run);

        let mut pending = Vec::new();
        if let Some(directory) = self.open_directory(&root, local_root, &mut result)? {
            pending.push(directory);
        }

        while let Some(current) = pending.last_mut() {
            let Some(entry) = current.entries.next() else {
                pending.pop();
                continue;
            };
            let local = current.local.join(&entry.name);

            if entry.is_directory() {
                if let Some(directory) = self.open_directory(&entry.path, &local, &mut result)? {
                    pending.push(directory);
                }
                continue;
            }

            let action = resolver.resolve(&entry, local);
            executor.execute(&action, &mut result)?;
        }

        info!(
            directories = result.directories,
            pulled = result.pulled,
            skipped = result.skipped,
            "Synchronization finished"
        );

        Ok(result)
    }

    /// List a remote directory and prepare its local counterpart
    ///
    /// Returns `None` when the directory is ignored, in which case nothing
    /// below it is listed or pulled.
    fn open_directory(
        &self,
        remote: &str,
        local: &Path,
        result: &mut SyncResult,
    ) -> Result<Option<PendingDirectory>> {
        if self.ignore.is_ignored(remote) {
            debug!("Skipping {remote} (ignored)");
            result.record_skip(SkipReason::Ignored);
            return Ok(None);
        }

        debug!("Listing {remote}");
        let listing = self.channel.list(remote)?;
        let entries = self.parser.parse(&listing, remote)?;

        if !self.config.dry_run {
            fs::create_dir_all(local).map_err(|source| Error::LocalFilesystem {
                path: local.to_path_buf(),
                source,
            })?;
        }

        result.directories += 1;
        Ok(Some(PendingDirectory {
            local: local.to_path_buf(),
            entries: entries.into_iter(),
        }))
    }

    fn normalize_root(&self, remote_root: &str) -> String {
        let mut root = remote_root.to_string();
        if !root.ends_with(self.config.separator) {
            root.push(self.config.separator);
        }
        root
    }
}
