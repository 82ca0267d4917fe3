//! Pull executor

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDateTime;
use filetime::set_file_mtime;
use tracing::{debug, error, info, warn};

use super::SyncResult;
use super::actions::FileAction;
use crate::comparison::{ComparisonResult, TimestampComparator};
use crate::device::DeviceChannel;
use crate::error::Result;

/// Executes file actions against the device and the local tree
pub struct PullExecutor<'a, C> {
    channel: &'a C,
    dry_run: bool,
}

impl<'a, C: DeviceChannel> PullExecutor<'a, C> {
    /// Create a new executor
    #[must_use]
    pub const fn new(channel: &'a C, dry_run: bool) -> Self {
        Self { channel, dry_run }
    }

    /// Execute a file action
    ///
    /// # Errors
    ///
    /// Returns an error if the pull command fails. Problems after a
    /// successful pull are logged and recorded as warnings instead.
    pub fn execute(&self, action: &FileAction, result: &mut SyncResult) -> Result<()> {
        match action {
            FileAction::Skip { path, reason } => {
                debug!("Skipping {path} ({reason})");
                result.record_skip(*reason);
            }
            FileAction::Pull {
                remote,
                local,
                timestamp,
                reason,
            } => {
                if let ComparisonResult::Unreadable(detail) = reason {
                    result.record_warning(format!(
                        "could not inspect {}: {detail}",
                        local.display()
                    ));
                }

                if self.dry_run {
                    info!("[DRY RUN] Would pull {remote} ({reason})");
                    result.pulled += 1;
                } else {
                    self.pull(remote, local, *timestamp, reason, result)?;
                }
            }
        }
        Ok(())
    }

    fn pull(
        &self,
        remote: &str,
        local: &Path,
        timestamp: NaiveDateTime,
        reason: &ComparisonResult,
        result: &mut SyncResult,
    ) -> Result<()> {
        debug!("Pulling {remote} to {} ({reason})", local.display());
        let diagnostics = self.channel.pull(remote, local)?;

        if fs::metadata(local).is_err_and(|e| e.kind() == ErrorKind::NotFound) {
            let message = format!("{} could not be copied", local.display());
            error!("{message}");
            result.record_warning(message);
            return Ok(());
        }

        if let Err(e) = set_file_mtime(local, TimestampComparator::to_file_time(timestamp)) {
            let message = format!("could not set timestamp on {}: {e}", local.display());
            warn!("{message}");
            result.record_warning(message);
        }

        if diagnostics.is_empty() {
            info!("{remote}");
        } else {
            info!("{remote}: {diagnostics}");
        }
        result.pulled += 1;

        Ok(())
    }
}
