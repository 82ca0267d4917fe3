//! Change detection between remote entries and their local copies
//!
//! A remote file is considered unchanged when the local copy exists, has the
//! same size, and its modification time is equivalent to the listed one.

mod timestamp;

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use tracing::warn;

pub use timestamp::{ORIGIN_YEAR, TimestampComparator};

use crate::listing::DirectoryEntry;

/// Why a remote file needs to be pulled, or that it does not
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonResult {
    /// Local copy matches the remote entry
    Unchanged,
    /// No local copy exists
    Missing,
    /// Local copy has a different size
    SizeChanged {
        /// Size reported by the listing
        remote: u64,
        /// Size on disk
        local: u64,
    },
    /// Sizes match but modification times differ beyond the tolerance
    TimestampChanged,
    /// The local copy could not be inspected
    Unreadable(String),
}

impl ComparisonResult {
    /// Whether the remote file must be transferred
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => f.write_str("unchanged"),
            Self::Missing => f.write_str("new file"),
            Self::SizeChanged { remote, local } => {
                write!(f, "size changed ({local} -> {remote} bytes)")
            }
            Self::TimestampChanged => f.write_str("modification time changed"),
            Self::Unreadable(reason) => write!(f, "local file unreadable: {reason}"),
        }
    }
}

/// Compares remote entries with local files
#[derive(Debug, Clone, Copy)]
pub struct FileComparator {
    tolerance: Duration,
}

impl FileComparator {
    /// Create a comparator with the given timestamp tolerance
    #[must_use]
    pub const fn new(tolerance: Duration) -> Self {
        Self { tolerance }
    }

    /// Compare a remote file entry with the local file at `local`
    #[must_use]
    pub fn compare(&self, entry: &DirectoryEntry, local: &Path) -> ComparisonResult {
        let metadata = match fs::metadata(local) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return ComparisonResult::Missing,
            Err(e) => {
                warn!("Could not get info on target path {}: {e}", local.display());
                return ComparisonResult::Unreadable(e.to_string());
            }
        };

        if metadata.len() != entry.size() {
            return ComparisonResult::SizeChanged {
                remote: entry.size(),
                local: metadata.len(),
            };
        }

        let modified = match metadata.modified() {
            Ok(modified) => modified,
            Err(e) => {
                warn!(
                    "Could not get modification time of {}: {e}",
                    local.display()
                );
                return ComparisonResult::Unreadable(e.to_string());
            }
        };

        let local_time = TimestampComparator::from_system_time(modified);
        if TimestampComparator::equivalent(entry.timestamp, local_time, self.tolerance) {
            ComparisonResult::Unchanged
        } else {
            ComparisonResult::TimestampChanged
        }
    }
}
