//! Sync action determination logic

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::comparison::{ComparisonResult, FileComparator};
use crate::listing::DirectoryEntry;
use crate::patterns::IgnoreSet;

/// Why an entry was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Matched an ignore pattern
    Ignored,
    /// Permission string grants no read access
    Unreadable,
    /// Local copy is up to date
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ignored => "ignored",
            Self::Unreadable => "unreadable",
            Self::Unchanged => "unchanged",
        };
        f.write_str(label)
    }
}

/// Action to perform for one remote file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileAction {
    /// Transfer the remote file over the local one
    Pull {
        /// Remote path
        remote: String,
        /// Local destination
        local: PathBuf,
        /// Listed modification time, applied to the local copy afterwards
        timestamp: NaiveDateTime,
        /// What made the file count as changed
        reason: ComparisonResult,
    },
    /// Leave the file alone
    Skip {
        /// Remote path
        path: String,
        /// Why it is skipped
        reason: SkipReason,
    },
}

/// Resolves remote file entries into actions
pub struct SyncActionResolver<'a> {
    ignore: &'a IgnoreSet,
    comparator: FileComparator,
}

impl<'a> SyncActionResolver<'a> {
    /// Create a resolver using the given ignore set and comparator
    #[must_use]
    pub const fn new(ignore: &'a IgnoreSet, comparator: FileComparator) -> Self {
        Self { ignore, comparator }
    }

    /// Determine the action for a file entry whose local copy lives at `local`
    ///
    /// Ignore patterns are checked before readability, and the local file is
    /// only inspected for entries that survive both checks.
    #[must_use]
    pub fn resolve(&self, entry: &DirectoryEntry, local: PathBuf) -> FileAction {
        let skip = |reason| FileAction::Skip {
            path: entry.path.clone(),
            reason,
        };

        if self.ignore.is_ignored(&entry.path) {
            return skip(SkipReason::Ignored);
        }
        if !entry.is_readable {
            return skip(SkipReason::Unreadable);
        }

        match self.comparator.compare(entry, &local) {
            ComparisonResult::Unchanged => skip(SkipReason::Unchanged),
            reason => FileAction::Pull {
                remote: entry.path.clone(),
                local,
                timestamp: entry.timestamp,
                reason,
            },
        }
    }
}
