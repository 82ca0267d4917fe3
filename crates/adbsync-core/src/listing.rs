//! Remote directory listing
//!
//! The device is listed with `ls -la`, which yields one long-format record per
//! line. This module turns such output into typed [`DirectoryEntry`] values.

mod parser;

use chrono::NaiveDateTime;

pub use parser::ListingParser;

/// Kind of a listed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory; its size column carries no meaning
    Directory,
    /// A regular file with its size in bytes
    File {
        /// Size reported by the listing
        size: u64,
    },
}

/// One entry of a remote directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Absolute remote path; directories end with the separator
    pub path: String,
    /// Base name as reported by the listing
    pub name: String,
    /// Directory or file
    pub kind: EntryKind,
    /// Modification time, minute resolution
    pub timestamp: NaiveDateTime,
    /// Whether the permission string grants read access
    pub is_readable: bool,
}

impl DirectoryEntry {
    /// Whether this entry is a directory
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// File size in bytes, 0 for directories
    #[must_use]
    pub const fn size(&self) -> u64 {
        match self.kind {
            EntryKind::Directory => 0,
            EntryKind::File { size } => size,
        }
    }
}
