//! Error types and Result aliases for adbsync.
//!
//! Fatal errors abort the whole synchronization run and reach the caller as
//! the same variant they were raised with.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using adbsync's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for adbsync operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The device command channel failed to list or pull.
    #[error("device command failed: {0}")]
    Channel(#[from] ChannelError),

    /// A directory listing could not be parsed.
    #[error("invalid directory listing: {0}")]
    Listing(#[from] ListingParseError),

    /// A local directory could not be created.
    #[error("failed to create local directory '{}': {source}", path.display())]
    LocalFilesystem {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An ignore pattern or matched path was invalid.
    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] PatternError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Device command channel errors.
///
/// Both variants carry whatever diagnostic text the command produced.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The channel executable could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The command ran but reported failure.
    #[error("'{operation}' failed ({status}): {output}")]
    CommandFailed {
        /// Human-readable description of the command
        operation: String,
        /// Exit status as reported by the OS
        status: String,
        /// Captured diagnostic output
        output: String,
    },
}

/// Directory listing parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingParseError {
    /// No `YYYY-MM-DD HH:MM` token on the line.
    #[error("invalid file entry: {line}")]
    MissingTimestamp {
        /// Offending listing line
        line: String,
    },

    /// The date-time token is not a valid calendar time.
    #[error("cannot parse date in: {line}")]
    InvalidTimestamp {
        /// Offending listing line
        line: String,
    },

    /// The size column is not numeric.
    #[error("cannot parse file size in: {line}")]
    InvalidSize {
        /// Offending listing line
        line: String,
    },
}

/// Ignore pattern errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Empty pattern string.
    #[error("pattern must not be empty")]
    EmptyPattern,

    /// Empty path passed to a matcher.
    #[error("path must not be empty")]
    EmptyPath,

    /// The translated pattern was rejected by the regex engine.
    #[error("cannot compile '{pattern}': {reason}")]
    Compile {
        /// Original glob
        pattern: String,
        /// Regex engine message
        reason: String,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
