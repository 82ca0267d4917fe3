//! # adbsync-core
//!
//! Core library for mirroring a directory tree on an Android device onto a
//! local directory.
//!
//! The device is only reachable through a command channel (`adb`). Remote
//! directories are listed as text and parsed into typed entries; files that
//! are missing or changed locally are pulled.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types for the adbsync library
pub mod error;

/// Glob-style ignore patterns
pub mod patterns;

/// Remote directory listing parser
pub mod listing;

/// Timestamp equivalence and local change detection
pub mod comparison;

/// Device command channel abstraction and the adb implementation
pub mod device;

/// Configuration file parsing and management
pub mod config;

/// One-way synchronization engine
pub mod sync;

pub use config::{Config, ConfigManager, SyncConfig};
pub use device::{AdbChannel, DeviceChannel};
pub use error::{Error, Result};
pub use sync::{SyncEngine, SyncReporter, SyncResult};
