//! Device command channel
//!
//! The engine only needs two operations from the device: list a directory
//! and pull a single file. Both return whatever text the command printed.

mod adb;

use std::path::Path;

pub use adb::AdbChannel;

use crate::error::ChannelError;

/// Operations the synchronization engine runs against the device
pub trait DeviceChannel {
    /// List `remote_dir` in long format (`ls -la`)
    ///
    /// # Errors
    ///
    /// Returns an error carrying the command's diagnostic output if the
    /// listing cannot be produced.
    fn list(&self, remote_dir: &str) -> Result<String, ChannelError>;

    /// Copy the remote file `remote` to `local`, returning diagnostic text
    ///
    /// # Errors
    ///
    /// Returns an error carrying the command's diagnostic output if the
    /// transfer fails.
    fn pull(&self, remote: &str, local: &Path) -> Result<String, ChannelError>;
}

impl<T: DeviceChannel + ?Sized> DeviceChannel for &T {
    fn list(&self, remote_dir: &str) -> Result<String, ChannelError> {
        (**self).list(remote_dir)
    }

    fn pull(&self, remote: &str, local: &Path) -> Result<String, ChannelError> {
        (**self).pull(remote, local)
    }
}
