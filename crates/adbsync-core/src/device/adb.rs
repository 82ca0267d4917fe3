//! `adb`-backed device channel

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::debug;

use super::DeviceChannel;
use crate::error::ChannelError;

/// Runs `adb shell ls -la` and `adb pull` against one device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbChannel {
    program: PathBuf,
    serial: Option<String>,
}

impl AdbChannel {
    /// Create a channel using the given adb executable
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            serial: None,
        }
    }

    /// Target a specific device (`adb -s <serial>`)
    #[must_use]
    pub fn with_serial(mut self, serial: Option<String>) -> Self {
        self.serial = serial;
        self
    }

    /// Path of the adb executable
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(serial) = &self.serial {
            cmd.arg("-s").arg(serial);
        }
        cmd
    }

    fn run<I, S>(&self, operation: &str, args: I) -> Result<Output, ChannelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        debug!("Running adb {operation}");
        let output = self
            .command()
            .args(args)
            .output()
            .map_err(|source| ChannelError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ChannelError::CommandFailed {
                operation: operation.to_string(),
                status: output.status.to_string(),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}

impl DeviceChannel for AdbChannel {
    fn list(&self, remote_dir: &str) -> Result<String, ChannelError> {
        let quoted = shell_quote(remote_dir);
        let output = self.run(
            &format!("shell ls -la {quoted}"),
            ["shell", "ls", "-la", quoted.as_str()],
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn pull(&self, remote: &str, local: &Path) -> Result<String, ChannelError> {
        let output = self.run(
            &format!("pull {remote}"),
            [OsStr::new("pull"), OsStr::new(remote), local.as_os_str()],
        )?;
        Ok(diagnostics(&output))
    }
}

/// Quote a path for the device shell, which re-splits `adb shell` arguments
fn shell_quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}

/// Trimmed stdout and stderr, non-empty parts joined by `": "`
fn diagnostics(output: &Output) -> String {
    [&output.stdout, &output.stderr]
        .into_iter()
        .map(|stream| String::from_utf8_lossy(stream).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(": ")
}
