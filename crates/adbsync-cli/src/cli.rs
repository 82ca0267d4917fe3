use clap::Parser;
use std::path::PathBuf;

use adbsync_core::Config;

/// Mirror a directory tree from an Android device over adb
///
/// Copies new and changed files from the device into a local directory, skipping ignored paths
#[derive(Parser, Debug)]
#[command(name = "adbsync")]
#[command(version, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory on the device to mirror (e.g. /sdcard/)
    pub source: Option<String>,

    /// Local directory receiving the mirror
    pub target: Option<PathBuf>,

    /// Path to the adb executable
    #[arg(long, env = "ADBSYNC_ADB", value_name = "PATH")]
    pub adb: Option<PathBuf>,

    /// Serial of the device to talk to
    #[arg(short, long, env = "ADBSYNC_SERIAL")]
    pub serial: Option<String>,

    /// Ignore patterns, separated by ';'
    #[arg(short, long, value_name = "PATTERNS", value_delimiter = ';')]
    pub ignore: Vec<String>,

    /// Path separator used on the device
    #[arg(long, value_name = "CHAR")]
    pub separator: Option<char>,

    /// Seconds of modification time difference still treated as unchanged
    #[arg(long, value_name = "SECONDS")]
    pub tolerance: Option<u64>,

    /// Do not skip /proc/, /acct/, /dev/, /tmp/ and /sys/
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Use specific config file
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,

    /// Preview transfers without executing them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the active configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ADBSYNC_LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Enable JSON logging output
    #[arg(long, env = "ADBSYNC_LOG_JSON")]
    pub log_json: bool,
}

impl Cli {
    /// Effective log level: explicit level, else debug when verbose
    pub fn log_level(&self) -> &str {
        self.log_level
            .as_deref()
            .unwrap_or(if self.verbose { "debug" } else { "info" })
    }

    /// Configuration layer built from the command-line flags
    pub fn overrides(&self) -> Config {
        Config {
            adb: self.adb.clone(),
            serial: self.serial.clone(),
            separator: self.separator,
            ignore: self
                .ignore
                .iter()
                .map(|pattern| pattern.trim())
                .filter(|pattern| !pattern.is_empty())
                .map(ToString::to_string)
                .collect(),
            tolerance_secs: self.tolerance,
            default_ignores: self.no_default_ignores.then_some(false),
            dry_run: self.dry_run,
        }
    }
}
