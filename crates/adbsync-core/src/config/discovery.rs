//! Configuration file discovery from multiple locations

use std::path::{Path, PathBuf};

use tracing::debug;

/// Name of the per-project configuration file
pub const PROJECT_CONFIG_NAME: &str = ".adbsync.toml";

/// Configuration file locations in order of precedence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigFiles {
    /// Config from CLI flag (highest precedence)
    pub cli: Option<PathBuf>,
    /// Project config (.adbsync.toml)
    pub project: Option<PathBuf>,
    /// Global XDG config
    pub global: Option<PathBuf>,
}

/// Config file discovery
pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Discover all available configuration files, starting the project
    /// lookup in the current directory
    ///
    /// A CLI path is kept even if it does not exist, so that loading it
    /// reports the problem instead of silently ignoring it.
    pub fn discover(cli_path: Option<&Path>) -> ConfigFiles {
        let start = std::env::current_dir().ok();
        Self::discover_from(start.as_deref(), cli_path)
    }

    /// Discover configuration files with the project lookup starting at `start`
    pub fn discover_from(start: Option<&Path>, cli_path: Option<&Path>) -> ConfigFiles {
        let files = ConfigFiles {
            cli: cli_path.map(Path::to_path_buf),
            project: start.and_then(|dir| Self::find_file(dir, PROJECT_CONFIG_NAME)),
            global: Self::find_global_config(),
        };
        debug!(?files, "Discovered configuration files");
        files
    }

    /// Find a config file in `start` or any of its ancestors
    fn find_file(start: &Path, name: &str) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Find global config in XDG config directory
    fn find_global_config() -> Option<PathBuf> {
        let config_dir = dirs::config_dir()?;
        let global_config = config_dir.join("adbsync").join("config.toml");

        if global_config.is_file() {
            Some(global_config)
        } else {
            None
        }
    }
}
