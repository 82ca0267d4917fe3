use adbsync_core::Config;
use anyhow::Context;

pub struct ShowConfig;

impl ShowConfig {
    /// Print the merged configuration followed by the effective ignore list
    pub fn execute(config: &Config) -> anyhow::Result<()> {
        let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
        println!("{rendered}");

        let resolved = config.sync_config();
        println!("# Effective ignore patterns");
        for pattern in &resolved.ignore {
            println!("#   {pattern}");
        }

        Ok(())
    }
}
