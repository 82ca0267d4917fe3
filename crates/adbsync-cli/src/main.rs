mod cli;
mod commands;
mod logging;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use cli::Cli;
use commands::SyncOptions;

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130);
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    let paths = cli.source.as_deref().zip(cli.target.as_deref());
    if paths.is_none() && !cli.show_config {
        Cli::command()
            .print_help()
            .context("Failed to print usage")?;
        println!();
        return Ok(());
    }

    logging::init_tracing(cli.log_level(), cli.log_json);

    let options = SyncOptions::new(cli.verbose, cli.config.as_deref(), cli.no_config);
    let config = options.load_config(cli.overrides())?;

    if cli.show_config {
        commands::ShowConfig::execute(&config).context("Failed to execute show-config")?;
        return Ok(());
    }

    if let Some((source, target)) = paths {
        commands::Mirror::execute(source, target, &config, &options)
            .context("Failed to execute mirror")?;
    }

    Ok(())
}
