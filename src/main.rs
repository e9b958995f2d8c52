use clap::Parser;
use colored::*;
use std::sync::Arc;

mod cli;
mod commands;
mod config;
mod error;
mod executor;
mod logging;
mod scan;
mod site;
mod version;

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use executor::CommandRunner;
use site::{DrushSite, SiteAdmin};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "[X]".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load_from(&cli.config_path())?;
    if let Some(drush) = &cli.drush {
        config.drush = drush.clone();
    }
    log::debug!("{:?}", config);

    // drush locates the site from its working directory
    let runner = CommandRunner::new(config.drush.clone(), config.command_timeout_secs)
        .in_dir(&cli.root);
    log::debug!("Using {}", runner.program());
    let site: Arc<dyn SiteAdmin> = Arc::new(DrushSite::new(runner));

    match cli.command() {
        Commands::Validate(args) => commands::run_validate(site, config, &cli.root, &args).await,
        Commands::PostUpdate => commands::run_post_update(site).await,
    }
}
