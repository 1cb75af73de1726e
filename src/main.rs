mod cli;
mod error;
mod io;
mod model;
mod simulation;
mod strategy;

use crate::cli::Cli;
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let (config, command) = Cli::parse().into_config();
    log::debug!("Configuration: {:?}", config);

    cli::handle_command(&config, command)?;
    Ok(())
}
