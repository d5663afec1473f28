pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod models;
pub mod parser;
pub mod pricing;
pub mod settings;
pub mod transform;

use anyhow::Result;
use cli::{Cli, Commands, EventsCommand};
use config::Config;
use tracing::debug;

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.host, cli.token);
    debug!(host = %config.host, has_token = config.token.is_some(), "resolved configuration");

    match cli.command {
        Commands::Import(args) => commands::import::run(args, &config).await,
        Commands::Install(args) => commands::install::run(&args),
        Commands::Events {
            command: EventsCommand::Send(args),
        } => commands::events::send(args, &config).await,
        Commands::Hook(args) => commands::hook::run(args, &config).await,
    }
}
