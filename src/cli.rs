use crate::config::{DEFAULT_CLAUDE_DIR, DEFAULT_IMPORT_LIMIT, DEFAULT_SETTINGS_PATH};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "arden")]
#[command(about = "Send Claude Code usage telemetry to Arden")]
#[command(version)]
pub struct Cli {
    /// Telemetry API host
    #[arg(long, global = true, env = "HOST")]
    pub host: Option<String>,

    /// API token used as the bearer credential
    #[arg(long, global = true, env = "ARDEN_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import usage from local Claude Code session logs
    Import(ImportArgs),

    /// Register Arden telemetry hooks in the Claude Code settings file
    Install(InstallArgs),

    /// Work with ad-hoc agent events
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },

    /// Forward a Claude Code hook payload read from stdin
    #[command(hide = true)]
    Hook(HookArgs),
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Path to Claude logs directory
    #[arg(long, default_value = DEFAULT_CLAUDE_DIR)]
    pub claude_dir: String,

    /// Print events instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Maximum number of events to import (0 for no limit)
    #[arg(long, default_value_t = DEFAULT_IMPORT_LIMIT)]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Claude Code settings file to update
    #[arg(short, long, default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Print the updated settings without writing them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand, Debug)]
pub enum EventsCommand {
    /// Send a single event
    Send(SendArgs),
}

/// Required values are validated by the command rather than clap so that a
/// missing flag exits with status 1.
#[derive(Args, Debug, Default)]
pub struct SendArgs {
    /// Agent identifier
    #[arg(long)]
    pub agent: Option<String>,

    /// User identifier
    #[arg(long)]
    pub user: Option<String>,

    /// Bid amount (non-negative integer)
    #[arg(long)]
    pub bid: Option<String>,

    /// Multiplier (positive integer)
    #[arg(long)]
    pub mult: Option<String>,

    /// Event payload, JSON or plain text
    #[arg(long)]
    pub data: Option<String>,

    /// Validate and print the event without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Extra metadata as key=value pairs
    #[arg(value_name = "KEY=VALUE")]
    pub pairs: Vec<String>,
}

#[derive(Args, Debug)]
pub struct HookArgs {
    /// Hook event name, e.g. Stop or PostToolUse
    pub event: Option<String>,
}
