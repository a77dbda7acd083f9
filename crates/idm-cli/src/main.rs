//! IDM CLI - Command-line interface for role management
//!
//! Usage:
//!   idm init [dir]                          - Write idm.yaml and seed the store
//!   idm role create <name> [--attr k=v]     - Create a role
//!   idm role get <name>                     - Show a role
//!   idm role list [--filter <glob>]         - List roles
//!   idm role remove <name>                  - Remove a role
//!   idm attr set <role> <attr> <value>...   - Set an attribute
//!   idm attr unset <role> <attr>            - Remove an attribute

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use idm_cli::commands::{AttrCommand, InitCommand, RoleCommand};
use idm_cli::Context;

#[derive(Parser)]
#[command(name = "idm")]
#[command(about = "IDM - Role and attribute management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file
    #[arg(short, long, global = true, default_value = "idm.yaml")]
    config: PathBuf,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and role store
    Init(InitCommand),
    /// Manage roles
    Role(RoleCommand),
    /// Manage role attributes
    Attr(AttrCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context {
        config_path: cli.config,
        json: cli.json,
    };

    match cli.command {
        Commands::Init(cmd) => cmd.run(),
        Commands::Role(cmd) => cmd.run(&ctx),
        Commands::Attr(cmd) => cmd.run(&ctx),
    }
}
