//! CLI argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{defaults, env as env_config};

/// keyringctl CLI
#[derive(Parser, Debug)]
#[command(name = "keyringctl")]
#[command(version)]
#[command(about = "Inspect context-bound keyrings and their bindings", long_about = None)]
pub struct Cli {
    /// Keyring storage base directory (defaults to ~/.keyringctl/keyrings)
    #[arg(short, long, env = env_config::HOME_VAR)]
    pub base_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List keyrings or context bindings
    #[command(subcommand)]
    Get(GetResource),

    /// Show one keyring's details
    Show(ShowArgs),
}

/// Resource types for the 'get' command
#[derive(Subcommand, Debug)]
pub enum GetResource {
    /// List keyrings on disk
    #[command(visible_alias = "keyring", visible_alias = "kr")]
    Keyrings(KeyringsArgs),

    /// List context-to-keyring bindings
    #[command(visible_alias = "context", visible_alias = "ctx")]
    Contexts,
}

/// Arguments for 'get keyrings'
#[derive(Parser, Debug)]
pub struct KeyringsArgs {
    /// Context to list (all contexts when omitted)
    #[arg(short, long)]
    pub context: Option<String>,
}

/// Arguments for 'show'
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Keyring name
    pub name: String,

    /// Context the keyring belongs to
    #[arg(short, long)]
    pub context: String,
}
