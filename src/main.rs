//! keyringctl - Main entry point

use clap::Parser;
use log::debug;

use keyringctl::{
    run_contexts_command, run_keyrings_command, run_show_command, Cli, Command, ContextManager,
    GetResource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let base_dir = cli
        .base_dir
        .clone()
        .unwrap_or_else(ContextManager::default_base_dir);
    debug!("Using keyring base directory {}", base_dir.display());

    match &cli.command {
        Command::Get(GetResource::Keyrings(args)) => {
            run_keyrings_command(&base_dir, args.context.as_deref())
        }
        Command::Get(GetResource::Contexts) => run_contexts_command(&base_dir),
        Command::Show(args) => run_show_command(&base_dir, &args.context, &args.name),
    }
}
