//! modcfg CLI
//!
//! Command-line front end for the config document engine: list a mod's
//! config files, inspect parsed trees, and edit values from the terminal.

mod cli;
mod commands;
mod error;
mod interactive;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} mod config editor", "modcfg".green().bold());
            println!();
            println!("Run {} for available commands.", "modcfg --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::List { mod_name, dir } => commands::cmd_list(&mod_name, &dir),
        Commands::Show { file, filter } => commands::cmd_show(&file, filter.as_deref()),
        Commands::Get { file, path } => commands::cmd_get(&file, &path),
        Commands::Set { file, path, value } => commands::cmd_set(&file, &path, &value),
        Commands::Unset { file, path } => commands::cmd_unset(&file, &path),
        Commands::Edit { file } => interactive::run_editor(&file),
    }
}
