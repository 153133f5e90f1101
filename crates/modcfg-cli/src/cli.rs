//! Command-line argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "modcfg",
    about = "Edit mod config files across JSON, TOML, YAML, and Properties",
    version
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List candidate config files for a mod
    List {
        /// Mod name to match against file paths (case-insensitive)
        mod_name: String,
        /// Directory to scan
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print the parsed tree of a config file, comments included
    Show {
        file: PathBuf,
        /// Keep only keys matching this substring (and their subtrees)
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print the value at a path
    Get { file: PathBuf, path: String },
    /// Set the value at a path and save
    Set {
        file: PathBuf,
        path: String,
        /// New value; decoded as bool, number, or string
        value: String,
    },
    /// Remove the key at a path and save
    Unset { file: PathBuf, path: String },
    /// Interactively edit a config file
    Edit { file: PathBuf },
}
