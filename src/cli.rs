//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Scrapes General Conference proceedings into a relational dataset.
#[derive(Parser, Debug)]
#[command(name = "podium", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the whole conference archive and write the JSON and SQLite exports
    Scrape {
        /// Directory to write export artifacts into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Concurrent in-flight talk page fetches
        #[arg(short, long)]
        workers: Option<usize>,
    },
}

impl Args {
    /// Log filter directive for the chosen verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
