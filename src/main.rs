//! Podium: scrapes General Conference proceedings into a relational dataset.

mod cli;
mod error;
mod pipeline;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match podium_config::Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("{err:?}");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.command {
        Command::Scrape { output, workers } => pipeline::run(&config, output, workers).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:?}");
            ExitCode::FAILURE
        }
    }
}
