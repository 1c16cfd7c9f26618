mod cli;
mod config;
mod error;
mod handlers;
mod listing;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::io;
use std::process::ExitCode;
use config::{config_path, load_config};
use handlers::ls::handle_ls;
use listing::platform::LocalPlatform;

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(&config_path()?)?;
    let format = config.format(&cli);

    let platform = LocalPlatform::new();
    let mut out = io::BufWriter::new(io::stdout().lock());

    if handle_ls(&mut out, &cli.paths, format, &platform)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
