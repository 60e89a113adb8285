#![warn(missing_docs)]

//! Entry point for the `weaver` binary.

mod chooser;
mod cli;
mod commands;
mod error;

use std::process;

use clap::Parser;
use tracing::{debug, error};

use crate::{
    cli::{Cli, Commands},
    error::Result,
};

fn main() {
    if let Err(err) = run() {
        error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

/// Parse CLI arguments, install logging, load config, and dispatch.
fn run() -> Result<()> {
    let Cli {
        log,
        config_path,
        command,
    } = Cli::parse();
    logging::init(&log.spec());

    let (cfg, source) = config::resolve(config_path.as_deref())?;
    match &source {
        Some(p) => debug!(path = %p.display(), "config loaded"),
        None => debug!("using built-in config"),
    }

    match command {
        Commands::Resize(args) => commands::resize(&cfg, &args),
        Commands::Compute(args) => commands::compute(&cfg, &args),
        Commands::Displays => commands::displays(&cfg),
        Commands::Apps => commands::apps(&cfg),
        Commands::Bindings => commands::bindings(&cfg),
        Commands::Permissions(args) => commands::permission_status(&args),
    }
}
