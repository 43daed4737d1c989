//! `mlm`: an interactive shell over a collection of media file metadata.

use clap::Parser;
use exn::ResultExt;
use medialib_config::Config;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod command;
mod error;
mod results;
mod session;

use crate::cli::Cli;
use crate::command::Command;
use crate::error::{ErrorKind, Result};
use crate::session::Session;

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("mlm error: {}", *err);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).map_err(ErrorKind::config)?;
    init_tracing(&config, cli.quiet, cli.verbose)?;

    let mut session = Session::new();
    let mut out = io::stdout().lock();

    let preload: Vec<String> = config.autoload.iter().chain(&cli.files).cloned().collect();
    if !preload.is_empty() {
        tracing::info!(files = preload.len(), "preloading");
        session.handle(Command::Load { files: preload }, &mut out)?;
    }

    session.run(io::stdin().lock(), &mut out, &config.prompt)
}

fn init_tracing(config: &Config, quiet: bool, verbose: bool) -> Result<()> {
    let directive = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        config.log.as_str()
    };
    let filter = EnvFilter::try_new(directive).or_raise(|| ErrorKind::Logging)?;
    if tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init().is_err() {
        exn::bail!(ErrorKind::Logging);
    }
    Ok(())
}
