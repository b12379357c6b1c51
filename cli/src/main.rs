//! Command-line host for the lost & found board.
//!
//! Plays the part of the web front end: resolves the demo sign-in, loads the
//! directory through [`UreqTransport`], and renders one page per command.

mod cli;
mod commands;
mod logging;
mod render;
mod transport;

use clap::Parser;
use lostfound_core::{Anonymous, ClientConfig, DemoIdentity, IdentityProvider, Session};
use tracing::debug;

use crate::cli::Cli;
use crate::transport::UreqTransport;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init("warn")?;

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url)?;
    }
    debug!(api_url = %config.api_url, "configured");

    let identity: &dyn IdentityProvider = if cli.anonymous { &Anonymous } else { &DemoIdentity };
    let mut session = Session::start(identity, &config, UreqTransport::new());

    commands::execute(cli.command, &mut session, &mut std::io::stdout().lock())
}
