//! sio - command-line front end for a ScaleIO gateway.
//!
//! A thin wrapper over the `scaleio` library, intended for inspecting a
//! cluster and for scripting simple volume chores.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use scaleio::config::ENV_DEBUG;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let debug = std::env::var(ENV_DEBUG).is_ok_and(|v| v == "true");
    init_logging(cli.verbose, cli.json_logs, debug);

    match commands::handle(cli.gateway, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8, json: bool, debug: bool) {
    let filter = match verbosity {
        0 if debug => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so command output stays pipeable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
