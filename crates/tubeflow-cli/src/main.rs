mod app;
mod args;
mod commands;
mod render;
mod ui;

use clap::Parser;
use std::process::ExitCode;
use tubeflow_core::verbose;

use args::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Keys may live in a local .env file
    let dotenv = dotenvy::dotenv();
    verbose::init(cli.verbose);
    match dotenv {
        Ok(path) => verbose!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => verbose!("Ignoring .env: {e}"),
    }

    let result = match cli.command {
        Some(Command::Config(args)) => commands::config::run(args),
        Some(Command::Setup) => commands::setup::run(),
        None => commands::run::run(cli.run).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
