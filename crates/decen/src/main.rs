use std::process::ExitCode;

use clap::Parser;

use cli::app::{App, Commands};

mod cli;
mod logging;
mod ui;

fn main() -> anyhow::Result<ExitCode> {
    let app = App::parse();
    logging::init(app.verbose)?;

    match &app.cmd {
        Some(Commands::Digest(arg)) => Ok(cli::digest(arg)),
        None => cli::mirror(&app.mirror),
    }
}
