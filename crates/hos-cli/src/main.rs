//! HOS Planner - hours-of-service compliance and trip planning for truck drivers
//!
//! A CLI tool that checks duty logs against HOS limits and plans
//! HOS-aware routes and schedules.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    hos_app::logging::init_tracing(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
