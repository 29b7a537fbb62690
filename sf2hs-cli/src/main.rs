mod api;
mod cli;
mod config;
mod fields_file;
mod report;
mod sync;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use cli::display::print_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli::commands::dispatch(cli.command).await {
        Ok(status) => status.exit_code(),
        Err(err) => {
            print_error(&format!("{:#}", err));
            ExitCode::from(2)
        }
    }
}
