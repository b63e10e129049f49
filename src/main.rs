mod cli;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let cli = cli::Cli::parse();
    if cli::run(cli) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
