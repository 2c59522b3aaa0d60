use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

fn main() -> ExitCode {
    let cli = adbproxy::Cli::parse();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(cli.log_filter()));

    match adbproxy::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::from(adbproxy::exit_status(&err))
        }
    }
}
