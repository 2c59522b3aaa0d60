pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod ports;
pub mod proxy;
pub mod types;
#[cfg(feature = "watch")]
pub mod watch;

pub use cli::Cli;
pub use error::{AdbError, CommandError};
pub use ports::{list_occupied_ports, list_occupied_ports_with, parse_forward_list};
pub use proxy::{AdbArgs, AdbCommand, AdbProxy};
pub use types::ForwardEntry;

use std::io;

use anyhow::Result;
use clap::CommandFactory;

pub fn run(cli: Cli) -> Result<()> {
    let proxy = cli.proxy();

    match &cli.command {
        cli::Commands::Ports { watch, interval } => {
            if *watch {
                return run_watch(&proxy, *interval, cli.json);
            }
            commands::ports::execute(&proxy, cli.json)
        }
        cli::Commands::Forward {
            host_port,
            device_port,
        } => commands::forward::execute(&proxy, *host_port, *device_port, cli.json),
        cli::Commands::Unforward { host_port } => {
            commands::forward::remove(&proxy, *host_port, cli.json)
        }
        cli::Commands::Getprop { name } => commands::getprop::execute(&proxy, name, cli.json),
        cli::Commands::Exec { name, args, shell } => {
            commands::exec::execute(&proxy, name, args, *shell)
        }
        cli::Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "adbp", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(feature = "watch")]
fn run_watch(proxy: &AdbProxy, interval: f64, json: bool) -> Result<()> {
    let interval = std::time::Duration::try_from_secs_f64(interval)
        .map_err(|_| anyhow::anyhow!("Invalid refresh interval: {interval}"))?;
    watch::run(proxy, watch::WatchOptions { interval, json })
}

#[cfg(not(feature = "watch"))]
fn run_watch(_proxy: &AdbProxy, _interval: f64, _json: bool) -> Result<()> {
    anyhow::bail!("Watch mode requires the 'watch' feature")
}

/// Process exit status for a failed run.
///
/// When adb itself exited non-zero its code is passed through; everything
/// else maps to 1.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<AdbError>()
        .and_then(AdbError::ret_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
