use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::proxy::{AdbProxy, DEFAULT_ADB_BINARY};

#[derive(Parser)]
#[command(name = "adbp")]
#[command(version, about = "Thin proxy over adb with structured errors")]
pub struct Cli {
    /// Serial of the device to address (default: adb picks one)
    #[arg(short, long, env = "ANDROID_SERIAL", global = true)]
    pub serial: Option<String>,

    /// Path to the adb binary
    #[arg(long, env = "ADB", default_value = DEFAULT_ADB_BINARY, global = true)]
    pub adb: String,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn proxy(&self) -> AdbProxy {
        AdbProxy::with_binary(self.adb.clone(), self.serial.clone().unwrap_or_default())
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List host ports occupied by adb forward
    Ports {
        /// Watch mode: refresh continuously
        #[arg(short, long)]
        watch: bool,
        /// Refresh interval in seconds (default: 1)
        #[arg(short = 'n', long, default_value = "1")]
        interval: f64,
    },
    /// Forward a host TCP port to a device TCP port
    Forward {
        /// Port on this machine
        host_port: u16,
        /// Port on the device
        device_port: u16,
    },
    /// Remove the forwarding bound to a host port
    Unforward {
        /// Port on this machine
        host_port: u16,
    },
    /// Read a device system property
    Getprop {
        /// Property name, e.g. ro.build.version.sdk
        name: String,
    },
    /// Run any adb subcommand (underscores become hyphens)
    ///
    /// Options for adbp go before `--`; everything after it is handed to adb,
    /// e.g. `adbp exec --shell shell -- 'ls | head'`.
    Exec {
        /// Subcommand name, e.g. wait_for_device or logcat
        name: String,
        /// Arguments passed after the subcommand (must follow `--`)
        #[arg(last = true)]
        args: Vec<String>,
        /// Join arguments into one string interpreted by the system shell
        #[arg(long)]
        shell: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
