//! Proxy over the adb command-line tool.
//!
//! Any adb subcommand can be reached through [`AdbProxy::invoke`]; the
//! subcommands used most often also get typed wrappers. Underscores in a
//! subcommand name are turned into hyphens, so `wait_for_device` runs
//! `adb wait-for-device`.

use std::fmt;
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use crate::error::{AdbError, CommandError};

/// Binary spawned when no explicit path is configured. Resolved on `PATH`.
pub const DEFAULT_ADB_BINARY: &str = "adb";

/// Arguments passed after the subcommand name.
///
/// A `Shell` string is appended to the command line and the whole line goes
/// through the system shell, so quotes and pipes are interpreted. `Argv`
/// tokens are passed to adb one by one with no shell involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdbArgs {
    Shell(String),
    Argv(Vec<String>),
}

impl Default for AdbArgs {
    fn default() -> Self {
        AdbArgs::Shell(String::new())
    }
}

impl From<&str> for AdbArgs {
    fn from(args: &str) -> Self {
        AdbArgs::Shell(args.to_string())
    }
}

impl From<String> for AdbArgs {
    fn from(args: String) -> Self {
        AdbArgs::Shell(args)
    }
}

impl From<Vec<String>> for AdbArgs {
    fn from(args: Vec<String>) -> Self {
        AdbArgs::Argv(args)
    }
}

impl From<Vec<&str>> for AdbArgs {
    fn from(args: Vec<&str>) -> Self {
        AdbArgs::Argv(args.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for AdbArgs {
    fn from(args: &[&str]) -> Self {
        AdbArgs::Argv(args.iter().map(|a| a.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AdbArgs {
    fn from(args: [&str; N]) -> Self {
        AdbArgs::Argv(args.iter().map(|a| a.to_string()).collect())
    }
}

/// A fully built adb invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdbCommand {
    /// Command line handed to `sh -c` (`cmd /C` on Windows).
    Shell(String),
    /// Program followed by its arguments, executed directly.
    Argv(Vec<String>),
}

impl AdbCommand {
    pub fn is_shell(&self) -> bool {
        matches!(self, AdbCommand::Shell(_))
    }
}

impl fmt::Display for AdbCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdbCommand::Shell(line) => write!(f, "{line}"),
            AdbCommand::Argv(argv) => write!(f, "{}", argv.join(" ")),
        }
    }
}

/// Handle bound to one device serial.
///
/// An empty serial addresses whatever device adb picks by default. The serial
/// and binary never change after construction, so a proxy can be cloned and
/// shared between threads freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdbProxy {
    serial: String,
    binary: String,
}

impl Default for AdbProxy {
    fn default() -> Self {
        Self::new("")
    }
}

impl AdbProxy {
    pub fn new(serial: impl Into<String>) -> Self {
        Self::with_binary(DEFAULT_ADB_BINARY, serial)
    }

    /// Proxy that spawns `binary` instead of the `adb` found on `PATH`.
    pub fn with_binary(binary: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            binary: binary.into(),
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Build the invocation for subcommand `name` without running it.
    pub fn command(&self, name: &str, args: impl Into<AdbArgs>) -> AdbCommand {
        let name = name.replace('_', "-");

        match args.into() {
            AdbArgs::Shell(args) => {
                let mut line = shell_quote_program(&self.binary);
                if !self.serial.is_empty() {
                    line.push_str(&format!(" -s \"{}\"", self.serial));
                }
                line.push(' ');
                line.push_str(&name);
                if !args.is_empty() {
                    line.push(' ');
                    line.push_str(&args);
                }
                AdbCommand::Shell(line)
            }
            AdbArgs::Argv(args) => {
                let mut argv = vec![self.binary.clone()];
                if !self.serial.is_empty() {
                    argv.push("-s".to_string());
                    argv.push(self.serial.clone());
                }
                argv.push(name);
                argv.extend(args);
                AdbCommand::Argv(argv)
            }
        }
    }

    /// Run adb subcommand `name` and return its stdout.
    pub fn invoke(&self, name: &str, args: impl Into<AdbArgs>) -> Result<Vec<u8>, AdbError> {
        run(&self.command(name, args))
    }

    pub fn forward(&self, args: impl Into<AdbArgs>) -> Result<Vec<u8>, AdbError> {
        self.invoke("forward", args)
    }

    pub fn shell(&self, args: impl Into<AdbArgs>) -> Result<Vec<u8>, AdbError> {
        self.invoke("shell", args)
    }

    pub fn devices(&self) -> Result<Vec<u8>, AdbError> {
        self.invoke("devices", AdbArgs::default())
    }

    pub fn start_server(&self) -> Result<Vec<u8>, AdbError> {
        self.invoke("start_server", AdbArgs::default())
    }

    pub fn kill_server(&self) -> Result<Vec<u8>, AdbError> {
        self.invoke("kill_server", AdbArgs::default())
    }

    pub fn wait_for_device(&self) -> Result<Vec<u8>, AdbError> {
        self.invoke("wait_for_device", AdbArgs::default())
    }

    /// Forward `host_port` on this machine to `device_port` on the device.
    ///
    /// adb silently replaces an existing binding on the same host port; check
    /// [`crate::ports::list_occupied_ports`] first if that matters.
    pub fn forward_tcp(&self, host_port: u16, device_port: u16) -> Result<(), AdbError> {
        self.forward(format!("tcp:{host_port} tcp:{device_port}"))?;
        Ok(())
    }

    /// Drop the forwarding bound to `host_port`.
    pub fn forward_remove(&self, host_port: u16) -> Result<(), AdbError> {
        self.forward(format!("--remove tcp:{host_port}"))?;
        Ok(())
    }

    /// Read a system property, i.e. `adb shell getprop <name>`.
    ///
    /// Unset properties come back as an empty string.
    pub fn get_prop(&self, name: &str) -> Result<String, AdbError> {
        let out = self.shell(format!("getprop {name}"))?;
        Ok(String::from_utf8(out)?.trim().to_string())
    }
}

/// Execute `command`, returning stdout when it exits 0.
pub fn run(command: &AdbCommand) -> Result<Vec<u8>, AdbError> {
    let mut process = match command {
        AdbCommand::Shell(line) => shell_command(line),
        AdbCommand::Argv(argv) => {
            let Some((program, args)) = argv.split_first() else {
                return Err(AdbError::Spawn {
                    command: command.clone(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        "empty argument vector",
                    ),
                });
            };
            let mut process = Command::new(program);
            process.args(args);
            process
        }
    };

    let output = process
        .stdin(Stdio::null())
        .output()
        .map_err(|source| AdbError::Spawn {
            command: command.clone(),
            source,
        })?;

    let ret_code = exit_code(output.status);
    debug!(
        "cmd: {}, stdout: {}, stderr: {}, ret: {}",
        command,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
        ret_code
    );

    if output.status.success() {
        Ok(output.stdout)
    } else {
        Err(CommandError {
            command: command.clone(),
            stdout: output.stdout,
            stderr: output.stderr,
            ret_code,
        }
        .into())
    }
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut process = Command::new("sh");
    process.arg("-c").arg(line);
    process
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut process = Command::new("cmd");
    process.arg("/C").arg(line);
    process
}

/// Quote `program` for a shell command line when it holds anything beyond
/// plain path characters. `adb` on `PATH` stays bare.
fn shell_quote_program(program: &str) -> String {
    let plain = !program.is_empty()
        && program
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:+,@\\".contains(c));
    if plain {
        program.to_string()
    } else {
        format!("\"{program}\"")
    }
}

/// Exit code of a finished process. A process killed by a signal reports the
/// negated signal number.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> AdbCommand {
        AdbCommand::Argv(tokens.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_underscores_become_hyphens() {
        let proxy = AdbProxy::default();
        assert_eq!(
            proxy.command("wait_for_device", AdbArgs::default()),
            AdbCommand::Shell("adb wait-for-device".to_string())
        );
        assert_eq!(
            proxy.command("tcp_forward", vec!["a_b"]),
            argv(&["adb", "tcp-forward", "a_b"])
        );
    }

    #[test]
    fn test_shell_command_without_serial() {
        let proxy = AdbProxy::new("");
        assert_eq!(
            proxy.command("forward", "tcp:5555 tcp:8080"),
            AdbCommand::Shell("adb forward tcp:5555 tcp:8080".to_string())
        );
    }

    #[test]
    fn test_shell_command_quotes_serial() {
        let proxy = AdbProxy::new("emulator-5554");
        assert_eq!(
            proxy.command("shell", "getprop ro.build.version.sdk"),
            AdbCommand::Shell(
                "adb -s \"emulator-5554\" shell getprop ro.build.version.sdk".to_string()
            )
        );
    }

    #[test]
    fn test_argv_command_with_serial() {
        let proxy = AdbProxy::new("0123456789ABCDEF");
        assert_eq!(
            proxy.command("install", vec!["-r", "app debug.apk"]),
            argv(&["adb", "-s", "0123456789ABCDEF", "install", "-r", "app debug.apk"])
        );
    }

    #[test]
    fn test_argv_command_without_serial() {
        let proxy = AdbProxy::default();
        assert_eq!(proxy.command("devices", ["-l"]), argv(&["adb", "devices", "-l"]));
        assert_eq!(
            proxy.command("devices", Vec::<String>::new()),
            argv(&["adb", "devices"])
        );
    }

    #[test]
    fn test_custom_binary_is_used() {
        let proxy = AdbProxy::with_binary("/opt/platform-tools/adb", "");
        assert_eq!(
            proxy.command("devices", AdbArgs::default()),
            AdbCommand::Shell("/opt/platform-tools/adb devices".to_string())
        );
        assert_eq!(proxy.binary(), "/opt/platform-tools/adb");
        assert_eq!(proxy.serial(), "");
    }

    #[test]
    fn test_binary_with_space_is_quoted_in_shell_mode() {
        let proxy = AdbProxy::with_binary("/opt/platform tools/adb", "emulator-5554");
        assert_eq!(
            proxy.command("forward", "tcp:5555 tcp:8080"),
            AdbCommand::Shell(
                "\"/opt/platform tools/adb\" -s \"emulator-5554\" forward tcp:5555 tcp:8080"
                    .to_string()
            )
        );
        assert_eq!(
            proxy.command("forward", vec!["--list"]),
            argv(&["/opt/platform tools/adb", "-s", "emulator-5554", "forward", "--list"])
        );
    }

    #[test]
    fn test_default_args_are_empty_shell_string() {
        assert_eq!(AdbArgs::default(), AdbArgs::Shell(String::new()));
        assert!(AdbProxy::default()
            .command("devices", AdbArgs::default())
            .is_shell());
    }

    #[test]
    fn test_run_rejects_empty_argv() {
        let err = run(&AdbCommand::Argv(Vec::new())).unwrap_err();
        assert!(matches!(err, AdbError::Spawn { .. }));
    }

    #[test]
    fn test_run_missing_binary_is_spawn_error() {
        let proxy = AdbProxy::with_binary("/nonexistent/adb_xyz_98765", "");
        let err = proxy.invoke("devices", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, AdbError::Spawn { .. }));
    }
}
