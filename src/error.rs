//! Error types for adb invocations.

use std::fmt;
use std::io;
use std::num::ParseIntError;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::proxy::AdbCommand;

/// Errors that can occur while driving the adb binary.
#[derive(Error, Debug)]
pub enum AdbError {
    /// adb ran and exited with a non-zero status.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// adb could not be started at all (missing binary, permission denied).
    #[error("Failed to execute adb cmd \"{command}\": {source}")]
    Spawn {
        command: AdbCommand,
        #[source]
        source: io::Error,
    },

    /// A `forward --list` line carried a host port that is not a number.
    #[error("Invalid host port in forward list line {line:?}: {source}")]
    ParsePort {
        line: String,
        #[source]
        source: ParseIntError,
    },

    /// adb output was expected to be text but was not valid UTF-8.
    #[error("adb output is not valid UTF-8: {0}")]
    Decode(#[from] FromUtf8Error),
}

impl AdbError {
    /// The tool's exit code, if this error came from a non-zero exit.
    pub fn ret_code(&self) -> Option<i32> {
        match self {
            AdbError::Command(err) => Some(err.ret_code),
            _ => None,
        }
    }
}

/// A finished adb invocation that exited non-zero.
///
/// Only the exit code decides failure. adb writes diagnostics to stderr even
/// when it succeeds, so stderr is kept for reporting but never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError {
    pub command: AdbCommand,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub ret_code: i32,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error executing adb cmd \"{}\". ret: {}, stdout: {}, stderr: {}",
            self.command,
            self.ret_code,
            String::from_utf8_lossy(&self.stdout),
            String::from_utf8_lossy(&self.stderr)
        )
    }
}

impl std::error::Error for CommandError {}
