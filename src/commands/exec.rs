use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::proxy::{AdbArgs, AdbProxy};

pub fn execute(proxy: &AdbProxy, name: &str, args: &[String], shell: bool) -> Result<()> {
    let args = if shell {
        AdbArgs::Shell(args.join(" "))
    } else {
        AdbArgs::Argv(args.to_vec())
    };

    let out = proxy.invoke(name, args)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&out).context("Failed to write adb output")?;
    stdout.flush().context("Failed to flush stdout")?;

    Ok(())
}
