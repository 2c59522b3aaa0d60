use anyhow::{Context, Result};

use crate::output::{json, table};
use crate::ports;
use crate::proxy::AdbProxy;

pub fn execute(proxy: &AdbProxy, output_json: bool) -> Result<()> {
    let entries = ports::list_forwards(proxy).context("Failed to list adb forwards")?;

    if output_json {
        json::print_forwards(&entries);
    } else {
        table::print_forwards(&entries);
    }

    Ok(())
}
