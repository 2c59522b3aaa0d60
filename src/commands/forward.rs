use anyhow::{Context, Result};
use colored::Colorize;
use log::warn;

use crate::ports;
use crate::proxy::AdbProxy;

pub fn execute(proxy: &AdbProxy, host_port: u16, device_port: u16, output_json: bool) -> Result<()> {
    // adb replaces an existing binding without complaint, so say so up front.
    match ports::list_occupied_ports_with(proxy) {
        Ok(occupied) if occupied.contains(&host_port) => {
            warn!("host port {host_port} is already forwarded by adb and will be rebound");
        }
        Ok(_) => {}
        Err(err) => warn!("skipping rebind check for host port {host_port}: {err}"),
    }

    proxy
        .forward_tcp(host_port, device_port)
        .with_context(|| format!("Failed to forward tcp:{host_port} to tcp:{device_port}"))?;

    if output_json {
        let output = serde_json::json!({
            "serial": proxy.serial(),
            "host_port": host_port,
            "device_port": device_port,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} Forwarding tcp:{} → tcp:{}",
            "✓".green(),
            host_port.to_string().cyan(),
            device_port.to_string().cyan()
        );
    }

    Ok(())
}

pub fn remove(proxy: &AdbProxy, host_port: u16, output_json: bool) -> Result<()> {
    proxy
        .forward_remove(host_port)
        .with_context(|| format!("Failed to remove forwarding for tcp:{host_port}"))?;

    if output_json {
        let output = serde_json::json!({
            "serial": proxy.serial(),
            "removed": host_port,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} Removed forwarding for tcp:{}",
            "✓".green(),
            host_port.to_string().cyan()
        );
    }

    Ok(())
}
