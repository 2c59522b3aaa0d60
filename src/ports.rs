//! Host ports already bound by `adb forward`.
//!
//! adb silently overrides a binding when asked to forward a host port it
//! already uses, instead of failing with a bind error. Check these ports
//! before picking one to forward.

use crate::error::AdbError;
use crate::proxy::AdbProxy;
use crate::types::ForwardEntry;

const FORWARD_SEPARATOR: &str = " tcp:";

/// List every host port occupied by `adb forward`, across all devices.
pub fn list_occupied_ports() -> Result<Vec<u16>, AdbError> {
    list_occupied_ports_with(&AdbProxy::default())
}

/// Same as [`list_occupied_ports`], asking `proxy` for the forward list.
pub fn list_occupied_ports_with(proxy: &AdbProxy) -> Result<Vec<u16>, AdbError> {
    let entries = list_forwards(proxy)?;
    Ok(ForwardEntry::host_ports(&entries))
}

/// Run `forward --list` on `proxy` and parse every well-formed entry.
pub fn list_forwards(proxy: &AdbProxy) -> Result<Vec<ForwardEntry>, AdbError> {
    let out = proxy.forward("--list")?;
    parse_forward_list(&String::from_utf8(out)?)
}

/// Parse `adb forward --list` output, keeping line order.
///
/// Lines that do not split into exactly three ` tcp:` segments are not
/// forwarding entries and are skipped.
pub fn parse_forward_list(output: &str) -> Result<Vec<ForwardEntry>, AdbError> {
    let mut entries = Vec::new();

    for line in output.trim().split('\n') {
        let tokens: Vec<&str> = line.split(FORWARD_SEPARATOR).collect();
        if tokens.len() != 3 {
            continue;
        }

        let host_port = tokens[1].parse().map_err(|source| AdbError::ParsePort {
            line: line.to_string(),
            source,
        })?;

        entries.push(ForwardEntry {
            serial: tokens[0].to_string(),
            host_port,
            device_port: tokens[2].to_string(),
        });
    }

    Ok(entries)
}
