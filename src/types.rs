//! Core data types for forwarded ports.

use serde::Serialize;

/// One line of `adb forward --list`.
///
/// The line looks like `<serial> tcp:<host_port> tcp:<device_port>`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct ForwardEntry {
    pub serial: String,
    pub host_port: u16,
    /// Device side of the binding, without the `tcp:` prefix.
    pub device_port: String,
}

impl ForwardEntry {
    pub fn host_ports(entries: &[ForwardEntry]) -> Vec<u16> {
        entries.iter().map(|e| e.host_port).collect()
    }
}
