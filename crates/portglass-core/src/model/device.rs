// ── Device domain type ──

use serde::Serialize;

use super::section::PortSection;

/// A managed switch: identity, SNMP parameters, and the ordered section
/// configuration used by both the layout engine and the editor.
///
/// Instances are immutable snapshots -- the poller replaces the live copy
/// wholesale each cycle, and the editor works on an owned clone so a
/// cancelled edit leaves the fetched original untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: i64,
    pub name: String,
    pub ip_address: String,
    pub community: String,
    /// Interface count detected at the last SNMP sync, 0 if unknown.
    pub detected_ports: u32,
    /// Permit physical index 0 (some stacks number their first port 0).
    pub allow_port_zero: bool,
    pub enabled: bool,
    pub sections: Vec<PortSection>,
}
