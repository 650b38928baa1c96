// ── Port domain types ──

use serde::Serialize;
use strum::Display;

/// Operational link state. The backend resolves SNMP `ifOperStatus`
/// (value 1 ⇒ up, anything else ⇒ down) before we ever see the port, so
/// this is a faithful carrier, never recomputed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum LinkState {
    #[strum(serialize = "UP")]
    Up,
    #[strum(serialize = "DOWN")]
    Down,
}

impl LinkState {
    pub fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Physical connector family of a port or section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
pub enum PortKind {
    #[strum(serialize = "RJ45")]
    Rj45,
    #[strum(serialize = "SFP")]
    Sfp,
    #[strum(serialize = "SFP+")]
    SfpPlus,
    #[strum(serialize = "SFP28")]
    Sfp28,
    #[strum(serialize = "QSFP")]
    Qsfp,
    #[strum(serialize = "QSFP+")]
    QsfpPlus,
    #[strum(serialize = "QSFP28")]
    Qsfp28,
    /// Connector string we don't recognize -- preserved verbatim so an
    /// edit round-trip never rewrites a record we didn't touch.
    #[strum(to_string = "{0}")]
    Other(String),
}

impl PortKind {
    /// Quad-lane connectors get the wide slot treatment in layouts.
    pub fn is_quad(&self) -> bool {
        match self {
            Self::Qsfp | Self::QsfpPlus | Self::Qsfp28 => true,
            Self::Other(s) => s.contains("QSFP"),
            _ => false,
        }
    }

    /// The connector family a combo section pairs against: RJ45 flips
    /// to SFP, every fiber flavor flips back to RJ45.
    pub fn combo_counterpart(&self) -> Self {
        if *self == Self::Rj45 {
            Self::Sfp
        } else {
            Self::Rj45
        }
    }

    /// The wire representation expected by the backend.
    pub fn wire_name(&self) -> String {
        self.to_string()
    }
}

/// Switchport mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum PortMode {
    #[strum(serialize = "access")]
    Access,
    #[strum(serialize = "trunk")]
    Trunk,
}

/// Optical transceiver diagnostics (DOM/DDM). Any single present value
/// is enough to show the block; absent values are simply omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DomReading {
    /// Module temperature in °C.
    pub temperature: Option<f64>,
    /// Supply voltage in V.
    pub voltage: Option<f64>,
    /// Transmit power in dBm.
    pub tx_power: Option<f64>,
    /// Receive power in dBm.
    pub rx_power: Option<f64>,
    /// Laser bias current in mA.
    pub bias_current: Option<f64>,
}

impl DomReading {
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.voltage.is_none()
            && self.tx_power.is_none()
            && self.rx_power.is_none()
            && self.bias_current.is_none()
    }
}

/// Live state of one physical port, as carried by a snapshot.
///
/// A breakout port is a single physical slot split into up to four
/// sub-interfaces; the parent then has no meaningful state of its own
/// and `breakout_ports` carries the real interfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub physical_index: u32,
    pub kind: PortKind,
    pub state: LinkState,
    pub if_name: String,
    pub if_desc: String,
    /// Negotiated speed, bits per second.
    pub speed: u64,
    /// Ingress rate, bytes per second.
    pub in_rate: u64,
    /// Egress rate, bytes per second.
    pub out_rate: u64,
    pub vlan_id: i32,
    pub allowed_vlans: String,
    pub mode: PortMode,
    pub is_breakout: bool,
    pub breakout_ports: Vec<Port>,
    pub dom: Option<DomReading>,
}

impl Port {
    pub fn is_trunk(&self) -> bool {
        self.mode == PortMode::Trunk
    }
}
