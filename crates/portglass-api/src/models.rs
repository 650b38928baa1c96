// Wire types for the portglass backend JSON surface.
//
// Field names and optionality mirror the backend encoder exactly. The Go
// side marshals nil slices as JSON `null`, so every list field that can
// be empty is an `Option<Vec<_>>` here -- converters upstream flatten
// those to empty vectors.

use serde::{Deserialize, Serialize};

// ── Devices ─────────────────────────────────────────────────────────

/// A managed device record as stored by the backend, including its
/// section configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDevice {
    pub id: i64,
    pub name: String,
    pub ip_address: String,
    pub community: String,
    #[serde(default)]
    pub detected_ports: u32,
    #[serde(default)]
    pub allow_port_zero: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub config: RawDeviceConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDeviceConfig {
    #[serde(default)]
    pub sections: Option<Vec<RawPortSection>>,
}

/// One configured port section. Doubles as the live-status section when
/// the backend attaches `ports`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPortSection {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub section_type: String,
    #[serde(default)]
    pub port_type: String,
    /// Primary layout field; older records carry `layout_type` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_type: Option<String>,
    #[serde(default)]
    pub rows: u32,
    #[serde(default)]
    pub port_ranges: String,
    #[serde(default)]
    pub is_combo: bool,
    #[serde(default)]
    pub ports: Option<Vec<RawPort>>,
}

/// Live status of a single port (or breakout sub-interface).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPort {
    #[serde(default)]
    pub physical_index: u32,
    #[serde(default)]
    pub port_type: String,
    /// `"UP"` or `"DOWN"` -- already resolved from SNMP ifOperStatus by
    /// the backend.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub if_name: String,
    #[serde(default)]
    pub if_desc: String,
    /// Negotiated speed in bits per second.
    #[serde(default)]
    pub speed: u64,
    #[serde(default)]
    pub in_traffic: u64,
    #[serde(default)]
    pub out_traffic: u64,
    /// Bytes per second, derived from octet deltas by the backend.
    #[serde(default)]
    pub in_rate: u64,
    #[serde(default)]
    pub out_rate: u64,
    #[serde(default)]
    pub vlan_id: i32,
    #[serde(default)]
    pub allowed_vlans: String,
    /// `"access"` or `"trunk"`; may be empty on synthesized entries.
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub is_breakout: bool,
    #[serde(default)]
    pub breakout_ports: Option<Vec<RawPort>>,
    #[serde(default)]
    pub dom: RawDomInfo,
}

/// Optical transceiver diagnostics. Each field is independently nullable.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct RawDomInfo {
    pub temperature: Option<f64>,
    pub voltage: Option<f64>,
    pub tx_power: Option<f64>,
    pub rx_power: Option<f64>,
    pub bias_current: Option<f64>,
}

// ── System / status ─────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RawSystemInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub descr: String,
    #[serde(default)]
    pub uptime: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub location: String,
}

/// The two snapshot payload shapes the backend can emit. Newer versions
/// wrap the sections in an object with system metadata; older ones send
/// the bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StatusPayload {
    Keyed {
        #[serde(default)]
        system: Option<RawSystemInfo>,
        #[serde(default)]
        sections: Option<Vec<RawPortSection>>,
    },
    Bare(Vec<RawPortSection>),
}

/// Canonical snapshot shape -- the only one consumers ever see.
#[derive(Debug, Clone)]
pub struct StatusResponse {
    pub system: Option<RawSystemInfo>,
    pub sections: Vec<RawPortSection>,
}

impl From<StatusPayload> for StatusResponse {
    fn from(payload: StatusPayload) -> Self {
        match payload {
            StatusPayload::Keyed { system, sections } => Self {
                system,
                sections: sections.unwrap_or_default(),
            },
            StatusPayload::Bare(sections) => Self {
                system: None,
                sections,
            },
        }
    }
}

// ── Session ─────────────────────────────────────────────────────────

/// Session identity returned by `/api/login` and `/api/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSession {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub password_change_required: bool,
}

// ── Request bodies ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CreateDeviceRequest {
    /// Empty name lets the backend auto-detect via SNMP sysName.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ip_address: String,
    pub community: String,
    pub allow_port_zero: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateDeviceRequest {
    pub id: i64,
    pub name: String,
    pub ip_address: String,
    pub community: String,
    pub detected_ports: u32,
    pub allow_port_zero: bool,
    pub enabled: bool,
    pub config: RawDeviceConfig,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

fn default_true() -> bool {
    true
}
