// ── Wire-to-domain type conversions ──
//
// Bridges raw `portglass_api` payloads into canonical domain types, and
// builds the one wire-bound payload we produce (the device update).
// Each mapping is total: unknown strings land in a defensive fallback
// rather than failing the conversion.

use portglass_api::{
    RawDevice, RawDeviceConfig, RawDomInfo, RawPort, RawPortSection, RawSession, RawSystemInfo,
    StatusResponse, UpdateDeviceRequest,
};

use crate::model::{
    Device, DeviceSnapshot, DomReading, LayoutMode, LinkState, Port, PortKind, PortMode,
    PortSection, Role, Session, SystemInfo,
};

// ── Mapping helpers ─────────────────────────────────────────────────

/// `"UP"` means up; everything else (including synthesized placeholder
/// entries with an empty status) is down. The backend already applied
/// the ifOperStatus rule -- this is carriage, not classification.
fn map_link_state(raw: &str) -> LinkState {
    if raw == "UP" {
        LinkState::Up
    } else {
        LinkState::Down
    }
}

fn map_port_mode(raw: &str) -> PortMode {
    if raw == "trunk" {
        PortMode::Trunk
    } else {
        PortMode::Access
    }
}

/// Parse a wire connector string into a [`PortKind`], preserving
/// unknown values.
pub fn parse_port_kind(raw: &str) -> PortKind {
    match raw {
        "RJ45" => PortKind::Rj45,
        "SFP" => PortKind::Sfp,
        "SFP+" => PortKind::SfpPlus,
        "SFP28" => PortKind::Sfp28,
        "QSFP" => PortKind::Qsfp,
        "QSFP+" => PortKind::QsfpPlus,
        "QSFP28" => PortKind::Qsfp28,
        other => PortKind::Other(other.to_owned()),
    }
}

/// Merge the two wire layout fields (`layout` wins, then `layout_type`)
/// into a `LayoutMode`, defaulting to odd-top.
fn map_layout(layout: Option<&str>, layout_type: Option<&str>) -> LayoutMode {
    match layout.or(layout_type) {
        Some("sequential") => LayoutMode::Sequential,
        _ => LayoutMode::OddTop,
    }
}

fn map_dom(raw: RawDomInfo) -> Option<DomReading> {
    let reading = DomReading {
        temperature: raw.temperature,
        voltage: raw.voltage,
        tx_power: raw.tx_power,
        rx_power: raw.rx_power,
        bias_current: raw.bias_current,
    };
    if reading.is_empty() { None } else { Some(reading) }
}

// ── Wire → domain ───────────────────────────────────────────────────

impl From<RawPort> for Port {
    fn from(p: RawPort) -> Self {
        Port {
            physical_index: p.physical_index,
            kind: parse_port_kind(&p.port_type),
            state: map_link_state(&p.status),
            if_name: p.if_name,
            if_desc: p.if_desc,
            speed: p.speed,
            in_rate: p.in_rate,
            out_rate: p.out_rate,
            vlan_id: p.vlan_id,
            allowed_vlans: p.allowed_vlans,
            mode: map_port_mode(&p.mode),
            is_breakout: p.is_breakout,
            breakout_ports: p
                .breakout_ports
                .unwrap_or_default()
                .into_iter()
                .map(Port::from)
                .collect(),
            dom: map_dom(p.dom),
        }
    }
}

impl From<RawPortSection> for PortSection {
    fn from(s: RawPortSection) -> Self {
        let layout = map_layout(s.layout.as_deref(), s.layout_type.as_deref());
        PortSection {
            id: s.id,
            title: s.title,
            kind: parse_port_kind(&s.port_type),
            layout,
            rows: s.rows,
            port_ranges: s.port_ranges,
            is_combo: s.is_combo,
            ports: s
                .ports
                .unwrap_or_default()
                .into_iter()
                .map(Port::from)
                .collect(),
        }
    }
}

impl From<RawSystemInfo> for SystemInfo {
    fn from(s: RawSystemInfo) -> Self {
        SystemInfo {
            name: s.name,
            descr: s.descr,
            uptime: s.uptime,
            contact: s.contact,
            location: s.location,
        }
    }
}

impl From<StatusResponse> for DeviceSnapshot {
    fn from(resp: StatusResponse) -> Self {
        DeviceSnapshot {
            system: resp.system.map(SystemInfo::from),
            sections: resp.sections.into_iter().map(PortSection::from).collect(),
        }
    }
}

impl From<RawDevice> for Device {
    fn from(d: RawDevice) -> Self {
        Device {
            id: d.id,
            name: d.name,
            ip_address: d.ip_address,
            community: d.community,
            detected_ports: d.detected_ports,
            allow_port_zero: d.allow_port_zero,
            enabled: d.enabled,
            sections: d
                .config
                .sections
                .unwrap_or_default()
                .into_iter()
                .map(PortSection::from)
                .collect(),
        }
    }
}

impl From<RawSession> for Session {
    fn from(s: RawSession) -> Self {
        let role = if s.role == "admin" {
            Role::Admin
        } else {
            Role::User
        };
        Session {
            username: s.username,
            role,
            password_change_required: s.password_change_required,
        }
    }
}

// ── Domain → wire ───────────────────────────────────────────────────

/// Serialize a section back to its wire form. Live ports are never sent
/// upstream -- the backend stores configuration only.
pub fn section_to_wire(section: &PortSection) -> RawPortSection {
    RawPortSection {
        id: section.id.clone(),
        title: section.title.clone(),
        section_type: section.kind.wire_name(),
        port_type: section.kind.wire_name(),
        layout: Some(section.layout.to_string()),
        layout_type: None,
        rows: section.rows,
        port_ranges: section.port_ranges.clone(),
        is_combo: section.is_combo,
        ports: None,
    }
}

/// Build the full `PUT /api/switches` payload from an edited device.
pub fn update_request(device: &Device) -> UpdateDeviceRequest {
    UpdateDeviceRequest {
        id: device.id,
        name: device.name.clone(),
        ip_address: device.ip_address.clone(),
        community: device.community.clone(),
        detected_ports: device.detected_ports,
        allow_port_zero: device.allow_port_zero,
        enabled: device.enabled,
        config: RawDeviceConfig {
            sections: Some(device.sections.iter().map(section_to_wire).collect()),
        },
    }
}
