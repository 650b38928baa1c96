// ── System metadata, sessions, and the snapshot container ──

use serde::Serialize;

use super::section::PortSection;

/// SNMP system group metadata reported with a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInfo {
    pub name: String,
    pub descr: String,
    pub uptime: String,
    pub contact: String,
    pub location: String,
}

/// One complete, internally consistent telemetry read for a device.
/// Rates and states within a snapshot come from the same SNMP pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub system: Option<SystemInfo>,
    pub sections: Vec<PortSection>,
}

/// Backend account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Admin,
    User,
}

/// Authenticated session identity. Only two fields gate core behavior:
/// polling may not start while a password change is pending, and device
/// mutations require the admin role (enforced server-side too).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
    pub password_change_required: bool,
}

impl Session {
    /// Whether this session is allowed to start the poll stream.
    pub fn may_poll(&self) -> bool {
        !self.password_change_required
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
