// ── Canonical domain model ──
//
// Strongly-typed counterparts of the wire types in `portglass_api`.
// Conversions live in `crate::convert`.

pub mod device;
pub mod port;
pub mod section;
pub mod system;

pub use device::Device;
pub use port::{DomReading, LinkState, Port, PortKind, PortMode};
pub use section::{LayoutMode, PortSection};
pub use system::{DeviceSnapshot, Role, Session, SystemInfo};
