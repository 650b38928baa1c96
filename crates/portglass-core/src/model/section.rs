// ── Port section domain types ──

use serde::Serialize;
use strum::Display;

use super::port::{Port, PortKind};

/// How a section's ports are distributed across its rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
pub enum LayoutMode {
    /// Odd indices on the top row, even on the bottom -- the standard
    /// front-panel numbering for two-row copper blocks.
    #[default]
    #[strum(serialize = "odd_top")]
    OddTop,
    /// Plain left-to-right fill, split into equal chunks.
    #[strum(serialize = "sequential")]
    Sequential,
}

/// One contiguous block of ports on the front panel.
///
/// `is_combo` marks the second half of a combo pair: such a section
/// shares physical slots with its predecessor and is rendered beside
/// it, never on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortSection {
    pub id: String,
    pub title: String,
    pub kind: PortKind,
    pub layout: LayoutMode,
    pub rows: u32,
    /// Range expression, e.g. `"1-24, 49, 51-52"`. Parsed leniently by
    /// [`crate::ranges::parse`].
    pub port_ranges: String,
    pub is_combo: bool,
    /// Live ports, present on snapshot sections and empty on bare
    /// configuration records.
    pub ports: Vec<Port>,
}

impl PortSection {
    /// Row count with the zero guard applied (a stored 0 means "use the
    /// default two-row panel").
    pub fn effective_rows(&self) -> u32 {
        if self.rows == 0 { 2 } else { self.rows }
    }
}
