//! Domain layer between `portglass-api` and UI consumers.
//!
//! This crate owns the business logic of the switch visualizer:
//!
//! - **[`Poller`]** -- Lifecycle-managed polling scheduler:
//!   [`start(device_id)`](Poller::start) spawns a poll stream that fetches
//!   a telemetry snapshot every three seconds, feeds the traffic history,
//!   and publishes [`DeviceSnapshot`]s through a `watch` channel.
//!   Switching devices or calling [`stop()`](Poller::stop) cancels the
//!   stream; stale in-flight results are discarded by generation token.
//!
//! - **[`layout`]** -- Pure front-panel layout engine: section list +
//!   selected interface in, row-partitioned [`LayoutGroup`]s out, with
//!   combo-section pairing and breakout sub-port cells.
//!
//! - **[`TrafficHistory`]** -- Bounded per-interface rate series
//!   (`DashMap` + `watch` version channel), fed once per poll cycle.
//!
//! - **[`ranges`] / [`editor`]** -- Port-range expression parsing and the
//!   immutable section-editing operations built on it.
//!
//! - **Domain model** ([`model`]) -- Canonical types ([`Device`],
//!   [`PortSection`], [`Port`], …) converted from the wire types in
//!   [`convert`].

pub mod config;
pub mod convert;
pub mod editor;
pub mod error;
pub mod history;
pub mod layout;
pub mod model;
pub mod poller;
pub mod ranges;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::MonitorConfig;
pub use editor::SectionEdit;
pub use error::CoreError;
pub use history::{HISTORY_CAPACITY, TrafficHistory, TrafficSample};
pub use layout::{BreakoutCell, LayoutGroup, SectionLayout, Slot, UsageSummary};
pub use poller::{PollPhase, Poller, StatusSource};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Device, DeviceSnapshot, DomReading, LayoutMode, LinkState, Port, PortKind, PortMode,
    PortSection, Role, Session, SystemInfo,
};
