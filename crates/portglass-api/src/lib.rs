//! Async client for the portglass backend REST API.
//!
//! The backend exposes a small JSON surface over a cookie-authenticated
//! session: device inventory CRUD (`/api/switches`), a per-device live
//! telemetry snapshot (`/api/switches/status`), topology re-sync, and the
//! session endpoints (`/api/login`, `/api/me`, `/api/logout`,
//! `/api/change-password`).
//!
//! This crate deals in *wire types only* -- raw structs that mirror the
//! backend JSON field-for-field. `portglass-core` converts them into
//! canonical domain types. The one normalization performed here is the
//! snapshot payload shape: older backends return a bare array of sections
//! while newer ones wrap it in `{ system, sections }`; [`SwitchClient::get_status`]
//! collapses both into a single [`StatusResponse`] so only one shape ever
//! leaves this crate.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod devices;
mod session;
mod status;

pub use client::SwitchClient;
pub use error::Error;
pub use models::{
    ChangePasswordRequest, CreateDeviceRequest, RawDevice, RawDeviceConfig, RawDomInfo, RawPort,
    RawPortSection, RawSession, RawSystemInfo, StatusResponse, UpdateDeviceRequest,
};
pub use transport::TransportConfig;
