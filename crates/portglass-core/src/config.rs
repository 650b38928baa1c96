// ── Runtime monitor configuration ──
//
// Describes *how* to poll, not *what* -- the device id is chosen at
// runtime through `Poller::start`. Consumers (CLI, embedding shells)
// construct this; core never reads config files.

use std::time::Duration;

/// Tuning for a [`crate::Poller`].
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Fixed delay between the completion of one fetch and the start of
    /// the next. The first fetch of a freshly selected device always
    /// fires immediately.
    pub poll_interval: Duration,
    /// Keep fetching while the view is hidden instead of degrading to
    /// the no-op heartbeat.
    pub always_poll: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            always_poll: false,
        }
    }
}
