// ── Per-interface traffic history ──
//
// Bounded rate series keyed by interface name, fed one sample per poll
// cycle. Keys are independent of device/section identity, so a series
// survives section reconfiguration; an interface that disappears from a
// snapshot keeps its accumulated history until explicitly cleared.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::watch;

use crate::model::{Port, PortSection};

/// Samples retained per interface -- three minutes at the 3 s cadence.
pub const HISTORY_CAPACITY: usize = 60;

/// One rate observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficSample {
    /// Wall-clock label (`HH:MM:SS`), ready for axis display.
    pub time: String,
    /// Ingress rate, bytes per second.
    #[serde(rename = "in")]
    pub inbound: u64,
    /// Egress rate, bytes per second.
    #[serde(rename = "out")]
    pub outbound: u64,
}

/// Concurrent store of bounded per-interface series.
///
/// Mutated only by the poll stream's apply step; read by presentation
/// code through [`get`](Self::get). A `watch` version counter lets
/// subscribers re-render on change without polling the map.
pub struct TrafficHistory {
    series: DashMap<String, VecDeque<TrafficSample>>,
    version: watch::Sender<u64>,
}

impl Default for TrafficHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficHistory {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        Self {
            series: DashMap::new(),
            version,
        }
    }

    /// Append one sample per interface found in `sections`.
    ///
    /// Breakout ports are flattened: each sub-interface is recorded
    /// individually and the parent slot -- which has no traffic of its
    /// own -- is skipped.
    pub fn record(&self, sections: &[PortSection], timestamp: DateTime<Local>) {
        let time = timestamp.format("%H:%M:%S").to_string();
        for section in sections {
            for port in &section.ports {
                if port.is_breakout {
                    for sub in &port.breakout_ports {
                        self.push_sample(sub, &time);
                    }
                } else {
                    self.push_sample(port, &time);
                }
            }
        }
        self.version.send_modify(|v| *v += 1);
    }

    fn push_sample(&self, port: &Port, time: &str) {
        let mut entry = self.series.entry(port.if_name.clone()).or_default();
        entry.push_back(TrafficSample {
            time: time.to_owned(),
            inbound: port.in_rate,
            outbound: port.out_rate,
        });
        while entry.len() > HISTORY_CAPACITY {
            entry.pop_front();
        }
    }

    /// The current series for an interface, oldest first. Unknown
    /// interfaces yield an empty series.
    pub fn get(&self, if_name: &str) -> Vec<TrafficSample> {
        self.series
            .get(if_name)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All interface names with at least one recorded sample.
    pub fn interfaces(&self) -> Vec<String> {
        self.series.iter().map(|e| e.key().clone()).collect()
    }

    /// Drop one interface's series. Returns `true` if it existed.
    pub fn clear_interface(&self, if_name: &str) -> bool {
        let removed = self.series.remove(if_name).is_some();
        if removed {
            self.version.send_modify(|v| *v += 1);
        }
        removed
    }

    /// Drop all series.
    pub fn clear(&self) {
        self.series.clear();
        self.version.send_modify(|v| *v += 1);
    }

    /// Subscribe to the version counter; it bumps once per applied
    /// snapshot (not per interface).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}
