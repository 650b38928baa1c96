// ── Polling scheduler ──
//
// One poll stream per selected device: fetch → convert → feed history →
// publish snapshot → sleep → repeat. The delay is measured from the
// completion of one fetch to the start of the next (fixed delay, not
// fixed rate), and the first fetch of a freshly selected device fires
// immediately.
//
// Lifecycle: `start(device_id)` cancels any previous stream through its
// child CancellationToken and bumps the generation counter; a stream
// whose fetch completes after a newer one took over sees the mismatch
// at apply time and discards its result. `stop()` is the only way to
// reach the terminal Cancelled phase.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Local;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use portglass_api::{StatusResponse, SwitchClient};

use crate::config::MonitorConfig;
use crate::history::TrafficHistory;
use crate::model::DeviceSnapshot;

/// Where a snapshot comes from. `SwitchClient` is the production
/// implementation; tests inject scripted sources.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(
        &self,
        device_id: i64,
    ) -> impl Future<Output = Result<StatusResponse, portglass_api::Error>> + Send;
}

impl StatusSource for SwitchClient {
    fn fetch_status(
        &self,
        device_id: i64,
    ) -> impl Future<Output = Result<StatusResponse, portglass_api::Error>> + Send {
        self.get_status(device_id)
    }
}

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// No stream has been started yet.
    Idle,
    /// Waiting out the cadence delay (or the zero-delay first tick).
    Scheduled,
    /// A fetch is in flight.
    Fetching,
    /// Terminal: reached only through explicit [`Poller::stop`].
    Cancelled,
}

struct PollStream {
    device_id: i64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

struct PollerInner<S> {
    source: S,
    config: MonitorConfig,
    history: Arc<TrafficHistory>,
    snapshot: watch::Sender<Option<Arc<DeviceSnapshot>>>,
    phase: watch::Sender<PollPhase>,
    visible: watch::Sender<bool>,
    always_poll: watch::Sender<bool>,
    /// Monotonic stream generation, compared at apply time. A bare
    /// timestamp would not do: two fetches can complete within the
    /// same tick.
    generation: AtomicU64,
    stream: Mutex<Option<PollStream>>,
}

/// Lifecycle-managed polling scheduler.
///
/// Cheaply cloneable; all clones share one stream slot, one history
/// store, and one snapshot channel. At most one stream is active at a
/// time.
pub struct Poller<S: StatusSource> {
    inner: Arc<PollerInner<S>>,
}

impl<S: StatusSource> Clone for Poller<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StatusSource> Poller<S> {
    /// Create an idle poller. Nothing runs until [`start`](Self::start).
    pub fn new(source: S, config: MonitorConfig) -> Self {
        let (snapshot, _) = watch::channel(None);
        let (phase, _) = watch::channel(PollPhase::Idle);
        let (visible, _) = watch::channel(true);
        let (always_poll, _) = watch::channel(config.always_poll);

        Self {
            inner: Arc::new(PollerInner {
                source,
                config,
                history: Arc::new(TrafficHistory::new()),
                snapshot,
                phase,
                visible,
                always_poll,
                generation: AtomicU64::new(0),
                stream: Mutex::new(None),
            }),
        }
    }

    /// The traffic history fed by this poller's apply step.
    pub fn history(&self) -> Arc<TrafficHistory> {
        Arc::clone(&self.inner.history)
    }

    /// Subscribe to applied snapshots. Holds `None` until the first
    /// successful fetch of the current stream's device.
    pub fn snapshots(&self) -> watch::Receiver<Option<Arc<DeviceSnapshot>>> {
        self.inner.snapshot.subscribe()
    }

    /// Subscribe to scheduler phase transitions.
    pub fn phase(&self) -> watch::Receiver<PollPhase> {
        self.inner.phase.subscribe()
    }

    /// Feed the view's visibility. While hidden (and the always-poll
    /// override is off) the stream degrades to a no-op heartbeat.
    pub fn set_visible(&self, visible: bool) {
        self.inner.visible.send_replace(visible);
    }

    /// Toggle the always-poll override; takes effect on the next tick.
    pub fn set_always_poll(&self, always_poll: bool) {
        self.inner.always_poll.send_replace(always_poll);
    }

    /// The device the active stream is polling, if any.
    pub async fn current_device(&self) -> Option<i64> {
        self.inner.stream.lock().await.as_ref().map(|s| s.device_id)
    }

    /// Select a device and start its poll stream, tearing down any
    /// previous stream first. The first fetch fires immediately.
    pub async fn start(&self, device_id: i64) {
        let mut slot = self.inner.stream.lock().await;
        if let Some(old) = slot.take() {
            debug!(old = old.device_id, new = device_id, "replacing poll stream");
            old.cancel.cancel();
            let _ = old.handle.await;
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let cancel = CancellationToken::new();
        self.inner.phase.send_replace(PollPhase::Scheduled);

        let inner = Arc::clone(&self.inner);
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(poll_stream(inner, device_id, generation, task_cancel));

        *slot = Some(PollStream {
            device_id,
            cancel,
            handle,
        });
    }

    /// Tear down the active stream. In-flight work is cancelled, never
    /// applied, and never logged as a failure.
    pub async fn stop(&self) {
        let mut slot = self.inner.stream.lock().await;
        if let Some(stream) = slot.take() {
            stream.cancel.cancel();
            let _ = stream.handle.await;
        }
        // Invalidate any completion that somehow raced the cancel.
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.phase.send_replace(PollPhase::Cancelled);
    }
}

async fn poll_stream<S: StatusSource>(
    inner: Arc<PollerInner<S>>,
    device_id: i64,
    generation: u64,
    cancel: CancellationToken,
) {
    let mut first = true;
    loop {
        if first {
            first = false;
        } else {
            inner.phase.send_replace(PollPhase::Scheduled);
            tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                () = tokio::time::sleep(inner.config.poll_interval) => {}
            }
        }

        // Hidden view: keep the cadence but skip the fetch, so that
        // re-activation is picked up on the very next tick.
        let visible = *inner.visible.borrow();
        let always_poll = *inner.always_poll.borrow();
        if !visible && !always_poll {
            debug!(device_id, "view hidden -- heartbeat only");
            continue;
        }

        inner.phase.send_replace(PollPhase::Fetching);
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => return,
            res = inner.source.fetch_status(device_id) => res,
        };

        match result {
            Ok(payload) => {
                // A newer stream may have started while this fetch was
                // in flight; its updates win unconditionally.
                if inner.generation.load(Ordering::Acquire) != generation {
                    debug!(device_id, generation, "discarding stale snapshot");
                    return;
                }
                let snapshot = DeviceSnapshot::from(payload);
                // History first, snapshot second: subscribers reading a
                // fresh snapshot must find its samples already recorded.
                inner.history.record(&snapshot.sections, Local::now());
                inner.snapshot.send_replace(Some(Arc::new(snapshot)));
            }
            Err(e) if e.is_cancelled() => return,
            Err(e) => {
                // Transport errors are recovered by the cadence itself;
                // nothing is surfaced per-cycle.
                debug!(device_id, error = %e, "poll failed -- retrying on cadence");
            }
        }
    }
}
