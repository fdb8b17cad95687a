//! Sanitized view of the hub's asynchronous ready (INTN) line.
//!
//! The physical line is only released some time after the host has read the
//! pending data, so polling it right after a read reports a second, bogus
//! "data ready". The driver therefore keeps a software latch instead:
//!
//! * the edge interrupt sets it to *pending* (`false`),
//! * a receive phase that has been accepted by the bus sets it back to
//!   *quiescent* (`true`), as does either reset sequence.
//!
//! Nothing else writes it.

use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Timer};
use portable_atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// How long to wait for the ready line when the caller has no better bound.
pub const MAX_WAIT_FOR_DATA: Duration = Duration::from_millis(200);

/// Bound for [`DeviceHandle::wait_ready`](crate::DeviceHandle::wait_ready).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timeout {
    /// Block until the ready line fires.
    Forever,
    /// Give up after this long.
    After(Duration),
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        Timeout::After(duration)
    }
}

pub(crate) struct ReadyLatch<M: RawMutex> {
    quiescent: AtomicBool,
    edge: Signal<M, ()>,
    timestamp: AtomicU64,
    sequence: AtomicU32,
}

impl<M: RawMutex> ReadyLatch<M> {
    pub(crate) const fn new() -> Self {
        Self {
            quiescent: AtomicBool::new(true),
            edge: Signal::new(),
            timestamp: AtomicU64::new(0),
            sequence: AtomicU32::new(0),
        }
    }

    /// Interrupt-context handler for the active edge of the ready line.
    pub(crate) fn on_edge(&self) {
        self.timestamp
            .store(Instant::now().as_ticks(), Ordering::Relaxed);
        self.sequence.fetch_add(1, Ordering::Relaxed);
        self.quiescent.store(false, Ordering::Release);
        self.edge.signal(());
    }

    pub(crate) fn quiesce(&self) {
        self.quiescent.store(true, Ordering::Release);
    }

    pub(crate) fn status(&self) -> bool {
        self.quiescent.load(Ordering::Acquire)
    }

    /// Sleep until an edge has been latched or `timeout` expires, then report
    /// the latch as it is at that moment.
    pub(crate) async fn wait(&self, timeout: Timeout) -> bool {
        match timeout {
            Timeout::Forever => self.edge.wait().await,
            Timeout::After(duration) => {
                let _ = select(self.edge.wait(), Timer::after(duration)).await;
            }
        }
        self.status()
    }

    pub(crate) fn timestamp(&self) -> Instant {
        Instant::from_ticks(self.timestamp.load(Ordering::Relaxed))
    }

    pub(crate) fn sequence(&self) -> u32 {
        self.sequence.load(Ordering::Relaxed)
    }

    /// Forget an edge latched before anyone could care about it.
    pub(crate) fn discard_edge(&self) {
        self.edge.reset();
    }
}
