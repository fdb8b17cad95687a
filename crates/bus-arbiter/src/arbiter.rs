use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use crate::grant::BusGrant;
use crate::peripheral::{BusPeripheral, TransferStatus};

/// Owner of a bus shared by every device attached to it.
///
/// The peripheral sits behind an async mutex, so at most one task can issue
/// phases at a time and the byte sequences of two transfers never interleave.
/// The completion signal is a single latching slot: a completion raised by the
/// interrupt layer before the task starts waiting is still observed.
///
/// A phase that has been started always runs to its completion interrupt,
/// even when the task that started it is dropped. Until that completion
/// arrives the bus counts as in flight and no new grant is handed out.
pub struct BusArbiter<M: RawMutex, P: BusPeripheral> {
    peripheral: Mutex<M, P>,
    done: Signal<M, TransferStatus>,
    in_flight: AtomicBool,
    errors: AtomicU32,
}

impl<M: RawMutex, P: BusPeripheral> BusArbiter<M, P> {
    /// Create an arbiter owning `peripheral`.
    pub const fn new(peripheral: P) -> Self {
        Self {
            peripheral: Mutex::new(peripheral),
            done: Signal::new(),
            in_flight: AtomicBool::new(false),
            errors: AtomicU32::new(0),
        }
    }

    /// Wait for exclusive use of the bus.
    ///
    /// If an earlier holder was dropped with a phase still on the wire, this
    /// first waits for that phase's completion. Any completion left over from
    /// an earlier holder is discarded before the grant is handed out.
    pub async fn acquire(&self) -> BusGrant<'_, M, P> {
        let peripheral = self.peripheral.lock().await;
        while self.in_flight.load(Ordering::Acquire) {
            debug!("waiting for an abandoned phase to complete");
            self.done.wait().await;
        }
        self.done.reset();
        trace!("bus acquired");
        BusGrant::new(peripheral, self)
    }

    /// Report the outcome of the phase in flight.
    ///
    /// Called from interrupt context. Never blocks and never allocates.
    pub fn complete(&self, status: TransferStatus) {
        self.in_flight.store(false, Ordering::Release);
        if status == TransferStatus::Error {
            self.errors.fetch_add(1, Ordering::Release);
        }
        self.done.signal(status);
    }

    /// Number of failed phases since construction.
    pub fn error_count(&self) -> u32 {
        self.errors.load(Ordering::Acquire)
    }

    /// Returns `true` while a grant is alive.
    ///
    /// This is a non-blocking best-effort check using `try_lock`.
    pub fn is_busy(&self) -> bool {
        self.peripheral.try_lock().is_err()
    }

    /// Drop a completion that nobody is waiting for.
    pub fn discard_completion(&self) {
        self.done.reset();
    }

    /// Returns `true` between the start of a phase and its completion.
    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub(crate) fn set_in_flight(&self, in_flight: bool) {
        self.in_flight.store(in_flight, Ordering::Release);
    }

    pub(crate) fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Release);
    }

    pub(crate) async fn wait_done(&self) -> TransferStatus {
        self.done.wait().await
    }
}
