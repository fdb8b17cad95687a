use core::ops::{Deref, DerefMut};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::MutexGuard;

use crate::arbiter::BusArbiter;
use crate::error::BusError;
use crate::peripheral::{BusPeripheral, Frame, TransferStatus};

/// RAII grant providing exclusive access to the bus.
///
/// Phases issued through one grant are never separated by another caller's
/// phases. Dropping the grant releases the bus.
pub struct BusGrant<'a, M: RawMutex, P: BusPeripheral> {
    peripheral: MutexGuard<'a, M, P>,
    arbiter: &'a BusArbiter<M, P>,
}

impl<'a, M: RawMutex, P: BusPeripheral> BusGrant<'a, M, P> {
    /// Create a new grant. Only called by `BusArbiter`.
    pub(crate) fn new(
        peripheral: MutexGuard<'a, M, P>,
        arbiter: &'a BusArbiter<M, P>,
    ) -> Self {
        Self { peripheral, arbiter }
    }

    /// Write `bytes` to `address` and wait for the phase to complete.
    ///
    /// Once the phase has started it cannot be cancelled: dropping this
    /// future leaves the phase running and the next [`BusArbiter::acquire`]
    /// waits for its completion.
    pub async fn write(
        &mut self,
        address: u8,
        bytes: &[u8],
        frame: Frame,
    ) -> Result<(), BusError<P::Error>> {
        self.arbiter.set_in_flight(true);
        if let Err(err) = self.peripheral.start_write(address, bytes, frame) {
            return Err(self.refused(address, err));
        }
        self.finish().await
    }

    /// Read `buffer.len()` bytes from `address` and wait for the phase to
    /// complete.
    ///
    /// `on_started` runs once the peripheral has accepted the phase and
    /// before the task goes to sleep. It does not run if the phase could not
    /// be started. `buffer` is only written when the phase succeeds.
    /// Cancellation behaves as for [`write`](Self::write).
    pub async fn read<F>(
        &mut self,
        address: u8,
        buffer: &mut [u8],
        frame: Frame,
        on_started: F,
    ) -> Result<(), BusError<P::Error>>
    where
        F: FnOnce(),
    {
        self.arbiter.set_in_flight(true);
        if let Err(err) = self.peripheral.start_read(address, buffer.len(), frame) {
            return Err(self.refused(address, err));
        }
        on_started();
        self.finish().await?;
        self.peripheral.take_read(buffer);
        Ok(())
    }

    async fn finish(&mut self) -> Result<(), BusError<P::Error>> {
        match self.arbiter.wait_done().await {
            TransferStatus::Success => Ok(()),
            TransferStatus::Error => {
                warn!("bus phase reported an error");
                Err(BusError::Io)
            }
        }
    }

    fn refused(&self, address: u8, err: P::Error) -> BusError<P::Error> {
        // No interrupt will follow a phase that never started.
        self.arbiter.set_in_flight(false);
        self.arbiter.record_error();
        error!("bus refused to start a phase at {=u8:#x}", address);
        BusError::Start(err)
    }
}

impl<M: RawMutex, P: BusPeripheral> Deref for BusGrant<'_, M, P> {
    type Target = P;

    #[inline]
    fn deref(&self) -> &P {
        &self.peripheral
    }
}

impl<M: RawMutex, P: BusPeripheral> DerefMut for BusGrant<'_, M, P> {
    #[inline]
    fn deref_mut(&mut self) -> &mut P {
        &mut self.peripheral
    }
}
