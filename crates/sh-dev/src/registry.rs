use bus_arbiter::{BusArbiter, BusPeripheral, TransferStatus};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Instant;
use portable_atomic::{AtomicBool, Ordering};

use crate::device::{Device, Mode, MAX_UNITS};
use crate::pins::PinControl;
use crate::ready::Timeout;
use crate::{engine, Error};

/// Shared context for every hub unit on one bus.
///
/// Owns the bus arbiter and one descriptor per unit slot. Build it once (for
/// example in a `StaticCell`) and hand out [`DeviceHandle`]s with
/// [`open`](Self::open). The interrupt layer reaches it through
/// [`on_ready_edge`](Self::on_ready_edge) and
/// [`on_transfer_done`](Self::on_transfer_done).
pub struct Registry<M, B, P, const N: usize>
where
    M: RawMutex,
    B: BusPeripheral,
    P: PinControl,
{
    bus: BusArbiter<M, B>,
    devices: [Device<M, P>; N],
    initialized: AtomicBool,
}

impl<M, B, P, const N: usize> Registry<M, B, P, N>
where
    M: RawMutex,
    B: BusPeripheral,
    P: PinControl,
{
    /// Create the registry with the bus peripheral and the control pins of
    /// each unit, in unit order.
    pub fn new(peripheral: B, pins: [P; N]) -> Self {
        const { assert!(N <= MAX_UNITS, "more unit slots than bus addresses") };

        let mut unit = 0;
        let devices = pins.map(|pins| {
            let device = Device::new(unit, pins);
            unit += 1;
            device
        });

        Self {
            bus: BusArbiter::new(peripheral),
            devices,
            initialized: AtomicBool::new(false),
        }
    }

    /// Bring the shared primitives into their initial state.
    ///
    /// Only the first call has an effect; [`open`](Self::open) calls it too.
    pub fn initialize(&self) {
        if self.initialized.swap(true, Ordering::AcqRel) {
            return;
        }

        self.bus.discard_completion();
        for device in &self.devices {
            device.ready.discard_edge();
        }
        debug!("sensor hub registry initialized with {} unit(s)", N);
    }

    /// Get the handle for unit `unit`.
    ///
    /// The unit is marked as running the sensor hub application with its
    /// ready line quiescent. No pin is touched; call
    /// [`DeviceHandle::reset_normal`] to actually reset the hub.
    pub fn open(&self, unit: usize) -> Result<DeviceHandle<'_, M, B, P, N>, Error> {
        self.initialize();

        let Some(device) = self.devices.get(unit) else {
            warn!("no sensor hub unit {}", unit);
            return Err(Error::InvalidUnit(unit));
        };

        device.set_mode(Mode::Normal);
        device.ready.quiesce();

        Ok(DeviceHandle { registry: self, device })
    }

    /// Number of failed bus phases since construction.
    pub fn error_count(&self) -> u32 {
        self.bus.error_count()
    }

    /// The arbiter guarding the shared bus.
    pub fn bus(&self) -> &BusArbiter<M, B> {
        &self.bus
    }

    /// Interrupt-context handler for the active edge of a unit's ready line.
    ///
    /// Latches "data pending", records the time of the edge and wakes the
    /// task waiting on that unit. Edges for units without a slot are ignored.
    pub fn on_ready_edge(&self, unit: usize) {
        if let Some(device) = self.devices.get(unit) {
            device.ready.on_edge();
        }
    }

    /// Interrupt-context handler for the end of a bus phase.
    pub fn on_transfer_done(&self, status: TransferStatus) {
        self.bus.complete(status);
    }
}

/// Stable reference to one unit of a [`Registry`].
pub struct DeviceHandle<'a, M, B, P, const N: usize>
where
    M: RawMutex,
    B: BusPeripheral,
    P: PinControl,
{
    registry: &'a Registry<M, B, P, N>,
    device: &'a Device<M, P>,
}

impl<M, B, P, const N: usize> Clone for DeviceHandle<'_, M, B, P, N>
where
    M: RawMutex,
    B: BusPeripheral,
    P: PinControl,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, B, P, const N: usize> Copy for DeviceHandle<'_, M, B, P, N>
where
    M: RawMutex,
    B: BusPeripheral,
    P: PinControl,
{
}

impl<'a, M, B, P, const N: usize> DeviceHandle<'a, M, B, P, N>
where
    M: RawMutex,
    B: BusPeripheral,
    P: PinControl,
{
    pub fn unit(&self) -> usize {
        self.device.unit()
    }

    pub fn mode(&self) -> Mode {
        self.device.mode()
    }

    /// Bus address transfers currently go to.
    pub fn address(&self) -> u8 {
        self.device.address()
    }

    /// Reset the hub into the sensor hub application.
    ///
    /// If this future is dropped early, reset is released at once and the
    /// hub boots into the application without the full hold time.
    pub async fn reset_normal(&self) {
        self.device.enter_normal().await;
    }

    /// Reset the hub into the firmware update bootloader.
    ///
    /// Returns once the bootloader is expected to accept transfers.
    pub async fn reset_update_mode(&self) {
        self.device.enter_update_mode().await;
    }

    /// Write `send`, then read `receive.len()` bytes.
    ///
    /// Either side may be empty; with both empty this returns `Ok` without
    /// touching the bus.
    pub async fn transfer(
        &self,
        send: &[u8],
        receive: &mut [u8],
    ) -> Result<(), Error> {
        engine::transfer(&self.registry.bus, self.device, send, receive).await
    }

    /// Latched ready status: `true` when quiescent, `false` when data is
    /// pending.
    pub fn ready_status(&self) -> bool {
        self.device.ready.status()
    }

    /// Wait for the ready line to fire, at most `timeout`.
    ///
    /// Returns the latched status after waking, which on timeout may well be
    /// `true`. An edge that arrived before the call is not lost. Only one task
    /// should wait on a unit at a time.
    pub async fn wait_ready(&self, timeout: impl Into<Timeout>) -> bool {
        self.device.ready.wait(timeout.into()).await
    }

    /// Time of the most recent ready edge.
    pub fn timestamp(&self) -> Instant {
        self.device.ready.timestamp()
    }

    /// Number of ready edges seen since construction.
    pub fn sequence(&self) -> u32 {
        self.device.ready.sequence()
    }

    /// Raw level of the ready pin. Diagnostic only; use
    /// [`ready_status`](Self::ready_status) to decide whether to read.
    pub fn ready_pin_level(&self) -> bool {
        self.device.ready_pin_level()
    }
}
