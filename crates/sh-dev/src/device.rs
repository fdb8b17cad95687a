use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_time::{Duration, Timer};
use portable_atomic::{AtomicBool, Ordering};

use crate::pins::PinControl;
use crate::ready::ReadyLatch;

/// Number of hub units the address table can serve.
pub const MAX_UNITS: usize = 2;

/// How long reset is held asserted before it is released.
pub const RESET_HOLD: Duration = Duration::from_millis(10);

/// How long the update bootloader needs after reset before it answers.
pub const BOOTLOADER_READY: Duration = Duration::from_millis(200);

/// 7-bit bus addresses, indexed by unit then by [`Mode`].
const BUS_ADDRESSES: [[u8; 2]; MAX_UNITS] = [
    // Normal, UpdateMode
    [0x48, 0x28],
    [0x49, 0x29],
];

/// What the hub is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// The sensor hub application.
    Normal,
    /// The firmware update bootloader.
    UpdateMode,
}

impl Mode {
    const fn index(self) -> usize {
        match self {
            Mode::Normal => 0,
            Mode::UpdateMode => 1,
        }
    }
}

/// Bus address a unit answers on in the given mode, or `None` when the unit
/// has no address.
pub const fn bus_address(unit: usize, mode: Mode) -> Option<u8> {
    if unit < MAX_UNITS {
        Some(BUS_ADDRESSES[unit][mode.index()])
    } else {
        None
    }
}

/// Descriptor of one hub unit. Lives as long as the registry that owns it.
pub(crate) struct Device<M: RawMutex, P: PinControl> {
    unit: usize,
    update_mode: AtomicBool,
    pins: BlockingMutex<M, RefCell<P>>,
    pub(crate) ready: ReadyLatch<M>,
}

impl<M: RawMutex, P: PinControl> Device<M, P> {
    /// `unit` must be below [`MAX_UNITS`]; the registry guarantees it.
    pub(crate) fn new(unit: usize, pins: P) -> Self {
        Self {
            unit,
            update_mode: AtomicBool::new(false),
            pins: BlockingMutex::new(RefCell::new(pins)),
            ready: ReadyLatch::new(),
        }
    }

    pub(crate) fn unit(&self) -> usize {
        self.unit
    }

    pub(crate) fn mode(&self) -> Mode {
        if self.update_mode.load(Ordering::Acquire) {
            Mode::UpdateMode
        } else {
            Mode::Normal
        }
    }

    pub(crate) fn set_mode(&self, mode: Mode) {
        self.update_mode
            .store(mode == Mode::UpdateMode, Ordering::Release);
    }

    pub(crate) fn address(&self) -> u8 {
        BUS_ADDRESSES[self.unit][self.mode().index()]
    }

    /// Reset into the sensor hub application.
    pub(crate) async fn enter_normal(&self) {
        self.reset_into(Mode::Normal).await;
    }

    /// Reset into the update bootloader and give it time to come up.
    pub(crate) async fn enter_update_mode(&self) {
        self.reset_into(Mode::UpdateMode).await;
        Timer::after(BOOTLOADER_READY).await;
    }

    async fn reset_into(&self, mode: Mode) {
        info!("resetting unit {} into {:?}", self.unit, mode);
        self.set_mode(mode);

        self.with_pins(|pins| {
            pins.set_reset(true);
            pins.set_boot_target(mode == Mode::Normal);
        });
        let hold = ResetHold { device: self };
        self.ready.quiesce();

        Timer::after(RESET_HOLD).await;

        drop(hold);
    }

    pub(crate) fn ready_pin_level(&self) -> bool {
        self.with_pins(|pins| pins.read_ready_pin())
    }

    fn with_pins<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        self.pins.lock(|pins| f(&mut *pins.borrow_mut()))
    }
}

/// Releases reset when dropped, so a cancelled reset never leaves the hub
/// held in reset. The hub then boots into the target already selected.
struct ResetHold<'a, M: RawMutex, P: PinControl> {
    device: &'a Device<M, P>,
}

impl<M: RawMutex, P: PinControl> Drop for ResetHold<'_, M, P> {
    fn drop(&mut self) {
        self.device.with_pins(|pins| pins.set_reset(false));
    }
}
