#![cfg_attr(not(test), no_std)]
#![doc = include_str!("../README.md")]

mod fmt;

mod device;
mod engine;
mod error;
mod pins;
mod ready;
mod registry;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub use bus_arbiter::{BusArbiter, BusPeripheral, Frame, TransferStatus};
pub use device::{bus_address, Mode, BOOTLOADER_READY, MAX_UNITS, RESET_HOLD};
pub use error::Error;
pub use pins::{HalPins, PinControl};
pub use ready::{Timeout, MAX_WAIT_FOR_DATA};
pub use registry::{DeviceHandle, Registry};

/// Registry shared between tasks and interrupt handlers.
pub type SensorHub<B, P, const N: usize> =
    Registry<CriticalSectionRawMutex, B, P, N>;

/// Handle to one unit of a [`SensorHub`].
pub type SensorHubHandle<'a, B, P, const N: usize> =
    DeviceHandle<'a, CriticalSectionRawMutex, B, P, N>;
