#![no_std]
//! Serialized access to one interrupt-driven bus shared by several devices.
//!
//! A task takes exclusive ownership of the bus with
//! [`BusArbiter::acquire`], starts one or more phases through the returned
//! [`BusGrant`], and sleeps until the interrupt layer reports the outcome with
//! [`BusArbiter::complete`]. The grant releases the bus when dropped, so every
//! exit path (including failed phases) frees it for the next caller.

mod fmt;

mod arbiter;
mod error;
mod grant;
mod peripheral;

pub use arbiter::BusArbiter;
pub use error::BusError;
pub use grant::BusGrant;
pub use peripheral::{BusPeripheral, Frame, TransferStatus};
