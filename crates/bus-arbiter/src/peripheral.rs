/// Position of a phase within a bus transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    /// Stand-alone operation, terminated with a stop condition.
    Single,
    /// Write phase of a combined transfer; no stop is generated afterwards.
    First,
    /// Read phase of a combined transfer, issued with a repeated start.
    Last,
}

/// Outcome of a phase, as reported by the interrupt layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferStatus {
    Success,
    Error,
}

/// An interrupt-driven bus controller.
///
/// Both `start_*` operations only *start* a phase and return immediately. The
/// outcome is delivered later from interrupt context through
/// [`BusArbiter::complete`](crate::BusArbiter::complete).
///
/// Implementations must not keep the slices they are given past the call:
/// the caller may be dropped while the phase is still running. Outgoing bytes
/// are copied into the controller's own buffer, and received bytes are handed
/// out through [`take_read`](Self::take_read) after a successful completion.
pub trait BusPeripheral {
    /// Error returned when a phase cannot be started.
    type Error: core::fmt::Debug;

    /// Start writing `bytes` to the 7-bit `address`.
    fn start_write(
        &mut self,
        address: u8,
        bytes: &[u8],
        frame: Frame,
    ) -> Result<(), Self::Error>;

    /// Start reading `len` bytes from the 7-bit `address`.
    fn start_read(
        &mut self,
        address: u8,
        len: usize,
        frame: Frame,
    ) -> Result<(), Self::Error>;

    /// Copy the bytes of the read phase that just completed into `buffer`.
    fn take_read(&mut self, buffer: &mut [u8]);
}
