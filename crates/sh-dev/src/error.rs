use bus_arbiter::BusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No device slot exists for this unit index.
    InvalidUnit(usize),
    /// A bus phase was refused or reported a failure.
    Io,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidUnit(unit) => {
                write!(f, "No sensor hub unit {}", unit)
            }
            Error::Io => write!(f, "I2C transfer failed"),
        }
    }
}

impl<E: core::fmt::Debug> From<BusError<E>> for Error {
    fn from(_: BusError<E>) -> Self {
        Error::Io
    }
}
