/// Errors that can occur while a grant drives a bus phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E: core::fmt::Debug> {
    /// The peripheral refused to start the phase.
    Start(E),
    /// The interrupt layer reported that the phase failed.
    Io,
}

impl<E: core::fmt::Debug> core::fmt::Display for BusError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BusError::Start(err) => {
                write!(f, "bus phase could not be started: {:?}", err)
            }
            BusError::Io => write!(f, "bus phase failed"),
        }
    }
}
