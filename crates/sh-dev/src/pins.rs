use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// Board-specific control lines of one sensor hub.
///
/// The driver only ever calls these three operations; electrical details
/// (polarity, drive strength, pull-ups) belong to the implementation.
pub trait PinControl {
    /// Select what the hub boots into when reset is released: the sensor hub
    /// application (`true`) or the firmware update bootloader (`false`).
    fn set_boot_target(&mut self, application: bool);

    /// Hold the hub in reset (`true`) or let it run (`false`).
    fn set_reset(&mut self, asserted: bool);

    /// Raw level of the ready line, `true` when high (deasserted).
    fn read_ready_pin(&mut self) -> bool;
}

/// [`PinControl`] over `embedded-hal` pins wired to the active-low RSTN,
/// BOOTN and INTN lines of the hub.
///
/// Pin errors are ignored: the reset sequence has no failure path, and a ready
/// line that cannot be read is reported as deasserted.
pub struct HalPins<RST, BOOT, INT> {
    rstn: RST,
    bootn: BOOT,
    intn: INT,
}

impl<RST, BOOT, INT> HalPins<RST, BOOT, INT>
where
    RST: OutputPin,
    BOOT: OutputPin,
    INT: InputPin,
{
    pub fn new(rstn: RST, bootn: BOOT, intn: INT) -> Self {
        Self { rstn, bootn, intn }
    }

    /// Give the pins back.
    pub fn release(self) -> (RST, BOOT, INT) {
        (self.rstn, self.bootn, self.intn)
    }
}

impl<RST, BOOT, INT> PinControl for HalPins<RST, BOOT, INT>
where
    RST: OutputPin,
    BOOT: OutputPin,
    INT: InputPin,
{
    fn set_boot_target(&mut self, application: bool) {
        let _ = self.bootn.set_state(PinState::from(application));
    }

    fn set_reset(&mut self, asserted: bool) {
        let _ = self.rstn.set_state(PinState::from(!asserted));
    }

    fn read_ready_pin(&mut self) -> bool {
        self.intn.is_high().unwrap_or(true)
    }
}
