//! # Small module to provide "fake" pins
//!
//! Some ST7789 boards come with control lines already tied in
//! hardware: chip-select strapped low on single-device buses, or
//! boards that only break out SCK/MOSI/DC. The driver still wants a
//! pin type for every line, so for a line that must never be toggled
//! you hand it a dummy.
//!
//! Just assign a line a DummyPin and it will behave as a working pin,
//! but will actually do nothing.

use hal::digital::v2::{InputPin, OutputPin};

/// Provides a dummy OutputPin.
///
/// Use this for the DC or CS argument when the corresponding line is
/// permanently wired on the board. It is also handy as the reset type
/// annotation when no reset line exists at all:
/// `None::<DummyOutputPin>`.
#[derive(Debug, Clone, Copy)]
pub struct DummyOutputPin;

impl OutputPin for DummyOutputPin {
    type Error = core::convert::Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Provides a dummy InputPin.
///
/// Useful when a pre-existing SPI abstraction demands a MISO pin. The
/// ST7789 in its usual write-only wiring has no data-out line, so we
/// feed such an API a pin which is always low.
#[derive(Debug, Clone, Copy)]
pub struct DummyInputPin;

impl InputPin for DummyInputPin {
    type Error = core::convert::Infallible;

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(true)
    }

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(false)
    }
}
