//! # Small module to provide "fake" pins
//!
//! Many SH1106 modules with a SPI interface have chip select tied to ground, some even DC. The
//! SPI backend still wants a pin for those, assign a DummyOutputPin and it will behave as a
//! working pin, but will actually do nothing.

use hal::digital::v2::OutputPin;

/// provides a dummy OutputPin.
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
