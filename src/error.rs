//! Error type of the SH1106 driver

/// Errors returned by the driver.
///
/// `BusErr` is the error type of the backend. Bus failures are passed on as they are, the driver
/// never retries a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<BusErr> {
    /// the backend failed to transfer a command or data
    Bus(BusErr),
    /// the backend could not take the transfer right now, the operation may be retried
    Busy,
    /// pixel coordinate outside of the panel, the framebuffer was not touched
    OutOfBounds { x: u32, y: u32 },
    /// only 32 and 64 pixel high panels can be configured
    UnsupportedHeight(u8),
}

impl<BusErr> From<nb::Error<BusErr>> for Error<BusErr> {
    fn from(error: nb::Error<BusErr>) -> Self {
        match error {
            nb::Error::WouldBlock => Error::Busy,
            nb::Error::Other(e) => Error::Bus(e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<BusErr> defmt::Format for Error<BusErr> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Bus(_e) => defmt::write!(f, "Bus error"),
            Error::Busy => defmt::write!(f, "Bus busy"),
            Error::OutOfBounds { x, y } => defmt::write!(f, "Pixel ({}, {}) out of bounds", x, y),
            Error::UnsupportedHeight(height) => {
                defmt::write!(f, "Unsupported display height {}", height)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn would_block_is_busy() {
        let error: Error<()> = nb::Error::WouldBlock.into();
        assert_eq!(error, Error::Busy);
    }

    #[test]
    fn other_is_bus_error() {
        let error: Error<u8> = nb::Error::Other(7).into();
        assert_eq!(error, Error::Bus(7));
    }
}
