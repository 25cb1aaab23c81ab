//! # Bus backends for the SH1106
//!
//! The driver only needs to push bytes to the controller, tagged as either command or data. How
//! that tag travels depends on the bus:
//!  - I2C: every write starts with a control byte, 0x00 for commands and 0x40 for data
//!  - 4-wire SPI: the DC pin is low for commands and high for data
use hal::{blocking, digital::v2::OutputPin};

use crate::WIDTH;

/// A bus the SH1106 is connected to.
///
/// `data` tells whether the bytes are display data (true) or commands (false).
/// Return `nb::Error::WouldBlock` when the bus can not take the transfer right now, the driver
/// reports it to the caller as busy.
///
/// One call is one logical transfer, a backend may still split it on the wire. The I2C backend
/// sends at most a page (128 bytes) per bus transaction and sends nothing at all for an empty
/// `bytes` slice.
pub trait Sh1106Backend {
    type Error;
    fn write(&mut self, data: bool, bytes: &[u8]) -> nb::Result<(), Self::Error>;
}

/// default I2C address of SH1106 modules, 0x3D if the SA0 pin is pulled high
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3c;

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

pub struct Sh1106I2cBackend<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, ERR> Sh1106I2cBackend<I2C>
where
    I2C: blocking::i2c::Write<Error = ERR>,
{
    /// Backend for a module at the default address 0x3C
    pub fn new(i2c: I2C) -> Sh1106I2cBackend<I2C> {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Sh1106I2cBackend<I2C> {
        Sh1106I2cBackend { i2c, address }
    }

    /// gives back the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, ERR> Sh1106Backend for Sh1106I2cBackend<I2C>
where
    I2C: blocking::i2c::Write<Error = ERR>,
{
    type Error = ERR;

    // Each write needs the control byte in front, so data is copied into a page sized stack
    // buffer. A page of data goes out in a single I2C transaction.
    fn write(&mut self, data: bool, bytes: &[u8]) -> nb::Result<(), ERR> {
        let mut buffer = [0u8; WIDTH as usize + 1];
        buffer[0] = if data { CONTROL_DATA } else { CONTROL_COMMAND };
        for chunk in bytes.chunks(WIDTH as usize) {
            buffer[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(self.address, &buffer[..=chunk.len()])
                .map_err(nb::Error::Other)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiBackendError<PinErr, SpiErr> {
    Pin(PinErr),
    Spi(SpiErr),
}

pub struct Sh1106SpiBackend<SPI, DC, CS>
where
    SPI: blocking::spi::Write<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC, CS, PinErr, SpiErr> Sh1106SpiBackend<SPI, DC, CS>
where
    SPI: blocking::spi::Write<u8, Error = SpiErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
{
    /// Chip select is active low, it is released right away.
    /// Use a DummyOutputPin when CS is tied to ground.
    pub fn new(spi: SPI, dc: DC, mut cs: CS) -> Result<Sh1106SpiBackend<SPI, DC, CS>, PinErr> {
        cs.set_high()?;
        Ok(Sh1106SpiBackend { spi, dc, cs })
    }

    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }
}

impl<SPI, DC, CS, PinErr, SpiErr> Sh1106Backend for Sh1106SpiBackend<SPI, DC, CS>
where
    SPI: blocking::spi::Write<u8, Error = SpiErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
{
    type Error = SpiBackendError<PinErr, SpiErr>;

    fn write(&mut self, data: bool, bytes: &[u8]) -> nb::Result<(), Self::Error> {
        if data {
            self.dc.set_high().map_err(SpiBackendError::Pin)?;
        } else {
            self.dc.set_low().map_err(SpiBackendError::Pin)?;
        }
        self.cs.set_low().map_err(SpiBackendError::Pin)?;
        // release chip select even when the transfer failed
        let written = self.spi.write(bytes).map_err(SpiBackendError::Spi);
        let released = self.cs.set_high().map_err(SpiBackendError::Pin);
        written?;
        released?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dummypins::DummyOutputPin;
    use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction as PinTransaction};
    use embedded_hal_mock::spi::{Mock as SpiMock, Transaction as SpiTransaction};
    use embedded_hal_mock::MockError;
    use std::io::ErrorKind;

    #[test]
    fn i2c_command_gets_control_byte() {
        let expectations = [I2cTransaction::write(0x3c, vec![0x00, 0xaf])];
        let mut backend = Sh1106I2cBackend::new(I2cMock::new(&expectations));
        backend.write(false, &[0xaf]).unwrap();
        backend.release().done();
    }

    #[test]
    fn i2c_page_of_data_is_one_transaction() {
        let page = [0x5au8; 128];
        let mut expected = vec![0x40];
        expected.extend_from_slice(&page);
        let expectations = [I2cTransaction::write(0x3d, expected)];
        let mut backend = Sh1106I2cBackend::with_address(I2cMock::new(&expectations), 0x3d);
        backend.write(true, &page).unwrap();
        backend.release().done();
    }

    #[test]
    fn i2c_long_data_is_split_per_page() {
        let data = [0x01u8; 130];
        let mut first = vec![0x40];
        first.extend_from_slice(&data[..128]);
        let expectations = [
            I2cTransaction::write(0x3c, first),
            I2cTransaction::write(0x3c, vec![0x40, 0x01, 0x01]),
        ];
        let mut backend = Sh1106I2cBackend::new(I2cMock::new(&expectations));
        backend.write(true, &data).unwrap();
        backend.release().done();
    }

    #[test]
    fn i2c_error_is_passed_on() {
        let expectations = [I2cTransaction::write(0x3c, vec![0x00, 0xae])
            .with_error(MockError::Io(ErrorKind::Other))];
        let mut backend = Sh1106I2cBackend::new(I2cMock::new(&expectations));
        match backend.write(false, &[0xae]) {
            Err(nb::Error::Other(MockError::Io(ErrorKind::Other))) => {}
            other => panic!("unexpected result {:?}", other),
        }
        backend.release().done();
    }

    #[test]
    fn spi_command_drives_dc_low() {
        let spi = SpiMock::new(&[SpiTransaction::write(vec![0xa6])]);
        let dc = PinMock::new(&[PinTransaction::set(State::Low)]);
        let cs = PinMock::new(&[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut backend = Sh1106SpiBackend::new(spi, dc, cs).unwrap();
        backend.write(false, &[0xa6]).unwrap();
        let (mut spi, mut dc, mut cs) = backend.release();
        spi.done();
        dc.done();
        cs.done();
    }

    #[test]
    fn spi_data_drives_dc_high() {
        let spi = SpiMock::new(&[SpiTransaction::write(vec![0xff, 0x00, 0x81])]);
        let dc = PinMock::new(&[PinTransaction::set(State::High)]);
        let cs = PinMock::new(&[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut backend = Sh1106SpiBackend::new(spi, dc, cs).unwrap();
        backend.write(true, &[0xff, 0x00, 0x81]).unwrap();
        let (mut spi, mut dc, mut cs) = backend.release();
        spi.done();
        dc.done();
        cs.done();
    }

    #[test]
    fn i2c_empty_write_sends_nothing() {
        let mut backend = Sh1106I2cBackend::new(I2cMock::new(&[]));
        backend.write(true, &[]).unwrap();
        backend.release().done();
    }

    struct FailingSpi;

    impl blocking::spi::Write<u8> for FailingSpi {
        type Error = ();

        fn write(&mut self, _words: &[u8]) -> Result<(), ()> {
            Err(())
        }
    }

    #[test]
    fn spi_error_releases_chip_select() {
        let dc = PinMock::new(&[PinTransaction::set(State::Low)]);
        let cs = PinMock::new(&[
            PinTransaction::set(State::High),
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut backend = Sh1106SpiBackend::new(FailingSpi, dc, cs).unwrap();
        match backend.write(false, &[0xaf]) {
            Err(nb::Error::Other(SpiBackendError::Spi(()))) => {}
            other => panic!("unexpected result {:?}", other),
        }
        let (_, mut dc, mut cs) = backend.release();
        dc.done();
        cs.done();
    }

    #[test]
    fn spi_with_tied_pins() {
        let spi = SpiMock::new(&[SpiTransaction::write(vec![0xb3])]);
        let mut backend = Sh1106SpiBackend::new(spi, DummyOutputPin, DummyOutputPin).unwrap();
        backend.write(false, &[0xb3]).unwrap();
        let (mut spi, _, _) = backend.release();
        spi.done();
    }
}
