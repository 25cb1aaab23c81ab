//! # Main driver for the SH1106
//!
//! This module exports the Sh1106 struct, which owns the bus backend and the framebuffer.
//!
//! The framebuffer uses the layout of the SH1106 DDRAM: one byte is a vertical strip of 8
//! pixels within a page, bit 0 being the top pixel. Byte `x + page * WIDTH` holds column x of
//! that page.
//!
//! Typically you want to look into the following functions:
//!  - Sh1106.new() to create a new driver instance
//!  - Sh1106.init() to configure the controller and clear the screen
//!  - Sh1106.fill() and Sh1106.draw_pixel() to draw into the framebuffer
//!  - Sh1106.update() to make the framebuffer visible
//!
//! All functions talking to the bus stop at the first failing transfer and return its error.
//! Nothing is rolled back: a failed init leaves the controller partially configured, a failed
//! update leaves the pages that were already sent on the screen.
use core::convert::TryFrom;

use crate::{
    backend::Sh1106Backend,
    error::Error,
    instructions::{init_sequence, prelude::*},
    Color, DisplaySize, DEFAULT_CONTRAST, MAX_BUFFER_SIZE, PAGE_HEIGHT, WIDTH,
};

/// main struct for state keeping of the SH1106 driver
pub struct Sh1106<Backend> {
    backend: Backend,
    size: DisplaySize,
    column_offset: u8,
    // only the first size.buffer_len() bytes are used
    framebuffer: [u8; MAX_BUFFER_SIZE],
}

impl<Backend> Sh1106<Backend>
where
    Backend: Sh1106Backend,
{
    /// Create a new instance of the SH1106 driver
    ///
    /// No bytes are sent to the display, call init() before the first update().
    pub fn new(backend: Backend, size: DisplaySize) -> Sh1106<Backend> {
        Sh1106 {
            backend,
            size,
            column_offset: 0,
            framebuffer: [0u8; MAX_BUFFER_SIZE],
        }
    }

    /// Create a new instance for a panel of the given height in pixels.
    ///
    /// Fails with Error::UnsupportedHeight unless the height is 32 or 64.
    pub fn with_height(
        backend: Backend,
        height: u8,
    ) -> Result<Sh1106<Backend>, Error<Backend::Error>> {
        let size = DisplaySize::try_from(height).map_err(Error::UnsupportedHeight)?;
        Ok(Self::new(backend, size))
    }

    /// Set the first DDRAM column used by update().
    ///
    /// The SH1106 has 132 columns of DDRAM. Many 128 pixel wide modules are wired starting at
    /// column 2, on those the image appears shifted unless the offset is set to 2.
    pub fn with_column_offset(mut self, column_offset: u8) -> Sh1106<Backend> {
        self.column_offset = column_offset;
        self
    }

    /// Send the configuration sequence, set the default contrast and clear the screen.
    ///
    /// The framebuffer is cleared as well.
    pub fn init(&mut self) -> Result<(), Error<Backend::Error>> {
        for command in init_sequence(self.size).iter() {
            self.write_command(*command)?;
        }
        self.set_contrast(DEFAULT_CONTRAST)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("sh1106: initialised {}x{}", WIDTH, self.size.height());

        self.fill(Color::Black);
        self.update()
    }

    /// Send a single command byte to the SH1106.
    pub fn send_command(&mut self, command: u8) -> Result<(), Error<Backend::Error>> {
        self.backend.write(false, &[command])?;
        Ok(())
    }

    /// Send a buffer of data to the SH1106 DDRAM, at the current page and column.
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), Error<Backend::Error>> {
        self.backend.write(true, data)?;
        Ok(())
    }

    /// Send a command from the Command enum, with its argument byte if it has one.
    ///
    /// Opcode and argument are sent as two separate command transfers.
    pub fn write_command(&mut self, command: Command) -> Result<(), Error<Backend::Error>> {
        self.send_command(command.opcode())?;
        if let Some(argument) = command.argument() {
            self.send_command(argument)?;
        }
        Ok(())
    }

    /// Set the contrast, 0 is the dimmest and 255 the brightest.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<Backend::Error>> {
        self.write_command(Contrast(contrast))
    }

    /// Turn the panel on, or put it to sleep. DDRAM content is kept while sleeping.
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<Backend::Error>> {
        self.write_command(DisplayOn(on))
    }

    /// Invert the display, set bits in the DDRAM become dark pixels.
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), Error<Backend::Error>> {
        self.write_command(Inverted(inverted))
    }

    /// Set every pixel of the framebuffer to color. The display is not touched.
    pub fn fill(&mut self, color: Color) {
        let len = self.size.buffer_len();
        for byte in self.framebuffer[..len].iter_mut() {
            *byte = color.fill_byte();
        }
    }

    /// Transfer the framebuffer to the SH1106 DDRAM, page by page.
    ///
    /// Every page is addressed with its page number and the first column, then WIDTH bytes of
    /// data are sent.
    pub fn update(&mut self) -> Result<(), Error<Backend::Error>> {
        let width = WIDTH as usize;
        let mut page_data = [0u8; WIDTH as usize];
        for page in 0..self.size.pages() {
            self.write_command(PageAddress(page))?;
            self.write_command(ColumnAddressLow(self.column_offset))?;
            self.write_command(ColumnAddressHigh(self.column_offset))?;

            let start = page as usize * width;
            page_data.copy_from_slice(&self.framebuffer[start..start + width]);
            self.send_data(&page_data)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("sh1106: flushed {} pages", self.size.pages());

        Ok(())
    }

    /// Set the pixel at x, y in the framebuffer to color.
    ///
    /// Fails with Error::OutOfBounds if the pixel is not on the panel, the framebuffer is then
    /// left as it was. Call update() to make the change visible.
    pub fn draw_pixel(
        &mut self,
        x: u32,
        y: u32,
        color: Color,
    ) -> Result<(), Error<Backend::Error>> {
        if x >= WIDTH as u32 || y >= self.size.height() as u32 {
            #[cfg(feature = "defmt")]
            defmt::warn!("sh1106: pixel ({}, {}) out of bounds", x, y);

            return Err(Error::OutOfBounds { x, y });
        }
        self.set_pixel(x, y, color);
        Ok(())
    }

    // x and y have to be checked by the caller
    pub(crate) fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let index = (x + (y / PAGE_HEIGHT as u32) * WIDTH as u32) as usize;
        let mask: u8 = 1 << (y % PAGE_HEIGHT as u32);
        match color {
            Color::White => self.framebuffer[index] |= mask,
            Color::Black => self.framebuffer[index] &= !mask,
        }
    }

    /// The framebuffer, exactly WIDTH * height / 8 bytes.
    pub fn buffer(&self) -> &[u8] {
        &self.framebuffer[..self.size.buffer_len()]
    }

    pub fn display_size(&self) -> DisplaySize {
        self.size
    }

    /// Destroy the driver and give back the backend
    pub fn release(self) -> Backend {
        self.backend
    }
}
