//! # SH1106 OLED driver
//!
//! Driver for 128x32 and 128x64 OLED panels built around the SH1106 controller, using
//! embedded_hal as abstraction layer. The driver keeps a framebuffer in memory that mirrors the
//! page organized DDRAM of the controller:
//!  - Sh1106.init() configures the controller and clears the screen
//!  - Sh1106.fill() and Sh1106.draw_pixel() change the framebuffer only
//!  - Sh1106.update() flushes the framebuffer to the display, page by page
//!
//! The bus is reached through the Sh1106Backend trait. I2C and 4-wire SPI backends are included.
//!
//! Enable the "graphics" feature to draw into the framebuffer with embedded_graphics, and the
//! "defmt" feature for debug logging.
#![cfg_attr(not(test), no_std)]

extern crate embedded_hal as hal;

use core::convert::TryFrom;

pub mod backend;
pub mod display;
pub mod dummypins;
pub mod error;
pub mod instructions;

#[cfg(feature = "graphics")]
pub mod graphics;

pub use crate::backend::{Sh1106Backend, Sh1106I2cBackend, Sh1106SpiBackend, SpiBackendError};
pub use crate::display::Sh1106;
pub use crate::error::Error;

/// width of the panel in pixels
pub const WIDTH: u8 = 128;

/// a page is a horizontal band of the display, 8 pixels high
pub const PAGE_HEIGHT: u8 = 8;

/// size of the framebuffer for the biggest supported panel (128x64)
pub const MAX_BUFFER_SIZE: usize = WIDTH as usize * 64 / PAGE_HEIGHT as usize;

/// contrast value written by Sh1106.init()
pub const DEFAULT_CONTRAST: u8 = 0x80;

/// The two panel heights the driver knows how to configure.
///
/// The height decides the multiplex ratio and the COM pad layout sent during initialization,
/// and the size of the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySize {
    /// 128x32 pixels, 4 pages
    Display128x32,
    /// 128x64 pixels, 8 pages
    Display128x64,
}

impl DisplaySize {
    pub fn width(self) -> u8 {
        WIDTH
    }

    pub fn height(self) -> u8 {
        match self {
            DisplaySize::Display128x32 => 32,
            DisplaySize::Display128x64 => 64,
        }
    }

    /// number of 8 pixel high pages
    pub fn pages(self) -> u8 {
        self.height() / PAGE_HEIGHT
    }

    /// framebuffer length in bytes: width * height / 8
    pub fn buffer_len(self) -> usize {
        WIDTH as usize * self.pages() as usize
    }
}

impl TryFrom<u8> for DisplaySize {
    type Error = u8;

    /// Only 32 and 64 pixel high panels are supported, any other height is handed back.
    fn try_from(height: u8) -> Result<Self, u8> {
        match height {
            32 => Ok(DisplaySize::Display128x32),
            64 => Ok(DisplaySize::Display128x64),
            other => Err(other),
        }
    }
}

/// Pixel color. Black is a pixel that is off, White a pixel that is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// the byte that sets all 8 pixels of a page column to this color
    pub fn fill_byte(self) -> u8 {
        match self {
            Color::Black => 0x00,
            Color::White => 0xff,
        }
    }
}
