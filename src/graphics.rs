//! Graphics support for the SH1106
//!
//! This module is behind a feature flag. Enable it in your Cargo.toml with feature flag
//! "graphics".
//!
//! It implements the embedded_graphics DrawTarget trait on top of the framebuffer, so everything
//! the embedded_graphics library can draw (lines, circles, text, bitmaps) ends up in the
//! framebuffer. Drawing never talks to the display, the typical workflow is:
//!  - clear the framebuffer with Sh1106.clear() or Sh1106.fill()
//!  - draw "stuff" into the framebuffer
//!  - Sh1106.update() the framebuffer to the display, it now gets visible
use core::convert::{Infallible, TryInto};

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
    Pixel,
};

use crate::{backend::Sh1106Backend, display::Sh1106, Color, WIDTH};

impl From<BinaryColor> for Color {
    fn from(color: BinaryColor) -> Color {
        match color {
            BinaryColor::On => Color::White,
            BinaryColor::Off => Color::Black,
        }
    }
}

impl<Backend> DrawTarget for Sh1106<Backend>
where
    Backend: Sh1106Backend,
{
    type Color = BinaryColor;
    type Error = Infallible;

    // pixels outside of the panel are dropped
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let height = self.display_size().height() as u32;
        for Pixel(coord, color) in pixels {
            let position: Result<(u32, u32), _> = coord.try_into();
            if let Ok((x, y)) = position {
                if x < WIDTH as u32 && y < height {
                    self.set_pixel(x, y, color.into());
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: BinaryColor) -> Result<(), Self::Error> {
        self.fill(color.into());
        Ok(())
    }
}

impl<Backend> OriginDimensions for Sh1106<Backend>
where
    Backend: Sh1106Backend,
{
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, self.display_size().height() as u32)
    }
}
