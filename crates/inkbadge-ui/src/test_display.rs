//! Test display that allows pixel overdraw.
//!
//! `MockDisplay` from embedded-graphics panics when a pixel is drawn twice,
//! which doesn't work for a renderer that clears backgrounds then draws on
//! top. This simple framebuffer display allows overdraw and exposes pixel
//! readback so tests can assert what ended up on screen.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Simple framebuffer display for tests that allows overdraw.
pub struct TestDisplay {
    pixels: Vec<BinaryColor>,
    width: u32,
    height: u32,
}

impl TestDisplay {
    /// Create a new test display with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![BinaryColor::Off; (width * height) as usize],
            width,
            height,
        }
    }

    /// Create a display matching the badge canvas (296x128).
    pub fn default_size() -> Self {
        Self::new(crate::DISPLAY_WIDTH, crate::DISPLAY_HEIGHT)
    }

    /// Color at a pixel; out-of-range reads as Off.
    pub fn pixel(&self, x: u32, y: u32) -> BinaryColor {
        if x >= self.width || y >= self.height {
            return BinaryColor::Off;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Raw framebuffer, row-major.
    pub fn pixels(&self) -> &[BinaryColor] {
        &self.pixels
    }

    /// Count of pixels currently set to On.
    pub fn on_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|color| **color == BinaryColor::On)
            .count()
    }
}

impl DrawTarget for TestDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as u32) < self.width
                && (coord.y as u32) < self.height
            {
                let idx = (coord.y as u32 * self.width + coord.x as u32) as usize;
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for TestDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
