//! Buffered display for the badge panel.
//!
//! The e-paper module is native 128x296 portrait but mounted landscape.
//! The UI draws in landscape (296x128) and coordinates are transposed into
//! the panel's native packing, then the whole buffer goes out in one
//! update.

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Simple frame buffer display in the panel's native packing.
pub struct BufferedDisplay {
    buffer: Vec<u8>,
}

impl BufferedDisplay {
    /// Native panel dimensions (128x296 portrait).
    const NATIVE_WIDTH_BYTES: usize = 16; // 128 / 8
    const NATIVE_HEIGHT: usize = 296;

    /// Landscape dimensions (what the UI sees).
    const LANDSCAPE_WIDTH: u32 = inkbadge_ui::DISPLAY_WIDTH;
    const LANDSCAPE_HEIGHT: u32 = inkbadge_ui::DISPLAY_HEIGHT;

    const BUFFER_SIZE: usize = Self::NATIVE_WIDTH_BYTES * Self::NATIVE_HEIGHT;

    /// Create new buffered display
    pub fn new() -> Self {
        Self {
            buffer: vec![0xFF; Self::BUFFER_SIZE], // White by default
        }
    }

    /// Clear buffer to white
    pub fn clear(&mut self) {
        self.buffer.fill(0xFF);
    }

    /// Set a pixel in landscape coordinates (x: 0-295, y: 0-127).
    /// Transposes to the native portrait orientation:
    /// x' = y, y' = (W - 1) - x.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        if x >= Self::LANDSCAPE_WIDTH || y >= Self::LANDSCAPE_HEIGHT {
            return;
        }

        let native_x = y;
        let native_y = (Self::LANDSCAPE_WIDTH - 1) - x;

        let byte_index = (native_y as usize * Self::NATIVE_WIDTH_BYTES) + (native_x as usize / 8);
        let bit_index = 7 - (native_x % 8); // MSB first

        if byte_index < self.buffer.len() {
            if color == BinaryColor::On {
                // Black: clear bit
                self.buffer[byte_index] &= !(1 << bit_index);
            } else {
                // White: set bit
                self.buffer[byte_index] |= 1 << bit_index;
            }
        }
    }

    /// Raw buffer in native orientation for the panel driver
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }
}

impl DrawTarget for BufferedDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.y >= 0 {
                self.set_pixel(point.x as u32, point.y as u32, color);
            }
        }
        Ok(())
    }
}

impl OriginDimensions for BufferedDisplay {
    fn size(&self) -> Size {
        Size::new(Self::LANDSCAPE_WIDTH, Self::LANDSCAPE_HEIGHT)
    }
}

impl Default for BufferedDisplay {
    fn default() -> Self {
        Self::new()
    }
}
