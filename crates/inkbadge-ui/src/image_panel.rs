//! Badge image handling for the right-hand panel.
//!
//! An image is paired with a badge by base filename: `crew.txt` looks for
//! `crew.jpg` first, then `crew.png`. Whatever goes wrong (no file, short
//! read, decoder rejection, absurd dimensions) the panel keeps its plain
//! background; image problems are never surfaced to the wearer.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

#[cfg(feature = "std")]
use alloc::format;

#[cfg(feature = "std")]
use crate::badge::BADGE_DIR;
#[cfg(feature = "std")]
use crate::filesystem::{join_path, FileSystem};

/// Accepted image extensions, in priority order.
pub const IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Upper bound on the encoded file size worth feeding to a decoder.
pub const MAX_IMAGE_BYTES: usize = 192 * 1024;

/// Upper bound on decoded dimensions. The panel is 104x128; anything far
/// beyond that would only be decoded to be thrown away.
pub const MAX_IMAGE_PIXELS: u32 = 64 * 1024;

/// Luma cutoff between ink and background.
const LUMA_THRESHOLD: u8 = 128;

/// Why a badge image could not be used. Every variant is recovered
/// silently; the classification exists so the fail-soft policy is a branch,
/// not an accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoadError {
    /// No image file shares the badge's base filename.
    NotFound,
    /// The file exists but could not be read.
    Io,
    /// The decoder rejected the data.
    Decode,
    /// Encoded or decoded size exceeds the panel budget.
    TooLarge,
}

impl core::fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImageLoadError::NotFound => write!(f, "no paired image file"),
            ImageLoadError::Io => write!(f, "image file unreadable"),
            ImageLoadError::Decode => write!(f, "image decode failed"),
            ImageLoadError::TooLarge => write!(f, "image exceeds size budget"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ImageLoadError {}

/// A decoded badge image, thresholded to one bit per pixel.
///
/// Rows are packed MSB-first. Instances live for a single frame: the draw
/// path builds one, blits it, and drops it before the next wake so decode
/// buffers never pile up between frames.
#[derive(Debug)]
pub struct PanelImage {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl PanelImage {
    /// Allocate an all-background image. `None` when the dimensions exceed
    /// the panel budget.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 || width.saturating_mul(height) > MAX_IMAGE_PIXELS {
            return None;
        }
        let row_bytes = (width as usize).div_ceil(8);
        Some(Self {
            width,
            height,
            bits: vec![0; row_bytes * height as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn row_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    /// Mark a pixel as ink (dark) or background.
    pub fn set_pixel(&mut self, x: u32, y: u32, dark: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.row_bytes() + (x / 8) as usize;
        let bit = 7 - (x % 8); // MSB first
        if dark {
            self.bits[idx] |= 1 << bit;
        } else {
            self.bits[idx] &= !(1 << bit);
        }
    }

    /// Whether the pixel is ink.
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = y as usize * self.row_bytes() + (x / 8) as usize;
        let bit = 7 - (x % 8);
        (self.bits[idx] >> bit) & 1 == 1
    }

    /// Blit ink pixels at 1:1, anchored at `origin` and clipped to `clip`.
    /// Background pixels are skipped; the panel rectangle underneath is
    /// already filled.
    pub fn draw<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        origin: Point,
        clip: Size,
    ) -> Result<(), D::Error> {
        let w = self.width.min(clip.width);
        let h = self.height.min(clip.height);
        let mut pixels = Vec::new();
        for y in 0..h {
            for x in 0..w {
                if self.pixel(x, y) {
                    pixels.push(Pixel(
                        origin + Point::new(x as i32, y as i32),
                        BinaryColor::On,
                    ));
                }
            }
        }
        display.draw_iter(pixels)
    }
}

/// Find and decode the image paired with a badge file stem.
///
/// Tries each extension in priority order and commits to the first path
/// that exists, exactly like the original lookup: a corrupt `.jpg` does not
/// fall through to a `.png` beside it.
#[cfg(feature = "std")]
pub fn load_badge_image(
    fs: &mut impl FileSystem,
    stem: &str,
) -> Result<PanelImage, ImageLoadError> {
    for ext in IMAGE_EXTENSIONS {
        let path = join_path(BADGE_DIR, &format!("{}.{}", stem, ext));
        if !fs.exists(&path) {
            continue;
        }
        // Tight scope: encoded bytes and decoder output are both dropped
        // before this returns, leaving only the packed panel bitmap.
        let bytes = fs.read_bytes(&path).map_err(|_| ImageLoadError::Io)?;
        return decode_to_panel(&bytes);
    }
    Err(ImageLoadError::NotFound)
}

#[cfg(feature = "std")]
fn decode_to_panel(bytes: &[u8]) -> Result<PanelImage, ImageLoadError> {
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageLoadError::TooLarge);
    }
    let gray = image::load_from_memory(bytes)
        .map_err(|_| ImageLoadError::Decode)?
        .to_luma8();
    let (width, height) = gray.dimensions();
    let mut panel = PanelImage::new(width, height).ok_or(ImageLoadError::TooLarge)?;
    for (x, y, px) in gray.enumerate_pixels() {
        panel.set_pixel(x, y, px.0[0] < LUMA_THRESHOLD);
    }
    Ok(panel)
}
