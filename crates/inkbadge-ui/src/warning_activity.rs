//! Full-screen warning shown when a badge record cannot be read.
//!
//! This is the one failure the wearer is told about: a badge file that
//! exists in the catalog but cannot be opened. The previous frame stays on
//! the panel once the warning times out and the next successful draw runs.

extern crate alloc;

use alloc::string::String;

use embedded_graphics::{
    geometry::Size,
    mono_font::{ascii, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use embedded_text::{
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
    TextBox,
};

use crate::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// How long the loop driver holds the warning before resuming.
pub const WARNING_HOLD_MS: u32 = 4000;

const FRAME_INSET: i32 = 4;
const TITLE_Y: i32 = 18;

/// A transient warning frame carrying a short message (usually the path of
/// the unreadable file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningActivity {
    message: String,
}

impl WarningActivity {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }

    /// Render the warning over a cleared screen: a frame, a title, and the
    /// wrapped message centered in the remaining space.
    pub fn render<D: DrawTarget<Color = BinaryColor>>(&self, display: &mut D) -> Result<(), D::Error> {
        display.clear(BinaryColor::Off)?;

        Rectangle::new(
            Point::new(FRAME_INSET, FRAME_INSET),
            Size::new(
                DISPLAY_WIDTH - 2 * FRAME_INSET as u32,
                DISPLAY_HEIGHT - 2 * FRAME_INSET as u32,
            ),
        )
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
        .draw(display)?;

        let title_style = MonoTextStyle::new(&ascii::FONT_9X15_BOLD, BinaryColor::On);
        let title = "Warning";
        let title_x = (DISPLAY_WIDTH as i32 - crate::layout::text_width(&ascii::FONT_9X15_BOLD, title) as i32) / 2;
        Text::with_baseline(title, Point::new(title_x, TITLE_Y), title_style, Baseline::Middle)
            .draw(display)?;

        let character_style = MonoTextStyle::new(&ascii::FONT_6X10, BinaryColor::On);
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Center)
            .vertical_alignment(VerticalAlignment::Middle)
            .build();
        let bounds = Rectangle::new(
            Point::new(10, 28),
            Size::new(DISPLAY_WIDTH - 20, DISPLAY_HEIGHT - 38),
        );
        TextBox::with_textbox_style(&self.message, bounds, character_style, textbox_style)
            .draw(display)?;

        Ok(())
    }
}
