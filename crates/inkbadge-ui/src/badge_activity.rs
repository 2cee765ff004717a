//! Badge screen: executes a [`DrawPlan`] against a display.
//!
//! The draw order matters on a shared framebuffer: background first, then
//! the image panel fill, the image itself, the border on top of the image,
//! and text bands over the remaining column. The selection indicator goes
//! last so it is never obscured.

extern crate alloc;

use embedded_graphics::{
    geometry::Size,
    mono_font::MonoTextStyle,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use crate::image_panel::PanelImage;
use crate::layout::{DrawPlan, TextFragment, INDICATOR_SIZE};

/// One badge frame ready to render: the computed plan plus the decoded
/// image, if any. Built fresh per redraw and dropped with its buffers after
/// the frame is committed.
pub struct BadgeActivity {
    plan: DrawPlan,
    image: Option<PanelImage>,
}

impl BadgeActivity {
    pub fn new(plan: DrawPlan, image: Option<PanelImage>) -> Self {
        Self { plan, image }
    }

    pub fn plan(&self) -> &DrawPlan {
        &self.plan
    }

    /// Composite the full frame.
    pub fn render<D: DrawTarget<Color = BinaryColor>>(&self, display: &mut D) -> Result<(), D::Error> {
        let plan = &self.plan;

        // Black background; the text column stays dark behind the company
        // line.
        display.clear(BinaryColor::On)?;

        // Panel fill goes down before the image so a missing or failed
        // image still reads as an intentional blank.
        plan.image_panel
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(display)?;

        if let Some(image) = &self.image {
            image.draw(display, plan.image_panel.top_left, plan.image_panel.size)?;
        }

        // Border after the image so the image can never paint over it.
        for line in plan.border.iter() {
            line.into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(display)?;
        }

        Self::draw_fragment(display, &plan.company)?;

        plan.name_band
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(display)?;
        Self::draw_fragment(display, &plan.name)?;

        for band in plan.detail_bands.iter() {
            band.into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
                .draw(display)?;
        }
        for detail in plan.details.iter() {
            Self::draw_fragment(display, &detail.title)?;
            Self::draw_fragment(display, &detail.text)?;
        }

        for square in plan.indicators.iter() {
            Rectangle::new(square.top_left, Size::new(INDICATOR_SIZE, INDICATOR_SIZE))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(display)?;
            if !square.selected {
                Rectangle::new(
                    square.top_left + Point::new(1, 1),
                    Size::new(INDICATOR_SIZE - 2, INDICATOR_SIZE - 2),
                )
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
                .draw(display)?;
            }
        }

        Ok(())
    }

    fn draw_fragment<D: DrawTarget<Color = BinaryColor>>(
        display: &mut D,
        fragment: &TextFragment,
    ) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(fragment.font, fragment.color);
        Text::with_baseline(&fragment.text, fragment.origin, style, Baseline::Middle)
            .draw(display)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::{BadgeRecord, DEFAULT_BADGE_TEXT};
    use crate::layout;
    use crate::test_display::TestDisplay;

    fn render_default(selected: usize, total: usize) -> TestDisplay {
        let record = BadgeRecord::parse(DEFAULT_BADGE_TEXT);
        let plan = layout::compute(&record, selected, total);
        let mut display = TestDisplay::default_size();
        BadgeActivity::new(plan, None).render(&mut display).unwrap();
        display
    }

    #[test]
    fn render_smoke_test() {
        let display = render_default(0, 1);
        assert!(display.on_count() > 0);
    }

    #[test]
    fn panel_is_blank_without_image() {
        let display = render_default(0, 1);
        // Inside the panel, away from the border: background only.
        assert_eq!(display.pixel(240, 64), BinaryColor::Off);
    }

    #[test]
    fn border_frames_the_panel() {
        let display = render_default(0, 1);
        assert_eq!(display.pixel(192, 0), BinaryColor::On);
        assert_eq!(display.pixel(295, 127), BinaryColor::On);
        assert_eq!(display.pixel(192, 64), BinaryColor::On);
        assert_eq!(display.pixel(295, 64), BinaryColor::On);
    }

    #[test]
    fn image_lands_in_panel_under_border() {
        let record = BadgeRecord::parse(DEFAULT_BADGE_TEXT);
        let plan = layout::compute(&record, 0, 1);
        let mut image = PanelImage::new(104, 128).unwrap();
        for y in 0..128 {
            for x in 0..104 {
                image.set_pixel(x, y, true);
            }
        }
        let mut display = TestDisplay::default_size();
        BadgeActivity::new(plan, Some(image))
            .render(&mut display)
            .unwrap();
        // Ink fills the panel interior and the border stays intact.
        assert_eq!(display.pixel(240, 64), BinaryColor::On);
        assert_eq!(display.pixel(192, 64), BinaryColor::On);
        // Nothing leaks left of the panel into the name band.
        assert_eq!(display.pixel(191, 64), BinaryColor::Off);
    }

    #[test]
    fn indicator_squares_distinguish_selection() {
        let display = render_default(1, 3);
        // Selected square (index 1, y=118) is solid: center stays On.
        assert_eq!(display.pixel(292, 119), BinaryColor::On);
        // Unselected square (index 0, y=113) has a hollow center.
        assert_eq!(display.pixel(292, 114), BinaryColor::Off);
        // Both have On corners.
        assert_eq!(display.pixel(291, 113), BinaryColor::On);
        assert_eq!(display.pixel(291, 118), BinaryColor::On);
    }

    #[test]
    fn no_indicator_for_single_badge() {
        let display = render_default(0, 1);
        // The indicator column sits inside the (blank) panel.
        assert_eq!(display.pixel(291, 123), BinaryColor::Off);
        assert_eq!(display.pixel(292, 124), BinaryColor::Off);
    }

    #[test]
    fn name_band_is_white_with_dark_text() {
        let display = render_default(0, 1);
        // Band corner away from any glyph.
        assert_eq!(display.pixel(2, 32), BinaryColor::Off);
        // Some On pixels exist inside the name band (the rendered name).
        let mut found_ink = false;
        for y in 31..87 {
            for x in 1..192 {
                if display.pixel(x, y) == BinaryColor::On {
                    found_ink = true;
                }
            }
        }
        assert!(found_ink);
    }
}
