//! Badge layout engine.
//!
//! Turns a [`BadgeRecord`] plus the catalog position into a [`DrawPlan`]: a
//! full set of positioned, already-fitted visual elements for one frame.
//! Everything here is pure geometry and text fitting; no drawing happens
//! until the plan is executed against a display.
//!
//! Text fitting has two modes. The company line and both detail pairs are
//! truncated character-by-character until they fit their column. The name is
//! never truncated: it walks down a fixed ladder of font sizes until the
//! rendered width fits, bottoming out at the smallest rung.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::mono_font::{ascii, MonoFont};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::primitives::{Line, Rectangle};

use crate::badge::BadgeRecord;
use crate::catalog::clamp_index;
use crate::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

// ── Fixed geometry ──────────────────────────────────────────────────

/// Width of the image panel anchored to the right edge.
pub const IMAGE_WIDTH: u32 = 104;

/// Height of the company band at the top.
pub const COMPANY_HEIGHT: u32 = 30;

/// Height of each of the two detail bands at the bottom.
pub const DETAILS_HEIGHT: u32 = 20;

/// The name band fills whatever vertical space the fixed bands leave.
pub const NAME_HEIGHT: u32 = DISPLAY_HEIGHT - COMPANY_HEIGHT - (DETAILS_HEIGHT * 2) - 2;

/// Width of the text column left of the image panel.
pub const TEXT_WIDTH: u32 = DISPLAY_WIDTH - IMAGE_WIDTH - 1;

/// Left margin for company and detail text.
pub const LEFT_PADDING: i32 = 5;

/// Horizontal padding the fitted name must leave inside the text column.
pub const NAME_PADDING: u32 = 20;

/// Gap between a detail title and its text on the shared line.
pub const DETAIL_SPACING: u32 = 10;

/// Selection indicator column: x position, square size and pitch.
pub const INDICATOR_X: i32 = 291;
pub const INDICATOR_SIZE: u32 = 4;
pub const INDICATOR_PITCH: i32 = 5;

// ── Fonts ───────────────────────────────────────────────────────────

pub const COMPANY_FONT: &MonoFont<'static> = &ascii::FONT_9X15_BOLD;
pub const DETAIL_TITLE_FONT: &MonoFont<'static> = &ascii::FONT_7X13_BOLD;
pub const DETAIL_TEXT_FONT: &MonoFont<'static> = &ascii::FONT_7X13;

/// Name sizes, largest first. Fitting steps down one rung at a time; the
/// last rung is the floor and is used even when the name still overflows.
pub static NAME_FONT_LADDER: &[&MonoFont<'static>] = &[
    &ascii::FONT_10X20,
    &ascii::FONT_9X18,
    &ascii::FONT_9X15,
    &ascii::FONT_8X13,
    &ascii::FONT_7X14,
    &ascii::FONT_7X13,
    &ascii::FONT_6X13,
    &ascii::FONT_6X12,
    &ascii::FONT_6X10,
    &ascii::FONT_6X9,
    &ascii::FONT_5X8,
    &ascii::FONT_5X7,
    &ascii::FONT_4X6,
];

// ── Text fitting ────────────────────────────────────────────────────

/// Rendered width of `text` in a monospaced font.
pub fn text_width(font: &MonoFont<'_>, text: &str) -> u32 {
    let count = text.chars().count() as u32;
    if count == 0 {
        0
    } else {
        count * font.character_size.width + (count - 1) * font.character_spacing
    }
}

/// Reduce a string until it fits within a given width.
///
/// Drops one character per step and re-measures; an already-fitting string
/// comes back unchanged. The result's width is at most `max_width`, or the
/// string is empty.
pub fn truncate_to_width(font: &MonoFont<'_>, text: &str, max_width: u32) -> String {
    let mut out = String::from(text);
    while text_width(font, &out) > max_width && !out.is_empty() {
        out.pop();
    }
    out
}

/// Pick the name font: the first (largest) ladder rung whose rendered width
/// fits inside the name column, or the floor rung if none does.
pub fn fit_name_font(name: &str) -> &'static MonoFont<'static> {
    let limit = TEXT_WIDTH - NAME_PADDING;
    for &font in NAME_FONT_LADDER {
        if text_width(font, name) < limit {
            return font;
        }
    }
    NAME_FONT_LADDER[NAME_FONT_LADDER.len() - 1]
}

// ── Draw plan ───────────────────────────────────────────────────────

/// One positioned piece of text. `origin` is the middle-baseline anchor.
#[derive(Clone)]
pub struct TextFragment {
    pub text: String,
    pub font: &'static MonoFont<'static>,
    pub origin: Point,
    pub color: BinaryColor,
}

/// A detail row: title and text sharing one line.
#[derive(Clone)]
pub struct DetailLine {
    pub title: TextFragment,
    pub text: TextFragment,
}

/// One square of the selection indicator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorSquare {
    pub top_left: Point,
    pub selected: bool,
}

/// Everything needed to composite one badge frame. Recomputed from scratch
/// per redraw; holds no references to the catalog or record.
#[derive(Clone)]
pub struct DrawPlan {
    pub company: TextFragment,
    pub name: TextFragment,
    pub details: [DetailLine; 2],
    pub name_band: Rectangle,
    pub detail_bands: [Rectangle; 2],
    pub image_panel: Rectangle,
    pub border: [Line; 4],
    pub indicators: Vec<IndicatorSquare>,
}

/// Compute the draw plan for one badge.
///
/// `selected` is clamped against `total` one more time here so a plan can
/// never carry an out-of-range indicator even if a caller skipped the
/// catalog's own repair step.
pub fn compute(record: &BadgeRecord, selected: usize, total: usize) -> DrawPlan {
    let width = DISPLAY_WIDTH as i32;
    let height = DISPLAY_HEIGHT as i32;
    let selected = clamp_index(selected as i64, total.max(1));

    let company = truncate_to_width(COMPANY_FONT, &record.company, TEXT_WIDTH);

    let name_font = fit_name_font(&record.name);
    let name_width = text_width(name_font, &record.name) as i32;
    let name_x = (TEXT_WIDTH as i32 - name_width) / 2;
    let name_y = (NAME_HEIGHT as i32 / 2) + COMPANY_HEIGHT as i32 + 1;

    let detail1 = fit_detail_line(
        &record.detail1_title,
        &record.detail1_text,
        height - (DETAILS_HEIGHT as i32 * 3) / 2,
    );
    let detail2 = fit_detail_line(
        &record.detail2_title,
        &record.detail2_text,
        height - DETAILS_HEIGHT as i32 / 2,
    );

    let panel_left = width - IMAGE_WIDTH as i32;
    let image_panel = Rectangle::new(
        Point::new(panel_left, 0),
        Size::new(IMAGE_WIDTH, DISPLAY_HEIGHT),
    );

    let border = [
        Line::new(Point::new(panel_left, 0), Point::new(width - 1, 0)),
        Line::new(Point::new(panel_left, 0), Point::new(panel_left, height - 1)),
        Line::new(
            Point::new(panel_left, height - 1),
            Point::new(width - 1, height - 1),
        ),
        Line::new(Point::new(width - 1, 0), Point::new(width - 1, height - 1)),
    ];

    let mut indicators = Vec::new();
    if total > 1 {
        for i in 0..total {
            let y = height - (total as i32 * INDICATOR_PITCH) + (i as i32 * INDICATOR_PITCH);
            indicators.push(IndicatorSquare {
                top_left: Point::new(INDICATOR_X, y),
                selected: i == selected,
            });
        }
    }

    DrawPlan {
        company: TextFragment {
            text: company,
            font: COMPANY_FONT,
            origin: Point::new(LEFT_PADDING, (COMPANY_HEIGHT as i32 / 2) + 1),
            color: BinaryColor::Off,
        },
        name: TextFragment {
            text: record.name.clone(),
            font: name_font,
            origin: Point::new(name_x, name_y),
            color: BinaryColor::On,
        },
        details: [detail1, detail2],
        name_band: Rectangle::new(
            Point::new(1, COMPANY_HEIGHT as i32 + 1),
            Size::new(TEXT_WIDTH, NAME_HEIGHT),
        ),
        detail_bands: [
            Rectangle::new(
                Point::new(1, height - DETAILS_HEIGHT as i32 * 2),
                Size::new(TEXT_WIDTH, DETAILS_HEIGHT - 1),
            ),
            Rectangle::new(
                Point::new(1, height - DETAILS_HEIGHT as i32),
                Size::new(TEXT_WIDTH, DETAILS_HEIGHT - 1),
            ),
        ],
        image_panel,
        border,
        indicators,
    }
}

/// Fit one title/text detail pair onto its shared line. The title gets the
/// whole column; the text gets what the fitted title leaves after the
/// inter-field gap, so the two never overlap.
fn fit_detail_line(title: &str, text: &str, y: i32) -> DetailLine {
    let title = truncate_to_width(DETAIL_TITLE_FONT, title, TEXT_WIDTH);
    let title_width = text_width(DETAIL_TITLE_FONT, &title);
    let text_avail = TEXT_WIDTH.saturating_sub(DETAIL_SPACING + title_width);
    let text = truncate_to_width(DETAIL_TEXT_FONT, text, text_avail);

    DetailLine {
        title: TextFragment {
            text: title,
            font: DETAIL_TITLE_FONT,
            origin: Point::new(LEFT_PADDING, y),
            color: BinaryColor::On,
        },
        text: TextFragment {
            text,
            font: DETAIL_TEXT_FONT,
            origin: Point::new(
                LEFT_PADDING + title_width as i32 + DETAIL_SPACING as i32,
                y,
            ),
            color: BinaryColor::On,
        },
    }
}
