//! Page geometry, colours and paragraph styles of the CV template.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFace;

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

/// A4 portrait, in points.
pub const PAGE_WIDTH: f32 = 595.2756;
pub const PAGE_HEIGHT: f32 = 841.8898;
pub const PAGE_MARGIN: f32 = 10.0 * MM;

// ────────────────────────────────────────────────────────────────────────────
// Colours
// ────────────────────────────────────────────────────────────────────────────

/// An 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Components scaled to 0.0..=1.0, as PDF colour operators expect.
    pub fn unit(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

pub const TEAL: Color = Color::rgb8(0x44, 0x93, 0x99);
pub const DARK_GREY: Color = Color::rgb8(0x31, 0x3c, 0x4e);
pub const LIGHT_GREY: Color = Color::rgb8(0x98, 0x9d, 0xa6);
pub const TEXT: Color = Color::rgb8(0, 0, 0);
pub const TEXT_MUTED: Color = Color::rgb8(0x7c, 0x7c, 0x7c);
pub const WHITE: Color = Color::rgb8(0xff, 0xff, 0xff);

// ────────────────────────────────────────────────────────────────────────────
// Paragraph styles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub face: FontFace,
    pub size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    pub color: Color,
    pub align: Align,
    pub left_indent: f32,
    pub space_before: f32,
    pub space_after: f32,
}

impl ParagraphStyle {
    pub const fn new(face: FontFace, size: f32, leading: f32) -> Self {
        ParagraphStyle {
            face,
            size,
            leading,
            color: TEXT,
            align: Align::Left,
            left_indent: 0.0,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub const fn indent(mut self, left_indent: f32) -> Self {
        self.left_indent = left_indent;
        self
    }

    pub const fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }
}

pub const BODY: ParagraphStyle = ParagraphStyle::new(FontFace::Helvetica, 9.0, 11.0);
pub const NAME: ParagraphStyle =
    ParagraphStyle::new(FontFace::Helvetica, 24.0, 28.0).spacing(0.0, 2.0);
pub const TITLE: ParagraphStyle = ParagraphStyle::new(FontFace::Helvetica, 12.0, 14.0).color(TEAL);
pub const CONTACT: ParagraphStyle =
    ParagraphStyle::new(FontFace::Helvetica, 9.0, 18.0).align(Align::Right);
pub const SECTION_HEADER: ParagraphStyle =
    ParagraphStyle::new(FontFace::HelveticaBold, 12.0, 14.0).spacing(10.0, 5.0);
pub const SUBHEAD: ParagraphStyle =
    ParagraphStyle::new(FontFace::HelveticaBold, 10.0, 12.0).spacing(2.0, 0.0);
pub const SUBHEAD_SMALL: ParagraphStyle =
    ParagraphStyle::new(FontFace::HelveticaBold, 9.0, 11.0).spacing(1.0, 0.0);
pub const META: ParagraphStyle =
    ParagraphStyle::new(FontFace::HelveticaOblique, 8.0, 10.0).color(TEXT_MUTED);
pub const BULLET: ParagraphStyle = BODY.indent(10.0);
pub const BADGE_TEXT: ParagraphStyle =
    ParagraphStyle::new(FontFace::Helvetica, 8.0, 9.6).color(WHITE).align(Align::Center);
