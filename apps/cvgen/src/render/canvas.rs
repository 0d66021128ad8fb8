//! Page canvas: a thin drawing API over a pdf-writer content stream.
//!
//! Coordinates are PDF user space: points, origin bottom-left, y growing up.
//! The canvas remembers which image XObjects a page uses so the document can
//! list them in the page's resource dictionary.

use std::collections::BTreeMap;

use pdf_writer::{Content, Name, Ref, Str};

use crate::layout::font_metrics::FontFace;
use crate::layout::styles::Color;
use crate::render::encoding::encode_win_ansi;

/// Control-point factor for approximating a quarter circle with a cubic Bézier.
const KAPPA: f32 = 0.552_284_8;

/// An image or vector form embedded in the document, drawable on any page.
#[derive(Debug, Clone, PartialEq)]
pub struct XObject {
    pub name: String,
    pub id: Ref,
    /// Intrinsic size, only its aspect ratio matters when placing.
    pub width: f32,
    pub height: f32,
    /// Form XObjects from svg2pdf span the unit square; images always do.
    pub unit_square: bool,
}

impl XObject {
    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Coarse record of what a canvas painted; kept only in test builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOp {
    Text,
    Fill,
    Stroke,
    Clip,
    Image,
}

/// Finished page content ready to be attached to a page object.
#[derive(Debug)]
pub struct PageContent {
    pub bytes: Vec<u8>,
    pub xobjects: BTreeMap<String, Ref>,
}

pub struct Canvas {
    content: Content,
    xobjects: BTreeMap<String, Ref>,
    #[cfg(test)]
    ops: Vec<PaintOp>,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Canvas {
            content: Content::new(),
            xobjects: BTreeMap::new(),
            #[cfg(test)]
            ops: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn operations(&self) -> &[PaintOp] {
        &self.ops
    }

    #[cfg(test)]
    fn record(&mut self, op: PaintOp) {
        self.ops.push(op);
    }

    #[cfg(not(test))]
    fn record(&mut self, _op: PaintOp) {}

    pub fn save_state(&mut self) {
        self.content.save_state();
    }

    pub fn restore_state(&mut self) {
        self.content.restore_state();
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let (r, g, b) = color.unit();
        self.content
            .set_fill_rgb(r, g, b)
            .rect(x, y, width, height)
            .fill_nonzero();
        self.record(PaintOp::Fill);
    }

    pub fn fill_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        color: Color,
    ) {
        let radius = radius.min(width / 2.0).min(height / 2.0).max(0.0);
        if radius == 0.0 {
            self.fill_rect(x, y, width, height, color);
            return;
        }
        let (r, g, b) = color.unit();
        let k = radius * KAPPA;
        let (x2, y2) = (x + width, y + height);
        self.content
            .set_fill_rgb(r, g, b)
            .move_to(x + radius, y)
            .line_to(x2 - radius, y)
            .cubic_to(x2 - radius + k, y, x2, y + radius - k, x2, y + radius)
            .line_to(x2, y2 - radius)
            .cubic_to(x2, y2 - radius + k, x2 - radius + k, y2, x2 - radius, y2)
            .line_to(x + radius, y2)
            .cubic_to(x + radius - k, y2, x, y2 - radius + k, x, y2 - radius)
            .line_to(x, y + radius)
            .cubic_to(x, y + radius - k, x + radius - k, y, x + radius, y)
            .close_path()
            .fill_nonzero();
        self.record(PaintOp::Fill);
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let (r, g, b) = color.unit();
        self.content
            .set_stroke_rgb(r, g, b)
            .set_line_width(width)
            .move_to(from.0, from.1)
            .line_to(to.0, to.1)
            .stroke();
        self.record(PaintOp::Stroke);
    }

    fn circle_path(&mut self, cx: f32, cy: f32, radius: f32) {
        let k = radius * KAPPA;
        self.content
            .move_to(cx + radius, cy)
            .cubic_to(cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius)
            .cubic_to(cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy)
            .cubic_to(cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius)
            .cubic_to(cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy)
            .close_path();
    }

    /// Intersects the clip region with a circle. Pair with save/restore.
    pub fn clip_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        self.circle_path(cx, cy, radius);
        self.content.clip_nonzero().end_path();
        self.record(PaintOp::Clip);
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color) {
        let (r, g, b) = color.unit();
        self.content.set_stroke_rgb(r, g, b).set_line_width(width);
        self.circle_path(cx, cy, radius);
        self.content.stroke();
        self.record(PaintOp::Stroke);
    }

    /// Paints `xobject` stretched over the box with bottom-left corner (x, y).
    pub fn draw_xobject(&mut self, xobject: &XObject, x: f32, y: f32, width: f32, height: f32) {
        let (sx, sy) = if xobject.unit_square {
            (width, height)
        } else {
            (width / xobject.width, height / xobject.height)
        };
        self.content
            .save_state()
            .transform([sx, 0.0, 0.0, sy, x, y])
            .x_object(Name(xobject.name.as_bytes()))
            .restore_state();
        self.xobjects.insert(xobject.name.clone(), xobject.id);
        self.record(PaintOp::Image);
    }

    /// Shows a single run of text with its baseline starting at (x, baseline).
    pub fn show_text(
        &mut self,
        x: f32,
        baseline: f32,
        face: FontFace,
        size: f32,
        color: Color,
        text: &str,
    ) {
        if text.is_empty() {
            return;
        }
        let (r, g, b) = color.unit();
        let encoded = encode_win_ansi(text);
        self.content
            .begin_text()
            .set_fill_rgb(r, g, b)
            .set_font(Name(face.resource_name().as_bytes()), size)
            .set_text_matrix([1.0, 0.0, 0.0, 1.0, x, baseline])
            .show(Str(&encoded))
            .end_text();
        self.record(PaintOp::Text);
    }

    pub fn finish(self) -> PageContent {
        PageContent {
            bytes: self.content.finish().to_vec(),
            xobjects: self.xobjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::styles::{TEAL, TEXT};

    fn photo() -> XObject {
        XObject {
            name: "Im1".to_string(),
            id: Ref::new(9),
            width: 640.0,
            height: 480.0,
            unit_square: true,
        }
    }

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new();
        assert!(canvas.operations().is_empty());
        let page = canvas.finish();
        assert!(page.xobjects.is_empty());
    }

    #[test]
    fn test_draw_xobject_registers_resource() {
        let mut canvas = Canvas::new();
        canvas.draw_xobject(&photo(), 10.0, 10.0, 100.0, 75.0);
        assert_eq!(canvas.operations(), &[PaintOp::Image]);
        let page = canvas.finish();
        assert_eq!(page.xobjects.get("Im1"), Some(&Ref::new(9)));
        let text = String::from_utf8_lossy(&page.bytes);
        assert!(text.contains("/Im1 Do"), "content: {text}");
    }

    #[test]
    fn test_show_text_encodes_win_ansi() {
        let mut canvas = Canvas::new();
        canvas.show_text(0.0, 0.0, FontFace::HelveticaBold, 9.0, TEXT, "Urdu");
        let page = canvas.finish();
        let text = String::from_utf8_lossy(&page.bytes);
        assert!(text.contains("/F2 9 Tf"), "content: {text}");
        assert!(text.contains("(Urdu) Tj"), "content: {text}");
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut canvas = Canvas::new();
        canvas.show_text(0.0, 0.0, FontFace::Helvetica, 9.0, TEXT, "");
        assert!(canvas.operations().is_empty());
    }

    #[test]
    fn test_circle_ops_recorded() {
        let mut canvas = Canvas::new();
        canvas.save_state();
        canvas.clip_circle(50.0, 50.0, 50.0);
        canvas.restore_state();
        canvas.stroke_circle(50.0, 50.0, 50.0, 4.0, TEAL);
        assert_eq!(canvas.operations(), &[PaintOp::Clip, PaintOp::Stroke]);
    }

    #[test]
    fn test_aspect_ratio() {
        assert!((photo().aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }
}
