//! The flowable contract and the simple leaf nodes.
//!
//! A flowable measures itself against an available width, paints itself at a
//! position chosen by its container, and optionally splits so that a head part
//! fits a given height. `top` is always the upper edge of the node in PDF
//! coordinates; nodes grow downwards from it.

use std::fmt;

use crate::layout::styles::Color;
use crate::render::canvas::{Canvas, XObject};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}

/// Result of asking a flowable to split.
pub enum Split {
    /// Head fits the requested height, tail continues in the next frame.
    Parts(Box<dyn Flowable>, Box<dyn Flowable>),
    /// The node cannot be split at that height; returned unchanged.
    Whole(Box<dyn Flowable>),
}

pub trait Flowable: fmt::Debug {
    /// Short label used in page geometry reports and layout errors.
    fn kind(&self) -> &'static str;

    /// Size this node occupies when given `avail_width`.
    fn wrap(&self, avail_width: f32) -> Size;

    /// Paints the node with its upper-left corner at (x, top).
    /// `width` is the width the container allotted.
    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32, width: f32);

    /// Splits the node so the head is at most `height` tall.
    fn split(self: Box<Self>, width: f32, height: f32) -> Split;

    fn space_before(&self) -> f32 {
        0.0
    }

    fn space_after(&self) -> f32 {
        0.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Leaf nodes
// ────────────────────────────────────────────────────────────────────────────

/// Empty box of fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct Spacer {
    pub width: f32,
    pub height: f32,
}

impl Spacer {
    pub fn new(width: f32, height: f32) -> Self {
        Spacer { width, height }
    }
}

impl Flowable for Spacer {
    fn kind(&self) -> &'static str {
        "spacer"
    }

    fn wrap(&self, _avail_width: f32) -> Size {
        Size::new(self.width, self.height)
    }

    fn draw(&self, _canvas: &mut Canvas, _x: f32, _top: f32, _width: f32) {}

    fn split(self: Box<Self>, _width: f32, _height: f32) -> Split {
        Split::Whole(self)
    }
}

/// Full-width horizontal line; the divider between header and body.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalRule {
    pub thickness: f32,
    pub color: Color,
}

impl Flowable for HorizontalRule {
    fn kind(&self) -> &'static str {
        "rule"
    }

    fn wrap(&self, avail_width: f32) -> Size {
        Size::new(avail_width, self.thickness)
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32, width: f32) {
        let y = top - self.thickness / 2.0;
        canvas.line((x, y), (x + width, y), self.thickness, self.color);
    }

    fn split(self: Box<Self>, _width: f32, _height: f32) -> Split {
        Split::Whole(self)
    }
}

/// An embedded image scaled to a fixed height, keeping its aspect ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBox {
    pub xobject: XObject,
    pub height: f32,
}

impl ImageBox {
    pub fn with_height(xobject: XObject, height: f32) -> Self {
        ImageBox { xobject, height }
    }

    pub fn width(&self) -> f32 {
        self.height * self.xobject.aspect_ratio()
    }
}

impl Flowable for ImageBox {
    fn kind(&self) -> &'static str {
        "image"
    }

    fn wrap(&self, _avail_width: f32) -> Size {
        Size::new(self.width(), self.height)
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32, _width: f32) {
        canvas.draw_xobject(&self.xobject, x, top - self.height, self.width(), self.height);
    }

    fn split(self: Box<Self>, _width: f32, _height: f32) -> Split {
        Split::Whole(self)
    }
}

#[cfg(test)]
mod tests {
    use pdf_writer::Ref;

    use super::*;
    use crate::layout::styles::DARK_GREY;
    use crate::render::canvas::PaintOp;

    #[test]
    fn test_spacer_reports_fixed_size_and_paints_nothing() {
        let spacer = Spacer::new(10.0, 10.0);
        assert_eq!(spacer.wrap(500.0), Size::new(10.0, 10.0));
        let mut canvas = Canvas::new();
        spacer.draw(&mut canvas, 0.0, 100.0, 10.0);
        assert!(canvas.operations().is_empty());
    }

    #[test]
    fn test_rule_spans_available_width() {
        let rule = HorizontalRule {
            thickness: 1.0,
            color: DARK_GREY,
        };
        assert_eq!(rule.wrap(538.0), Size::new(538.0, 1.0));
        let mut canvas = Canvas::new();
        rule.draw(&mut canvas, 28.0, 700.0, 538.0);
        assert_eq!(canvas.operations(), &[PaintOp::Stroke]);
    }

    #[test]
    fn test_image_box_keeps_aspect_ratio() {
        let icon = ImageBox::with_height(
            XObject {
                name: "Im1".to_string(),
                id: Ref::new(5),
                width: 24.0,
                height: 12.0,
                unit_square: true,
            },
            10.0,
        );
        assert_eq!(icon.wrap(15.0), Size::new(20.0, 10.0));
    }

    #[test]
    fn test_leaf_nodes_do_not_split() {
        let spacer: Box<dyn Flowable> = Box::new(Spacer::new(1.0, 40.0));
        assert!(matches!(spacer.split(100.0, 10.0), Split::Whole(_)));
    }
}
