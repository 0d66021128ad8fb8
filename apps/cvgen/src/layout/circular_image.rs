//! The round profile photo with its teal ring.

use std::path::Path;

use tracing::error;

use crate::layout::flowable::{Flowable, Size, Split};
use crate::layout::styles::TEAL;
use crate::render::canvas::{Canvas, XObject};
use crate::render::document::PdfDocument;
use crate::render::resources::load_photo;

const RING_WIDTH: f32 = 4.0;

/// A square node showing an image clipped to the inscribed circle.
///
/// When the image could not be loaded the node still reserves its square
/// but paints nothing, ring included.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularImage {
    diameter: f32,
    image: Option<XObject>,
}

impl CircularImage {
    pub fn new(image: Option<XObject>, diameter: f32) -> Self {
        debug_assert!(diameter > 0.0, "diameter must be positive");
        CircularImage { diameter, image }
    }

    /// Loads the photo at `path`, reporting a failure instead of returning it.
    pub fn load(doc: &mut PdfDocument, path: &Path, diameter: f32) -> Self {
        let image = match load_photo(doc, path) {
            Ok(xobject) => Some(xobject),
            Err(e) => {
                error!(path = %path.display(), "Error drawing image: {e}");
                None
            }
        };
        CircularImage::new(image, diameter)
    }

    #[cfg(test)]
    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }
}

impl Flowable for CircularImage {
    fn kind(&self) -> &'static str {
        "photo"
    }

    fn wrap(&self, _avail_width: f32) -> Size {
        Size::new(self.diameter, self.diameter)
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32, _width: f32) {
        let Some(image) = &self.image else {
            return;
        };
        let radius = self.diameter / 2.0;
        let (cx, cy) = (x + radius, top - radius);

        // Cover: the shorter side fills the square, the longer one is cropped.
        let aspect = image.aspect_ratio();
        let (w, h) = if aspect >= 1.0 {
            (self.diameter * aspect, self.diameter)
        } else {
            (self.diameter, self.diameter / aspect)
        };

        canvas.save_state();
        canvas.clip_circle(cx, cy, radius);
        canvas.draw_xobject(image, cx - w / 2.0, cy - h / 2.0, w, h);
        canvas.restore_state();
        canvas.stroke_circle(cx, cy, radius, RING_WIDTH, TEAL);
    }

    fn split(self: Box<Self>, _width: f32, _height: f32) -> Split {
        Split::Whole(self)
    }
}
