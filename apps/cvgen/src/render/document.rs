//! PDF document writer built on pdf-writer.
//!
//! Object layout: catalog, page tree, one Type1 font object per `FontFace`,
//! document info, then images/forms and page objects allocated on demand.
//! Page objects are written as pages are added; the page tree is written last
//! in `finish` once every kid is known.

use std::collections::HashMap;
use std::io::Write;

use chrono::{Datelike, Local, Timelike};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::DynamicImage;
use pdf_writer::{Date, Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use tracing::debug;

use crate::errors::CvError;
use crate::layout::font_metrics::FontFace;
use crate::render::canvas::{PageContent, XObject};

/// Document information dictionary entries.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

pub struct PdfDocument {
    pdf: Pdf,
    next_id: i32,
    page_tree_id: Ref,
    font_ids: HashMap<FontFace, Ref>,
    pages: Vec<Ref>,
    page_size: (f32, f32),
    image_count: usize,
}

impl PdfDocument {
    pub fn new(page_width: f32, page_height: f32, info: &DocumentInfo) -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let mut next_id = 3;

        pdf.catalog(catalog_id).pages(page_tree_id);

        let mut font_ids = HashMap::new();
        for face in FontFace::ALL {
            let id = Ref::new(next_id);
            next_id += 1;
            pdf.type1_font(id)
                .base_font(Name(face.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            font_ids.insert(face, id);
        }

        let info_id = Ref::new(next_id);
        next_id += 1;
        let now = Local::now();
        pdf.document_info(info_id)
            .title(TextStr(&info.title))
            .author(TextStr(&info.author))
            .creator(TextStr(concat!("cvgen ", env!("CARGO_PKG_VERSION"))))
            .creation_date(
                Date::new(now.year() as u16)
                    .month(now.month() as u8)
                    .day(now.day() as u8)
                    .hour(now.hour() as u8)
                    .minute(now.minute() as u8)
                    .second(now.second() as u8),
            );

        let file_id = uuid::Uuid::new_v4().as_bytes().to_vec();
        pdf.set_file_id((file_id.clone(), file_id));

        PdfDocument {
            pdf,
            next_id,
            page_tree_id,
            font_ids,
            pages: Vec::new(),
            page_size: (page_width, page_height),
            image_count: 0,
        }
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn next_image_name(&mut self) -> String {
        self.image_count += 1;
        format!("Im{}", self.image_count)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Embeds a decoded raster image as a Flate-compressed image XObject.
    /// An alpha channel is written as a soft mask.
    pub fn embed_raster(&mut self, image: &DynamicImage) -> Result<XObject, CvError> {
        let (width, height) = (image.width(), image.height());
        let rgb = compress(image.to_rgb8().as_raw())?;
        let alpha = if image.color().has_alpha() {
            let alpha: Vec<u8> = image.to_rgba8().pixels().map(|p| p.0[3]).collect();
            Some(compress(&alpha)?)
        } else {
            None
        };

        let id = self.alloc();
        let mask_id = alpha.as_ref().map(|_| self.alloc());

        {
            let mut xobject = self.pdf.image_xobject(id, &rgb);
            xobject.filter(Filter::FlateDecode);
            xobject.width(width as i32);
            xobject.height(height as i32);
            xobject.color_space().device_rgb();
            xobject.bits_per_component(8);
            if let Some(mask_id) = mask_id {
                xobject.s_mask(mask_id);
            }
            xobject.finish();
        }

        if let (Some(mask_id), Some(alpha)) = (mask_id, alpha) {
            let mut mask = self.pdf.image_xobject(mask_id, &alpha);
            mask.filter(Filter::FlateDecode);
            mask.width(width as i32);
            mask.height(height as i32);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            mask.finish();
        }

        let name = self.next_image_name();
        debug!(name = %name, width, height, "embedded raster image");
        Ok(XObject {
            name,
            id,
            width: width as f32,
            height: height as f32,
            unit_square: true,
        })
    }

    /// Converts an SVG document into a form XObject and embeds it.
    pub fn embed_svg(&mut self, data: &[u8]) -> Result<XObject, CvError> {
        let tree = usvg::Tree::from_data(data, &usvg::Options::default())
            .map_err(|e| CvError::Svg(e.to_string()))?;
        let size = tree.size();

        let (chunk, root) = svg2pdf::to_chunk(&tree, svg2pdf::ConversionOptions::default())
            .map_err(|e| CvError::Svg(format!("{e:?}")))?;

        let mut mapping: HashMap<Ref, Ref> = HashMap::new();
        let chunk = chunk.renumber(|old| *mapping.entry(old).or_insert_with(|| self.alloc()));
        let id = mapping
            .get(&root)
            .copied()
            .ok_or_else(|| CvError::Svg("converted SVG has no root object".to_string()))?;
        self.pdf.extend(&chunk);

        let name = self.next_image_name();
        debug!(name = %name, width = size.width(), height = size.height(), "embedded SVG form");
        Ok(XObject {
            name,
            id,
            width: size.width(),
            height: size.height(),
            unit_square: true,
        })
    }

    /// Appends a page holding `content`.
    pub fn add_page(&mut self, content: PageContent) {
        let page_id = self.alloc();
        let content_id = self.alloc();
        self.pdf.stream(content_id, &content.bytes);

        let (width, height) = self.page_size;
        let mut page = self.pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, width, height));
        page.parent(self.page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                for face in FontFace::ALL {
                    fonts.pair(Name(face.resource_name().as_bytes()), self.font_ids[&face]);
                }
            }
            if !content.xobjects.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, id) in &content.xobjects {
                    xobjects.pair(Name(name.as_bytes()), *id);
                }
            }
        }
        page.finish();
        self.pages.push(page_id);
    }

    /// Writes the page tree and returns the serialized file.
    pub fn finish(mut self) -> Vec<u8> {
        let count = self.pages.len() as i32;
        self.pdf
            .pages(self.page_tree_id)
            .kids(self.pages.iter().copied())
            .count(count);
        self.pdf.finish()
    }
}

fn compress(data: &[u8]) -> Result<Vec<u8>, CvError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .and_then(|_| encoder.finish())
        .map_err(|e| CvError::io("<image stream>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::Canvas;

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Test CV".to_string(),
            author: "Tester".to_string(),
        }
    }

    #[test]
    fn test_empty_document_serializes() {
        let doc = PdfDocument::new(595.0, 842.0, &info());
        assert_eq!(doc.page_count(), 0);
        let bytes = doc.finish();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_pages_are_counted() {
        let mut doc = PdfDocument::new(595.0, 842.0, &info());
        doc.add_page(Canvas::new().finish());
        doc.add_page(Canvas::new().finish());
        assert_eq!(doc.page_count(), 2);
        let bytes = doc.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 2"), "page tree count missing");
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn test_embed_raster_assigns_unique_names() {
        let mut doc = PdfDocument::new(595.0, 842.0, &info());
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3])));
        let a = doc.embed_raster(&img).unwrap();
        let b = doc.embed_raster(&img).unwrap();
        assert_ne!(a.name, b.name);
        assert_ne!(a.id, b.id);
        assert_eq!((a.width, a.height), (4.0, 4.0));
    }

    #[test]
    fn test_embed_raster_with_alpha_writes_soft_mask() {
        let mut doc = PdfDocument::new(595.0, 842.0, &info());
        let img =
            DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 128])));
        doc.embed_raster(&img).unwrap();
        let text = String::from_utf8_lossy(&doc.finish()).to_string();
        assert!(text.contains("/SMask"), "soft mask missing");
        assert!(text.contains("/DeviceGray"));
    }

    #[test]
    fn test_embed_svg_rejects_garbage() {
        let mut doc = PdfDocument::new(595.0, 842.0, &info());
        let err = doc.embed_svg(b"definitely not svg").unwrap_err();
        assert!(matches!(err, CvError::Svg(_)));
    }

    #[test]
    fn test_embed_svg_accepts_simple_icon() {
        let mut doc = PdfDocument::new(595.0, 842.0, &info());
        let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="12" viewBox="0 0 24 12"><rect width="24" height="12" fill="#449399"/></svg>"##;
        let icon = doc.embed_svg(svg).unwrap();
        assert!((icon.aspect_ratio() - 2.0).abs() < 1e-4);
    }
}
