//! Loading of the photo and contact icons into a document.
//!
//! The photo is required content: failures come back as `CvError` for the
//! circular image node to report. Icons are optional: absence is an expected
//! outcome, modelled as `Resource::Absent` rather than an error.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::CvError;
use crate::render::canvas::XObject;
use crate::render::document::PdfDocument;

/// Outcome of loading an optional asset.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Loaded(XObject),
    Absent,
}

impl Resource {
    #[cfg(test)]
    pub fn as_loaded(&self) -> Option<&XObject> {
        match self {
            Resource::Loaded(xobject) => Some(xobject),
            Resource::Absent => None,
        }
    }
}

/// Resolves asset paths from the content document against a base directory.
#[derive(Debug, Clone)]
pub struct ResourceDir {
    root: PathBuf,
}

impl ResourceDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ResourceDir { root: root.into() }
    }

    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
}

/// Reads and embeds an image file, raster or SVG.
pub fn load_image(doc: &mut PdfDocument, path: &Path) -> Result<XObject, CvError> {
    let data = std::fs::read(path).map_err(|e| CvError::io(path, e))?;
    if is_svg(path) {
        doc.embed_svg(&data)
    } else {
        let image = image::load_from_memory(&data)?;
        doc.embed_raster(&image)
    }
}

/// Loads the profile photo; the caller decides how to report a failure.
pub fn load_photo(doc: &mut PdfDocument, path: &Path) -> Result<XObject, CvError> {
    load_image(doc, path)
}

/// Loads a contact icon. Missing or unreadable icons are `Absent`.
pub fn load_icon(doc: &mut PdfDocument, path: &Path) -> Resource {
    match load_image(doc, path) {
        Ok(xobject) => Resource::Loaded(xobject),
        Err(e) if e.is_not_found() => {
            debug!(path = %path.display(), "icon not found, using spacer");
            Resource::Absent
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "icon unreadable, using spacer");
            Resource::Absent
        }
    }
}
