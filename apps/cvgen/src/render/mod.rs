// PDF output: page canvases, the document writer, and asset loading.

pub mod canvas;
pub mod document;
pub mod encoding;
pub mod resources;

pub use canvas::Canvas;
pub use document::{DocumentInfo, PdfDocument};
pub use resources::ResourceDir;
