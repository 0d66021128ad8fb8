// Layout: flowable nodes, font metrics, pagination and the résumé assembler.
// Everything here is pure geometry; the only side effect is embedding the photo
// and icons into the document while the story is assembled.

pub mod assembler;
pub mod badge;
pub mod circular_image;
pub mod columns;
pub mod flowable;
pub mod font_metrics;
pub mod frame;
pub mod paragraph;
pub mod styles;
pub mod table;

// Re-export the public API consumed by the generator.
pub use assembler::{build_story, LayoutOptions};
pub use frame::{paginate, Frame, Placement};
