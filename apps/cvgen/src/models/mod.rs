pub mod resume;

pub use resume::{Contact, Language, Profile, Resume, SectionEntry};
