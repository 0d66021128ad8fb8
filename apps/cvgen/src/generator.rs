//! CV generation: runs the whole pipeline once.
//!
//! Flow: load content → build story (embedding photo and icons) → paginate →
//!       paint pages → serialise → write the output file.
//!
//! The output file is rewritten from scratch on every run.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::errors::CvError;
use crate::layout::{build_story, paginate, Frame, LayoutOptions, Placement};
use crate::layout::styles::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::models::Resume;
use crate::render::{Canvas, DocumentInfo, PdfDocument, ResourceDir};

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub page_count: usize,
    pub bytes_written: usize,
    /// Placement of every top-level node, per page.
    pub geometry: Vec<Vec<Placement>>,
}

/// Loads the configured content and renders it.
pub fn generate(config: &Config) -> Result<GenerationReport, CvError> {
    let resume = match &config.content_path {
        Some(path) => {
            info!("Loading content from {}", path.display());
            Resume::from_path(path)?
        }
        None => Resume::builtin()?,
    };
    render_resume(&resume, config)
}

/// Renders `resume` to the configured output path.
pub fn render_resume(resume: &Resume, config: &Config) -> Result<GenerationReport, CvError> {
    let info = DocumentInfo {
        title: format!("{} - CV", resume.profile.name),
        author: resume.profile.name.clone(),
    };
    let mut doc = PdfDocument::new(PAGE_WIDTH, PAGE_HEIGHT, &info);
    let resources = ResourceDir::new(&config.resource_dir);
    let options = LayoutOptions {
        badge_rows: config.badge_rows,
        badge_width: config.badge_width,
    };

    let frame = Frame::page_body();
    let story = build_story(resume, &mut doc, &resources, &options, frame.width);
    let pages = paginate(story, frame)?;
    info!(pages = pages.len(), ?options, "Paginated story");

    let geometry: Vec<Vec<Placement>> = pages.iter().map(|page| page.geometry()).collect();
    for page in &pages {
        let mut canvas = Canvas::new();
        page.paint(&mut canvas);
        doc.add_page(canvas.finish());
    }
    let page_count = doc.page_count();
    let bytes = doc.finish();

    let output_path = config.output_path.clone();
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CvError::io(parent, e))?;
    }
    fs::write(&output_path, &bytes).map_err(|e| CvError::io(&output_path, e))?;
    info!("Generated {}", output_path.display());

    Ok(GenerationReport {
        output_path,
        page_count,
        bytes_written: bytes.len(),
        geometry,
    })
}
