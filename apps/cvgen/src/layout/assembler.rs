//! Builds the story for a résumé: header, divider and the two-column body.
//!
//! Photo and icons are embedded into the document while the story is built, so
//! the nodes only carry references to already-written XObjects.

use tracing::{debug, info};

use crate::layout::badge::{badge_rows, group_badges, BadgeRows, BadgeWidth};
use crate::layout::circular_image::CircularImage;
use crate::layout::columns::TwoColumn;
use crate::layout::flowable::{Flowable, HorizontalRule, ImageBox, Spacer};
use crate::layout::paragraph::{Paragraph, Span};
use crate::layout::styles::{
    Align, BODY, BULLET, CONTACT, DARK_GREY, META, MM, NAME, SECTION_HEADER, SUBHEAD,
    SUBHEAD_SMALL, TEAL, TITLE,
};
use crate::layout::table::{Cell, ColumnWidth, Padding, Table, VAlign};
use crate::models::{Contact, Language, Profile, Resume, SectionEntry};
use crate::render::document::PdfDocument;
use crate::render::resources::{load_icon, Resource, ResourceDir};

const NAME_COLUMN: f32 = 70.0 * MM;
const PHOTO_COLUMN: f32 = 40.0 * MM;
const CONTACT_COLUMN: f32 = 80.0 * MM;
const PHOTO_DIAMETER: f32 = 100.0;
pub const ICON_COLUMN: f32 = 15.0;
const ICON_HEIGHT: f32 = 10.0;

const LEFT_COLUMN: f32 = 90.0 * MM;
const COLUMN_GAP: f32 = 5.0 * MM;
const RULE_THICKNESS: f32 = 1.0;
const ENTRY_GAP: f32 = 3.0 * MM;
const LANGUAGE_GAP: f32 = 2.0 * MM;

/// Grouping and sizing choices for badge sections.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutOptions {
    pub badge_rows: BadgeRows,
    pub badge_width: BadgeWidth,
}

type Nodes = Vec<Box<dyn Flowable>>;

fn boxed(node: impl Flowable + 'static) -> Box<dyn Flowable> {
    Box::new(node)
}

/// Builds the full story for `resume` on a frame `frame_width` wide.
pub fn build_story(
    resume: &Resume,
    doc: &mut PdfDocument,
    resources: &ResourceDir,
    options: &LayoutOptions,
    frame_width: f32,
) -> Nodes {
    let right_width = (frame_width - LEFT_COLUMN - COLUMN_GAP).max(0.0);

    let left = left_column(resume);
    let right = right_column(resume, options, right_width);
    info!(
        left_nodes = left.len(),
        right_nodes = right.len(),
        "Built story"
    );

    vec![
        boxed(header(&resume.profile, doc, resources)),
        boxed(Spacer::new(1.0, 5.0 * MM)),
        boxed(HorizontalRule {
            thickness: RULE_THICKNESS,
            color: DARK_GREY,
        }),
        boxed(Spacer::new(1.0, 5.0 * MM)),
        boxed(TwoColumn::new(left, right, LEFT_COLUMN, COLUMN_GAP)),
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn header(profile: &Profile, doc: &mut PdfDocument, resources: &ResourceDir) -> Table {
    let name_cell = Cell::new(vec![
        boxed(Paragraph::new(profile.name.as_str(), NAME)),
        boxed(Paragraph::new(profile.title.join("\n"), TITLE)),
    ]);

    let photo = CircularImage::load(doc, &resources.resolve(&profile.photo), PHOTO_DIAMETER);
    let photo_cell = Cell::single(photo).align(Align::Center);

    let contacts = profile
        .contacts
        .iter()
        .map(|contact| {
            let icon = load_icon(doc, &resources.resolve(&contact.icon));
            boxed(contact_row(contact, icon))
        })
        .collect();
    let contact_cell = Cell::new(contacts).align(Align::Right);

    Table::row(
        vec![name_cell, photo_cell, contact_cell],
        vec![
            ColumnWidth::Fixed(NAME_COLUMN),
            ColumnWidth::Fixed(PHOTO_COLUMN),
            ColumnWidth::Fixed(CONTACT_COLUMN),
        ],
    )
    .padding(Padding::new(0.0, 0.0, 3.0, 3.0))
}

/// One contact line: right-aligned text, then a fixed icon column.
/// An absent icon is replaced by a spacer so every row keeps its footprint.
pub fn contact_row(contact: &Contact, icon: Resource) -> Table {
    let icon_cell = match icon {
        Resource::Loaded(xobject) => Cell::single(ImageBox::with_height(xobject, ICON_HEIGHT)),
        Resource::Absent => {
            debug!(text = %contact.text, "contact without icon");
            Cell::single(Spacer::new(ICON_HEIGHT, ICON_HEIGHT))
        }
    };
    Table::row(
        vec![Cell::single(Paragraph::new(contact.text.as_str(), CONTACT)), icon_cell],
        vec![ColumnWidth::Fill, ColumnWidth::Fixed(ICON_COLUMN)],
    )
    .padding(Padding::new(0.0, 0.0, 1.0, 1.0))
    .valign(VAlign::Middle)
}

// ────────────────────────────────────────────────────────────────────────────
// Body
// ────────────────────────────────────────────────────────────────────────────

fn section_header(title: &str) -> Box<dyn Flowable> {
    boxed(Paragraph::new(title.to_uppercase(), SECTION_HEADER))
}

fn teal_meta(parts: &[&str]) -> Box<dyn Flowable> {
    let spans = parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let text = if i == 0 {
                part.to_string()
            } else {
                format!("   {part}")
            };
            Span::colored(text, TEAL)
        })
        .collect();
    boxed(Paragraph::rich(spans, META))
}

fn entry_nodes(entry: &SectionEntry) -> Nodes {
    let mut nodes: Nodes = vec![boxed(Paragraph::new(entry.title.as_str(), SUBHEAD))];
    if let Some(organization) = &entry.organization {
        nodes.push(boxed(Paragraph::new(organization.as_str(), SUBHEAD_SMALL)));
    }

    let mut meta = vec![entry.date.as_str()];
    if let Some(grade) = &entry.grade {
        meta.push(grade.as_str());
    }
    nodes.push(teal_meta(&meta));

    if let Some(description) = &entry.description {
        nodes.push(boxed(Paragraph::new(description.as_str(), BODY)));
    }
    for detail in &entry.details {
        nodes.push(boxed(Paragraph::new(format!("\u{2022} {detail}"), BULLET)));
    }
    nodes.push(boxed(Spacer::new(1.0, ENTRY_GAP)));
    nodes
}

fn entry_section(title: &str, entries: &[SectionEntry]) -> Nodes {
    if entries.is_empty() {
        return Vec::new();
    }
    let mut nodes = vec![section_header(title)];
    nodes.extend(entries.iter().flat_map(entry_nodes));
    nodes
}

fn language_nodes(language: &Language) -> Nodes {
    vec![
        boxed(Paragraph::rich(vec![Span::bold(language.name.as_str())], BODY)),
        teal_meta(&[language.level.as_str()]),
        boxed(Spacer::new(1.0, LANGUAGE_GAP)),
    ]
}

fn badge_section(title: &str, labels: &[String], options: &LayoutOptions, width: f32) -> Nodes {
    if labels.is_empty() {
        return Vec::new();
    }
    let rows = group_badges(labels, options.badge_rows, options.badge_width, width);
    let mut nodes = vec![section_header(title)];
    nodes.extend(badge_rows(rows));
    nodes
}

/// Education, certificates and languages.
pub fn left_column(resume: &Resume) -> Nodes {
    let mut nodes = entry_section("Education", &resume.education);
    nodes.extend(entry_section("Certificates", &resume.certificates));
    if !resume.languages.is_empty() {
        nodes.push(section_header("Languages"));
        nodes.extend(resume.languages.iter().flat_map(language_nodes));
    }
    nodes
}

/// Skills, experience, projects and interests.
pub fn right_column(resume: &Resume, options: &LayoutOptions, width: f32) -> Nodes {
    let mut nodes = badge_section("Skills", &resume.skills, options, width);
    if !nodes.is_empty() {
        nodes.push(boxed(Spacer::new(1.0, ENTRY_GAP)));
    }
    nodes.extend(entry_section("Experiences", &resume.experience));
    nodes.extend(entry_section("Personal Projects", &resume.projects));
    nodes.extend(badge_section("Interests", &resume.interests, options, width));
    nodes
}

#[cfg(test)]
mod tests {
    use pdf_writer::Ref;

    use super::*;
    use crate::layout::frame::Frame;
    use crate::render::canvas::XObject;
    use crate::render::document::DocumentInfo;

    fn resume() -> Resume {
        Resume::builtin().unwrap()
    }

    fn icon() -> XObject {
        XObject {
            name: "Im2".to_string(),
            id: Ref::new(11),
            width: 24.0,
            height: 24.0,
            unit_square: true,
        }
    }

    fn texts(nodes: &Nodes) -> Vec<String> {
        nodes.iter().map(|n| format!("{n:?}")).collect()
    }

    #[test]
    fn test_contact_row_keeps_footprint_without_icon() {
        let contact = &resume().profile.contacts[0];
        let with_icon = contact_row(contact, Resource::Loaded(icon()));
        let without_icon = contact_row(contact, Resource::Absent);

        let width = CONTACT_COLUMN;
        assert_eq!(with_icon.column_widths(width), without_icon.column_widths(width));
        assert_eq!(without_icon.column_widths(width)[1], ICON_COLUMN);
        assert_eq!(with_icon.wrap(width), without_icon.wrap(width));
    }

    #[test]
    fn test_left_column_section_order() {
        let left = texts(&left_column(&resume()));
        let position = |needle: &str| left.iter().position(|t| t.contains(needle)).unwrap();
        assert!(position("EDUCATION") < position("CERTIFICATES"));
        assert!(position("CERTIFICATES") < position("LANGUAGES"));
    }

    #[test]
    fn test_right_column_section_order() {
        let right = texts(&right_column(&resume(), &LayoutOptions::default(), 269.0));
        let position = |needle: &str| right.iter().position(|t| t.contains(needle)).unwrap();
        assert!(position("SKILLS") < position("EXPERIENCES"));
        assert!(position("EXPERIENCES") < position("PERSONAL PROJECTS"));
        assert!(position("PERSONAL PROJECTS") < position("INTERESTS"));
    }

    #[test]
    fn test_pairs_mode_gives_seven_skill_rows() {
        let options = LayoutOptions {
            badge_rows: BadgeRows::Pairs,
            badge_width: BadgeWidth::Estimated,
        };
        let nodes = badge_section("Skills", &resume().skills, &options, 269.0);
        let tables = nodes.iter().filter(|n| n.kind() == "table").count();
        assert_eq!(resume().skills.len(), 14);
        assert_eq!(tables, 7);
    }

    #[test]
    fn test_education_details_are_bulleted() {
        let nodes = entry_nodes(&resume().education[0]);
        let bullets = texts(&nodes)
            .into_iter()
            .filter(|t| t.contains('\u{2022}'))
            .count();
        assert_eq!(bullets, resume().education[0].details.len());
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let mut sparse = resume();
        sparse.certificates.clear();
        sparse.interests.clear();
        let left = texts(&left_column(&sparse));
        assert!(!left.iter().any(|t| t.contains("CERTIFICATES")));
        let right = texts(&right_column(&sparse, &LayoutOptions::default(), 269.0));
        assert!(!right.iter().any(|t| t.contains("INTERESTS")));
    }

    #[test]
    fn test_story_shape_with_missing_resources() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = PdfDocument::new(595.0, 842.0, &DocumentInfo::default());
        let story = build_story(
            &resume(),
            &mut doc,
            &ResourceDir::new(dir.path()),
            &LayoutOptions::default(),
            Frame::page_body().width,
        );
        let kinds: Vec<&str> = story.iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, ["table", "spacer", "rule", "spacer", "columns"]);
    }
}
