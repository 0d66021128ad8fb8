//! Skill and interest chips.
//!
//! A badge is a rounded, light-grey rectangle holding a centred white label.
//! Badges are grouped into rows, each row laid out as a left-aligned table.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::flowable::{Flowable, Size, Split, Spacer};
use crate::layout::font_metrics::get_metrics;
use crate::layout::paragraph::Paragraph;
use crate::layout::styles::{Align, BADGE_TEXT, LIGHT_GREY};
use crate::layout::table::{Cell, ColumnWidth, Padding, Table};
use crate::render::canvas::Canvas;

const PADDING_X: f32 = 4.0;
const PADDING_Y: f32 = 2.0;
const CORNER_RADIUS: f32 = 2.0;
/// Vertical gap after each row of badges.
const ROW_GAP: f32 = 2.0;

/// How labels are grouped into rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeRows {
    /// Fill each row until the next badge would overflow the column.
    #[default]
    Wrap,
    /// Exactly two badges per row, regardless of width.
    Pairs,
}

/// How a badge's width is derived from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeWidth {
    /// Measured label width plus horizontal padding.
    #[default]
    Measured,
    /// 4.5pt per character plus 10pt.
    Estimated,
}

impl BadgeWidth {
    pub fn width_for(&self, label: &str) -> f32 {
        match self {
            BadgeWidth::Measured => {
                get_metrics(BADGE_TEXT.face).measure_pt(label, BADGE_TEXT.size) + 2.0 * PADDING_X
            }
            BadgeWidth::Estimated => label.chars().count() as f32 * 4.5 + 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagBadge {
    label: Paragraph,
    text: String,
    width: f32,
}

impl TagBadge {
    pub fn new(text: &str, sizing: BadgeWidth) -> Self {
        TagBadge {
            label: Paragraph::new(text, BADGE_TEXT),
            text: text.to_string(),
            width: sizing.width_for(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    fn inner_width(&self) -> f32 {
        (self.width - 2.0 * PADDING_X).max(0.0)
    }
}

impl Flowable for TagBadge {
    fn kind(&self) -> &'static str {
        "badge"
    }

    fn wrap(&self, _avail_width: f32) -> Size {
        let text_height = self.label.wrap(self.inner_width()).height;
        Size::new(self.width, text_height + 2.0 * PADDING_Y)
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32, _width: f32) {
        let height = self.wrap(self.width).height;
        canvas.fill_rounded_rect(x, top - height, self.width, height, CORNER_RADIUS, LIGHT_GREY);
        self.label
            .draw(canvas, x + PADDING_X, top - PADDING_Y, self.inner_width());
    }

    fn split(self: Box<Self>, _width: f32, _height: f32) -> Split {
        Split::Whole(self)
    }
}

/// Groups labels into rows of badges for a column `avail_width` wide.
pub fn group_badges(
    labels: &[String],
    rows: BadgeRows,
    sizing: BadgeWidth,
    avail_width: f32,
) -> Vec<Vec<TagBadge>> {
    let badges = labels.iter().map(|label| TagBadge::new(label, sizing));
    let cell_padding = Padding::default().horizontal();

    let grouped: Vec<Vec<TagBadge>> = match rows {
        BadgeRows::Pairs => {
            let badges: Vec<TagBadge> = badges.collect();
            badges.chunks(2).map(<[TagBadge]>::to_vec).collect()
        }
        BadgeRows::Wrap => {
            let mut grouped: Vec<Vec<TagBadge>> = Vec::new();
            let mut row: Vec<TagBadge> = Vec::new();
            let mut used = 0.0_f32;
            for badge in badges {
                let cell = badge.width() + cell_padding;
                if !row.is_empty() && used + cell > avail_width {
                    grouped.push(std::mem::take(&mut row));
                    used = 0.0;
                }
                used += cell;
                row.push(badge);
            }
            if !row.is_empty() {
                grouped.push(row);
            }
            grouped
        }
    };

    for row in &grouped {
        let row_width: f32 = row.iter().map(|b| b.width() + cell_padding).sum();
        if row_width > avail_width {
            let labels: Vec<&str> = row.iter().map(TagBadge::text).collect();
            warn!(
                row_width,
                avail_width,
                labels = ?labels,
                "badge row overflows its column"
            );
        }
    }
    grouped
}

/// Lays out grouped badges as left-aligned single-row tables, each followed
/// by a small gap.
pub fn badge_rows(rows: Vec<Vec<TagBadge>>) -> Vec<Box<dyn Flowable>> {
    let mut nodes: Vec<Box<dyn Flowable>> = Vec::with_capacity(rows.len() * 2);
    for row in rows {
        let widths = vec![ColumnWidth::Auto; row.len()];
        let cells = row.into_iter().map(Cell::single).collect();
        nodes.push(Box::new(Table::row(cells, widths).h_align(Align::Left)));
        nodes.push(Box::new(Spacer::new(1.0, ROW_GAP)));
    }
    nodes
}
