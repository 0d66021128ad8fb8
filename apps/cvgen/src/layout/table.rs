//! Single-row tables: side-by-side cells of stacked flowables.
//!
//! Used for the header (name, photo, contacts), for every contact line
//! (text plus icon column) and for rows of skill badges. Tables never split.

use crate::layout::flowable::{Flowable, Size, Split};
use crate::layout::frame::{column_layout, draw_column};
use crate::layout::styles::Align;
use crate::render::canvas::Canvas;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    Fixed(f32),
    /// Shares whatever the fixed and auto columns leave over.
    Fill,
    /// As wide as the widest content plus padding.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Padding {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Default for Padding {
    /// 6pt left and right, 3pt top and bottom.
    fn default() -> Self {
        Padding::new(6.0, 6.0, 3.0, 3.0)
    }
}

#[derive(Debug)]
pub struct Cell {
    content: Vec<Box<dyn Flowable>>,
    align: Align,
}

impl Cell {
    pub fn new(content: Vec<Box<dyn Flowable>>) -> Self {
        Cell {
            content,
            align: Align::Left,
        }
    }

    pub fn single(node: impl Flowable + 'static) -> Self {
        let node: Box<dyn Flowable> = Box::new(node);
        Cell::new(vec![node])
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    fn content_width(&self, avail_width: f32) -> f32 {
        self.content
            .iter()
            .map(|node| node.wrap(avail_width).width)
            .fold(0.0, f32::max)
    }
}

#[derive(Debug)]
pub struct Table {
    cells: Vec<Cell>,
    widths: Vec<ColumnWidth>,
    padding: Padding,
    valign: VAlign,
    /// Placement of the whole table inside a wider container.
    h_align: Align,
}

impl Table {
    /// `widths` must have one entry per cell.
    pub fn row(cells: Vec<Cell>, widths: Vec<ColumnWidth>) -> Self {
        debug_assert_eq!(cells.len(), widths.len(), "one width per cell");
        Table {
            cells,
            widths,
            padding: Padding::default(),
            valign: VAlign::Top,
            h_align: Align::Center,
        }
    }

    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn h_align(mut self, h_align: Align) -> Self {
        self.h_align = h_align;
        self
    }

    /// Resolved column widths for a container `avail_width` wide.
    pub fn column_widths(&self, avail_width: f32) -> Vec<f32> {
        let mut resolved: Vec<Option<f32>> = self
            .cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, width)| match width {
                ColumnWidth::Fixed(w) => Some(*w),
                ColumnWidth::Auto => {
                    let inner = (avail_width - self.padding.horizontal()).max(0.0);
                    Some(cell.content_width(inner) + self.padding.horizontal())
                }
                ColumnWidth::Fill => None,
            })
            .collect();

        let taken: f32 = resolved.iter().flatten().sum();
        let fill_count = resolved.iter().filter(|w| w.is_none()).count();
        if fill_count > 0 {
            let share = ((avail_width - taken) / fill_count as f32).max(0.0);
            for width in resolved.iter_mut().filter(|w| w.is_none()) {
                *width = Some(share);
            }
        }
        resolved.into_iter().map(|w| w.unwrap_or(0.0)).collect()
    }

    fn row_height(&self, widths: &[f32]) -> f32 {
        self.cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| {
                let inner = (width - self.padding.horizontal()).max(0.0);
                column_layout(&cell.content, inner).1 + self.padding.vertical()
            })
            .fold(0.0, f32::max)
    }
}

impl Flowable for Table {
    fn kind(&self) -> &'static str {
        "table"
    }

    fn wrap(&self, avail_width: f32) -> Size {
        let widths = self.column_widths(avail_width);
        Size::new(widths.iter().sum(), self.row_height(&widths))
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32, width: f32) {
        let widths = self.column_widths(width);
        let table_width: f32 = widths.iter().sum();
        let row_height = self.row_height(&widths);

        let mut cell_x = x + match self.h_align {
            Align::Left => 0.0,
            Align::Center => (width - table_width) / 2.0,
            Align::Right => width - table_width,
        };

        for (cell, col_width) in self.cells.iter().zip(&widths) {
            let inner_width = (col_width - self.padding.horizontal()).max(0.0);
            let (placements, content_height) = column_layout(&cell.content, inner_width);
            let slack = row_height - self.padding.vertical() - content_height;
            let content_top = top
                - self.padding.top
                - match self.valign {
                    VAlign::Top => 0.0,
                    VAlign::Middle => slack / 2.0,
                };
            let inner_x = cell_x + self.padding.left;

            if cell.align == Align::Left {
                draw_column(&cell.content, canvas, inner_x, content_top, inner_width);
            } else {
                for (node, (offset, size)) in cell.content.iter().zip(placements) {
                    let shift = inner_width - size.width;
                    let node_x = inner_x
                        + if cell.align == Align::Center {
                            shift / 2.0
                        } else {
                            shift
                        };
                    node.draw(canvas, node_x, content_top - offset, size.width);
                }
            }
            cell_x += col_width;
        }
    }

    fn split(self: Box<Self>, _width: f32, _height: f32) -> Split {
        Split::Whole(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::flowable::Spacer;
    use crate::layout::paragraph::Paragraph;
    use crate::layout::styles::{BODY, CONTACT};
    use crate::render::canvas::PaintOp;

    #[test]
    fn test_fill_column_takes_remaining_width() {
        let table = Table::row(
            vec![
                Cell::single(Paragraph::new("+923000000000", CONTACT)),
                Cell::single(Spacer::new(10.0, 10.0)),
            ],
            vec![ColumnWidth::Fill, ColumnWidth::Fixed(15.0)],
        );
        assert_eq!(table.column_widths(226.0), vec![211.0, 15.0]);
    }

    #[test]
    fn test_auto_column_fits_content_plus_padding() {
        let table = Table::row(
            vec![Cell::single(Spacer::new(40.0, 10.0)), Cell::single(Spacer::new(25.0, 10.0))],
            vec![ColumnWidth::Auto, ColumnWidth::Auto],
        );
        assert_eq!(table.column_widths(300.0), vec![52.0, 37.0]);
        assert_eq!(table.wrap(300.0), Size::new(89.0, 16.0));
    }

    #[test]
    fn test_row_height_is_tallest_cell() {
        let table = Table::row(
            vec![
                Cell::new(vec![
                    Box::new(Paragraph::new("Ubaid", BODY)),
                    Box::new(Paragraph::new("Developer", BODY)),
                ]),
                Cell::single(Spacer::new(10.0, 5.0)),
            ],
            vec![ColumnWidth::Fixed(100.0), ColumnWidth::Fixed(20.0)],
        )
        .padding(Padding::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(table.wrap(500.0).height, 2.0 * BODY.leading + 2.0);
    }

    #[test]
    fn test_fixed_columns_ignore_available_width() {
        let table = Table::row(
            vec![Cell::single(Spacer::new(1.0, 1.0))],
            vec![ColumnWidth::Fixed(80.0)],
        );
        assert_eq!(table.wrap(20.0).width, 80.0);
    }

    #[test]
    fn test_draw_visits_every_cell() {
        let table = Table::row(
            vec![
                Cell::single(Paragraph::new("Lahore", CONTACT)),
                Cell::single(Paragraph::new("x", BODY)).align(Align::Center),
            ],
            vec![ColumnWidth::Fill, ColumnWidth::Fixed(15.0)],
        )
        .valign(VAlign::Middle);
        let mut canvas = Canvas::new();
        table.draw(&mut canvas, 0.0, 800.0, 200.0);
        assert_eq!(canvas.operations(), &[PaintOp::Text, PaintOp::Text]);
    }

    #[test]
    fn test_tables_do_not_split() {
        let table: Box<dyn Flowable> = Box::new(Table::row(
            vec![Cell::single(Spacer::new(1.0, 50.0))],
            vec![ColumnWidth::Fill],
        ));
        assert!(matches!(table.split(100.0, 10.0), Split::Whole(_)));
    }
}
