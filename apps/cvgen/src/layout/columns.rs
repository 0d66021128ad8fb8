//! Side-by-side column streams that continue across pages.

use std::collections::VecDeque;

use crate::layout::flowable::{Flowable, Size, Split};
use crate::layout::frame::{column_layout, draw_column, stack, Stacked};
use crate::render::canvas::Canvas;

/// Two independent streams laid out next to each other.
///
/// The left column has a fixed width, the right one takes what remains after
/// the gap. When split, each stream keeps its own order: whatever did not fit
/// in a column continues at the top of the same column on the next page.
#[derive(Debug)]
pub struct TwoColumn {
    left: Vec<Box<dyn Flowable>>,
    right: Vec<Box<dyn Flowable>>,
    left_width: f32,
    gap: f32,
}

impl TwoColumn {
    pub fn new(
        left: Vec<Box<dyn Flowable>>,
        right: Vec<Box<dyn Flowable>>,
        left_width: f32,
        gap: f32,
    ) -> Self {
        TwoColumn {
            left,
            right,
            left_width,
            gap,
        }
    }

    pub fn right_width(&self, avail_width: f32) -> f32 {
        (avail_width - self.left_width - self.gap).max(0.0)
    }

    fn into_nodes(placed: Vec<Stacked>) -> Vec<Box<dyn Flowable>> {
        placed.into_iter().map(|item| item.node).collect()
    }
}

impl Flowable for TwoColumn {
    fn kind(&self) -> &'static str {
        "columns"
    }

    fn wrap(&self, avail_width: f32) -> Size {
        let (_, left) = column_layout(&self.left, self.left_width);
        let (_, right) = column_layout(&self.right, self.right_width(avail_width));
        Size::new(avail_width, left.max(right))
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32, width: f32) {
        draw_column(&self.left, canvas, x, top, self.left_width);
        let right_x = x + self.left_width + self.gap;
        draw_column(&self.right, canvas, right_x, top, self.right_width(width));
    }

    fn split(self: Box<Self>, width: f32, height: f32) -> Split {
        let right_width = self.right_width(width);
        let TwoColumn {
            left,
            right,
            left_width,
            gap,
        } = *self;

        let mut left_queue: VecDeque<Box<dyn Flowable>> = left.into();
        let mut right_queue: VecDeque<Box<dyn Flowable>> = right.into();
        let left_head = stack(&mut left_queue, left_width, height);
        let right_head = stack(&mut right_queue, right_width, height);

        let nothing_placed = left_head.is_empty() && right_head.is_empty();
        let all_placed = left_queue.is_empty() && right_queue.is_empty();

        let head = TwoColumn::new(
            TwoColumn::into_nodes(left_head),
            TwoColumn::into_nodes(right_head),
            left_width,
            gap,
        );
        let tail = TwoColumn::new(left_queue.into(), right_queue.into(), left_width, gap);

        if nothing_placed {
            Split::Whole(Box::new(tail))
        } else if all_placed {
            Split::Whole(Box::new(head))
        } else {
            Split::Parts(Box::new(head), Box::new(tail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::flowable::Spacer;
    use crate::layout::paragraph::Paragraph;
    use crate::layout::styles::BODY;

    fn spacers(count: usize, height: f32) -> Vec<Box<dyn Flowable>> {
        (0..count)
            .map(|_| Box::new(Spacer::new(1.0, height)) as Box<dyn Flowable>)
            .collect()
    }

    #[test]
    fn test_height_is_taller_column() {
        let columns = TwoColumn::new(spacers(2, 30.0), spacers(1, 80.0), 100.0, 10.0);
        assert_eq!(columns.wrap(300.0), Size::new(300.0, 80.0));
        assert_eq!(columns.right_width(300.0), 190.0);
    }

    #[test]
    fn test_split_continues_each_stream() {
        let columns = Box::new(TwoColumn::new(spacers(4, 30.0), spacers(1, 50.0), 100.0, 10.0));
        match columns.split(300.0, 70.0) {
            Split::Parts(head, tail) => {
                assert_eq!(head.wrap(300.0).height, 60.0);
                // Right stream finished on the first page; left has two spacers left.
                assert_eq!(tail.wrap(300.0).height, 60.0);
            }
            Split::Whole(_) => panic!("columns should split"),
        }
    }

    #[test]
    fn test_split_when_everything_fits_is_whole() {
        let columns = Box::new(TwoColumn::new(spacers(1, 30.0), spacers(1, 30.0), 100.0, 10.0));
        assert!(matches!(columns.split(300.0, 100.0), Split::Whole(_)));
    }

    #[test]
    fn test_split_when_nothing_fits_is_whole() {
        let columns = Box::new(TwoColumn::new(spacers(1, 90.0), spacers(1, 90.0), 100.0, 10.0));
        match columns.split(300.0, 50.0) {
            Split::Whole(node) => assert_eq!(node.wrap(300.0).height, 90.0),
            Split::Parts(..) => panic!("nothing fits, nothing to split"),
        }
    }

    #[test]
    fn test_split_breaks_long_paragraph_inside_column() {
        let text = "Designed and developed a web application using React js. ".repeat(30);
        let columns = Box::new(TwoColumn::new(
            vec![Box::new(Paragraph::new(text, BODY))],
            Vec::new(),
            120.0,
            10.0,
        ));
        match columns.split(300.0, 10.0 * BODY.leading) {
            Split::Parts(head, _) => assert_eq!(head.wrap(300.0).height, 10.0 * BODY.leading),
            Split::Whole(_) => panic!("paragraph should split within the column"),
        }
    }
}
