//! Frames and pagination.
//!
//! `stack` is the single placement rule shared by pages, table cells and the
//! two-column body: nodes go top-down, the gap between two nodes is the first
//! node's space-after plus the second's space-before, and nothing is added
//! above the first node in a frame. A node that does not fit is split if it
//! can be, otherwise it waits for the next frame.

use std::collections::VecDeque;

use serde::Serialize;

use crate::errors::CvError;
use crate::layout::flowable::{Flowable, Size, Split};
use crate::layout::styles::{PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH};
use crate::render::canvas::Canvas;

const EPSILON: f32 = 1e-3;

/// A rectangular region that flowables are stacked into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Frame {
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    /// The body frame of an A4 page inside the standard margins.
    pub fn page_body() -> Self {
        Frame {
            x: PAGE_MARGIN,
            top: PAGE_HEIGHT - PAGE_MARGIN,
            width: PAGE_WIDTH - 2.0 * PAGE_MARGIN,
            height: PAGE_HEIGHT - 2.0 * PAGE_MARGIN,
        }
    }
}

/// A node placed in a frame, `offset` below the frame top.
#[derive(Debug)]
pub struct Stacked {
    pub node: Box<dyn Flowable>,
    pub offset: f32,
    pub size: Size,
}

/// Offsets and sizes of `nodes` stacked without a height limit.
/// Returns the placements and the total height.
pub fn column_layout(nodes: &[Box<dyn Flowable>], width: f32) -> (Vec<(f32, Size)>, f32) {
    let mut placements = Vec::with_capacity(nodes.len());
    let mut cursor = 0.0_f32;
    let mut prev_after = 0.0_f32;

    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            cursor += prev_after + node.space_before();
        }
        let size = node.wrap(width);
        placements.push((cursor, size));
        cursor += size.height;
        prev_after = node.space_after();
    }
    (placements, cursor)
}

/// Draws `nodes` stacked down from (x, top).
pub fn draw_column(nodes: &[Box<dyn Flowable>], canvas: &mut Canvas, x: f32, top: f32, width: f32) {
    let (placements, _) = column_layout(nodes, width);
    for (node, (offset, _)) in nodes.iter().zip(placements) {
        node.draw(canvas, x, top - offset, width);
    }
}

/// Moves nodes from the front of `queue` into a frame `width` × `height`.
///
/// Stops at the first node that neither fits nor splits; that node (or the
/// tail of a split) is left at the front of the queue.
pub fn stack(queue: &mut VecDeque<Box<dyn Flowable>>, width: f32, height: f32) -> Vec<Stacked> {
    let mut placed: Vec<Stacked> = Vec::new();
    let mut cursor = 0.0_f32;
    let mut prev_after = 0.0_f32;

    while let Some(node) = queue.pop_front() {
        let gap = if placed.is_empty() {
            0.0
        } else {
            prev_after + node.space_before()
        };
        let size = node.wrap(width);

        if cursor + gap + size.height <= height + EPSILON {
            prev_after = node.space_after();
            placed.push(Stacked {
                node,
                offset: cursor + gap,
                size,
            });
            cursor += gap + size.height;
            continue;
        }

        let remaining = height - cursor - gap;
        if remaining <= EPSILON {
            queue.push_front(node);
            break;
        }
        match node.split(width, remaining) {
            Split::Parts(head, tail) => {
                let size = head.wrap(width);
                placed.push(Stacked {
                    node: head,
                    offset: cursor + gap,
                    size,
                });
                queue.push_front(tail);
            }
            Split::Whole(node) => queue.push_front(node),
        }
        break;
    }
    placed
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Where a node ended up on a page, in PDF coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub kind: &'static str,
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug)]
pub struct PagePlan {
    pub frame: Frame,
    pub items: Vec<Stacked>,
}

impl PagePlan {
    pub fn geometry(&self) -> Vec<Placement> {
        self.items
            .iter()
            .map(|item| Placement {
                kind: item.node.kind(),
                x: self.frame.x,
                top: self.frame.top - item.offset,
                width: item.size.width,
                height: item.size.height,
            })
            .collect()
    }

    pub fn paint(&self, canvas: &mut Canvas) {
        for item in &self.items {
            item.node
                .draw(canvas, self.frame.x, self.frame.top - item.offset, self.frame.width);
        }
    }
}

/// Flows the story into as many frames as it needs.
///
/// An empty story yields one blank page. A node that cannot be placed even on
/// an empty page is a layout error.
pub fn paginate(story: Vec<Box<dyn Flowable>>, frame: Frame) -> Result<Vec<PagePlan>, CvError> {
    let mut queue: VecDeque<Box<dyn Flowable>> = story.into();
    let mut pages = Vec::new();

    loop {
        let items = stack(&mut queue, frame.width, frame.height);
        if items.is_empty() {
            if let Some(stuck) = queue.front() {
                let size = stuck.wrap(frame.width);
                return Err(CvError::Layout(format!(
                    "{} of height {:.1}pt does not fit a {:.1}pt frame on page {}",
                    stuck.kind(),
                    size.height,
                    frame.height,
                    pages.len() + 1
                )));
            }
        }
        pages.push(PagePlan { frame, items });
        if queue.is_empty() {
            break;
        }
    }
    Ok(pages)
}
