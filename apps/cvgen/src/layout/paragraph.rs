//! Styled, word-wrapped text blocks.
//!
//! A paragraph is a sequence of spans; each span may override the face and
//! colour of the paragraph style. Lines are broken greedily on whitespace using
//! the static Helvetica metrics, `\n` forces a break, and a word wider than the
//! line is kept whole. Paragraphs split between lines.

use crate::layout::flowable::{Flowable, Size, Split};
use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::styles::{Align, Color, ParagraphStyle};
use crate::render::canvas::Canvas;

/// Tolerance for floating-point comparisons against available space.
const EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub face: Option<FontFace>,
    pub color: Option<Color>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            face: None,
            color: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Span {
            face: Some(FontFace::HelveticaBold),
            ..Span::plain(text)
        }
    }

    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Span {
            color: Some(color),
            ..Span::plain(text)
        }
    }
}

/// Consecutive words of one face and colour on a line.
#[derive(Debug, Clone, PartialEq)]
struct Run {
    text: String,
    face: FontFace,
    color: Color,
    width: f32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    runs: Vec<Run>,
    width: f32,
}

impl Line {
    fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    fn push_word(&mut self, word: &str, leading_space: bool, face: FontFace, color: Color, width: f32) {
        match self.runs.last_mut() {
            Some(run) if run.face == face && run.color == color => {
                if leading_space {
                    run.text.push(' ');
                }
                run.text.push_str(word);
                run.width += width;
            }
            _ => {
                let mut text = String::with_capacity(word.len() + 1);
                if leading_space {
                    text.push(' ');
                }
                text.push_str(word);
                self.runs.push(Run {
                    text,
                    face,
                    color,
                    width,
                });
            }
        }
        self.width += width;
    }

    #[cfg(test)]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[cfg(test)]
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    spans: Vec<Span>,
    style: ParagraphStyle,
    /// Lines fixed by a previous split; used instead of re-breaking.
    broken: Option<Vec<Line>>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Paragraph::rich(vec![Span::plain(text)], style)
    }

    pub fn rich(spans: Vec<Span>, style: ParagraphStyle) -> Self {
        Paragraph {
            spans,
            style,
            broken: None,
        }
    }

    /// Breaks the paragraph into lines for a container `avail_width` wide.
    pub fn lines(&self, avail_width: f32) -> Vec<Line> {
        if let Some(lines) = &self.broken {
            return lines.clone();
        }

        let size = self.style.size;
        let max_width = (avail_width - self.style.left_indent).max(0.0);
        let mut lines: Vec<Line> = Vec::new();
        let mut line = Line::default();
        let mut pending_space = false;

        for span in &self.spans {
            let face = span.face.unwrap_or(self.style.face);
            let color = span.color.unwrap_or(self.style.color);
            let metrics = get_metrics(face);

            for (segment_index, segment) in span.text.split('\n').enumerate() {
                if segment_index > 0 {
                    lines.push(std::mem::take(&mut line));
                    pending_space = false;
                }
                if segment.starts_with(char::is_whitespace) {
                    pending_space = true;
                }
                for (word_index, word) in segment.split_whitespace().enumerate() {
                    if word_index > 0 {
                        pending_space = true;
                    }
                    let word_w = metrics.measure_pt(word, size);
                    let mut space_w = if pending_space && !line.is_empty() {
                        metrics.space_width * size
                    } else {
                        0.0
                    };
                    if !line.is_empty() && line.width + space_w + word_w > max_width + EPSILON {
                        lines.push(std::mem::take(&mut line));
                        space_w = 0.0;
                    }
                    line.push_word(word, space_w > 0.0, face, color, word_w + space_w);
                    pending_space = false;
                }
                if segment.ends_with(char::is_whitespace) {
                    pending_space = true;
                }
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }

    pub fn line_count(&self, avail_width: f32) -> usize {
        self.lines(avail_width).len()
    }

    fn from_lines(lines: Vec<Line>, style: ParagraphStyle) -> Paragraph {
        Paragraph {
            spans: Vec::new(),
            style,
            broken: Some(lines),
        }
    }
}

impl Flowable for Paragraph {
    fn kind(&self) -> &'static str {
        "paragraph"
    }

    fn wrap(&self, avail_width: f32) -> Size {
        let lines = self.line_count(avail_width);
        Size::new(avail_width, lines as f32 * self.style.leading)
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, top: f32, width: f32) {
        let style = &self.style;
        let cap_height = get_metrics(style.face).cap_height * style.size;
        let avail = (width - style.left_indent).max(0.0);

        for (i, line) in self.lines(width).iter().enumerate() {
            let line_top = top - i as f32 * style.leading;
            let baseline = line_top - (style.leading + cap_height) / 2.0;
            let offset = match style.align {
                Align::Left => 0.0,
                Align::Center => (avail - line.width) / 2.0,
                Align::Right => avail - line.width,
            };
            let mut cursor = x + style.left_indent + offset;
            for run in &line.runs {
                canvas.show_text(cursor, baseline, run.face, style.size, run.color, &run.text);
                cursor += run.width;
            }
        }
    }

    fn split(self: Box<Self>, width: f32, height: f32) -> Split {
        let lines = self.lines(width);
        let fit = ((height + EPSILON) / self.style.leading).floor() as usize;
        if fit == 0 || fit >= lines.len() {
            return Split::Whole(self);
        }

        let mut head_lines = lines;
        let tail_lines = head_lines.split_off(fit);
        let head_style = ParagraphStyle {
            space_after: 0.0,
            ..self.style
        };
        let tail_style = ParagraphStyle {
            space_before: 0.0,
            ..self.style
        };
        Split::Parts(
            Box::new(Paragraph::from_lines(head_lines, head_style)),
            Box::new(Paragraph::from_lines(tail_lines, tail_style)),
        )
    }

    fn space_before(&self) -> f32 {
        self.style.space_before
    }

    fn space_after(&self) -> f32 {
        self.style.space_after
    }
}
