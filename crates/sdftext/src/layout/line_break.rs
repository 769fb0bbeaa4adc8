//! Greedy line breaking with backtracking to the last whitespace.

use sdftext_core::math::Vec2;
use sdftext_core::profiling::profile_function;

use crate::chars::{CharKind, CharStream};
use crate::font::FontMetrics;

use super::{GlyphLayout, LayoutParams, PlacedGlyph};

/// Last whitespace seen on the current line.
#[derive(Debug, Clone, Copy)]
struct BreakPoint {
    index: usize,
    width: f32,
}

/// Running state of the line being filled.
#[derive(Debug)]
struct LineCursor {
    pen: Vec2,
    line: u32,
    width: f32,
    prev: Option<char>,
    spaces: u32,
    last_break: Option<BreakPoint>,
}

impl LineCursor {
    fn new() -> Self {
        Self {
            pen: Vec2::ZERO,
            line: 0,
            width: 0.0,
            prev: None,
            spaces: 0,
            last_break: None,
        }
    }

    fn next_line(&mut self, line_advance: f32) {
        self.line += 1;
        self.pen = Vec2::new(0.0, self.pen.y + line_advance);
        self.width = 0.0;
        self.prev = None;
        self.spaces = 0;
        self.last_break = None;
    }
}

/// Interior space count of the current line, read from its last glyph.
fn interior_spaces(out: &GlyphLayout, line: u32) -> u32 {
    out.glyphs
        .last()
        .filter(|g| g.line == line)
        .map_or(0, |g| g.prev_spaces)
}

/// Split `chars` into lines and place every glyph the font knows.
///
/// `chars` must be normalized (see [`normalize_into`](crate::chars::normalize_into)).
/// Glyphs missing from the font are skipped and take no space. A word wider
/// than `max_width` is never split; it overflows on its own line.
pub fn break_lines<F: FontMetrics + ?Sized>(
    chars: &[char],
    font: &F,
    params: &LayoutParams,
    out: &mut GlyphLayout,
) {
    profile_function!();
    out.clear();

    let line_advance = font.line_height() + params.line_spacing;
    let wrap = params.max_width > 0.0;
    let paragraph_spaces = |out: &GlyphLayout, line: u32| {
        params
            .justify_last_line
            .then(|| interior_spaces(out, line))
    };

    let mut stream = CharStream::new(chars);
    let mut cursor = LineCursor::new();

    while let Some((index, code, kind)) = stream.next() {
        match kind {
            CharKind::LineBreak => {
                let spaces = paragraph_spaces(out, cursor.line);
                out.close_line(cursor.width, spaces);
                cursor.next_line(line_advance);
                continue;
            }
            CharKind::Whitespace => {
                cursor.last_break = Some(BreakPoint {
                    index,
                    width: cursor.width,
                });
                cursor.spaces += 1;
                if let Some(metrics) = font.glyph(code) {
                    if let Some(prev) = cursor.prev {
                        cursor.pen.x += metrics.kerning_after(prev);
                    }
                    cursor.pen.x += metrics.x_advance + params.letter_spacing;
                    cursor.prev = Some(code);
                }
                continue;
            }
            CharKind::Regular => {}
        }

        let Some(metrics) = font.glyph(code) else {
            tracing::trace!("No glyph for {:?}, skipping", code);
            continue;
        };

        if let Some(prev) = cursor.prev {
            cursor.pen.x += metrics.kerning_after(prev);
        }

        let position = Vec2::new(
            cursor.pen.x + metrics.x_offset + params.letter_spacing / 2.0,
            cursor.pen.y + metrics.y_offset,
        );
        out.glyphs.push(PlacedGlyph::new(
            code,
            metrics,
            cursor.line,
            position,
            cursor.spaces,
            index,
        ));

        cursor.width = position.x + metrics.orig_width;
        cursor.pen.x += metrics.x_advance + params.letter_spacing;
        cursor.prev = Some(code);
        out.max_glyph_bottom = out
            .max_glyph_bottom
            .max(metrics.y_offset + metrics.frame.height);

        if !wrap || cursor.pen.x <= params.max_width {
            continue;
        }
        let Some(brk) = cursor.last_break else {
            continue;
        };

        while out
            .glyphs
            .last()
            .is_some_and(|g| g.source_index > brk.index)
        {
            out.glyphs.pop();
        }
        let spaces = interior_spaces(out, cursor.line);
        out.close_line(brk.width, Some(spaces));
        cursor.next_line(line_advance);
        stream.rewind_to(brk.index + 1);
    }

    match stream.last_char() {
        Some('\n') => {}
        last => {
            if last.is_some_and(|c| CharKind::of(c) == CharKind::Whitespace) {
                if let Some(brk) = cursor.last_break {
                    cursor.width = brk.width;
                }
            }
            let spaces = paragraph_spaces(out, cursor.line);
            out.close_line(cursor.width, spaces);
        }
    }
    out.line_count = cursor.line + 1;
}
