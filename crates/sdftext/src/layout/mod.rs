//! Glyph placement: line breaking and horizontal alignment.
//!
//! Everything in here works in the font's native pixel units. Scaling to the
//! requested font size happens when quads are written into page batches.

pub mod align;
pub mod line_break;

use sdftext_core::math::Vec2;

use crate::font::{GlyphMetrics, PageId};

pub use align::{glyph_offset, resolve_offsets};
pub use line_break::break_lines;

/// Inputs of a line breaking pass, in native font pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutParams {
    /// Wrap width; zero or negative disables wrapping.
    pub max_width: f32,
    pub letter_spacing: f32,
    pub line_spacing: f32,
    pub justify_last_line: bool,
}

/// One visible glyph produced by the line breaker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub page: PageId,
    pub line: u32,
    pub code: char,
    /// Top-left corner before alignment and scaling.
    pub position: Vec2,
    /// Quad size in native pixels.
    pub size: Vec2,
    pub uvs: [Vec2; 4],
    /// Whitespace characters seen before this glyph on its line.
    pub prev_spaces: u32,
    /// Index of the glyph in the normalized code point sequence.
    pub source_index: usize,
}

impl PlacedGlyph {
    pub(crate) fn new(
        code: char,
        metrics: &GlyphMetrics,
        line: u32,
        position: Vec2,
        prev_spaces: u32,
        source_index: usize,
    ) -> Self {
        Self {
            page: metrics.page,
            line,
            code,
            position,
            size: Vec2::new(metrics.frame.width, metrics.frame.height),
            uvs: metrics.uvs,
            prev_spaces,
            source_index,
        }
    }
}

/// Measurements of one closed line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Extent of the last visible glyph, trailing whitespace excluded.
    pub width: f32,
    /// Interior whitespace count, `None` when the line must not be justified.
    pub spaces: Option<u32>,
    /// Horizontal offset resolved by [`resolve_offsets`].
    pub offset: f32,
}

/// Result of a line breaking pass.
///
/// Buffers keep their capacity between passes.
#[derive(Debug, Clone, Default)]
pub struct GlyphLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// Closed lines. A trailing empty line after a final `\n` is counted in
    /// `line_count` but has no entry here.
    pub lines: Vec<LineMetrics>,
    pub line_count: u32,
    pub max_line_width: f32,
    /// Lowest glyph edge relative to its line, in native pixels.
    pub max_glyph_bottom: f32,
}

impl GlyphLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.glyphs.clear();
        self.lines.clear();
        self.line_count = 0;
        self.max_line_width = 0.0;
        self.max_glyph_bottom = 0.0;
    }

    pub(crate) fn close_line(&mut self, width: f32, spaces: Option<u32>) {
        self.lines.push(LineMetrics {
            width,
            spaces,
            offset: 0.0,
        });
        self.max_line_width = self.max_line_width.max(width);
    }

    /// Glyphs placed on `line`.
    pub fn line_glyphs(&self, line: u32) -> impl Iterator<Item = &PlacedGlyph> {
        self.glyphs.iter().filter(move |g| g.line == line)
    }
}
