use crate::style::TextAlign;

use super::{LineMetrics, PlacedGlyph};

/// Compute each line's offset against the widest line, `max_width`.
///
/// For [`TextAlign::Justify`] the offset is the extra space per interior
/// whitespace character; [`glyph_offset`] multiplies it by the glyph's
/// preceding space count.
pub fn resolve_offsets(lines: &mut [LineMetrics], align: TextAlign, max_width: f32) {
    for line in lines {
        let slack = max_width - line.width;
        line.offset = match align {
            TextAlign::Start => 0.0,
            TextAlign::End => slack,
            TextAlign::Center => slack / 2.0,
            TextAlign::Justify => match line.spaces {
                Some(spaces) if spaces > 0 => slack / spaces as f32,
                _ => 0.0,
            },
        };
    }
}

/// Horizontal shift for `glyph` once offsets are resolved.
#[inline]
pub fn glyph_offset(glyph: &PlacedGlyph, lines: &[LineMetrics], align: TextAlign) -> f32 {
    let Some(line) = lines.get(glyph.line as usize) else {
        return 0.0;
    };
    match align {
        TextAlign::Justify => line.offset * glyph.prev_spaces as f32,
        _ => line.offset,
    }
}
