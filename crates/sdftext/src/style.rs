use crate::effects::SdfEffects;
use crate::error::{TextError, TextResult};

/// Horizontal alignment of lines within the text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
    /// Stretch inter-word spacing so wrapped lines fill the widest line.
    Justify,
}

/// Style of an [`SdfText`](crate::SdfText).
///
/// Spacing values are in the font's native pixels, `max_width` and
/// `font_size` in render pixels.
///
/// ```
/// use sdftext::{TextAlign, TextStyle};
///
/// let style = TextStyle::new("body")
///     .size(24.0)
///     .max_width(300.0)
///     .align(TextAlign::Justify)
///     .line_spacing(4.0);
/// assert_eq!(style.font_size, 24.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Registered name of the font.
    pub font: String,
    pub font_size: f32,
    /// Wrap width; zero or negative disables wrapping.
    pub max_width: f32,
    pub align: TextAlign,
    /// Justify paragraph-final lines too.
    pub justify_last_line: bool,
    pub letter_spacing: f32,
    /// Extra space between lines.
    pub line_spacing: f32,
    /// Snap horizontal glyph positions to whole native pixels.
    pub round_pixels: bool,
    pub effects: SdfEffects,
}

impl TextStyle {
    pub fn new(font: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            font_size: 16.0,
            max_width: 0.0,
            align: TextAlign::Start,
            justify_last_line: false,
            letter_spacing: 0.0,
            line_spacing: 0.0,
            round_pixels: false,
            effects: SdfEffects::default(),
        }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn max_width(mut self, width: f32) -> Self {
        self.max_width = width;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn justify_last_line(mut self, enable: bool) -> Self {
        self.justify_last_line = enable;
        self
    }

    pub fn letter_spacing(mut self, spacing: f32) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    pub fn round_pixels(mut self, enable: bool) -> Self {
        self.round_pixels = enable;
        self
    }

    pub fn effects(mut self, effects: SdfEffects) -> Self {
        self.effects = effects;
        self
    }

    pub fn wraps(&self) -> bool {
        self.max_width > 0.0
    }

    /// Whether switching from `self` to `other` invalidates glyph geometry.
    pub fn layout_differs(&self, other: &TextStyle) -> bool {
        self.font != other.font
            || self.font_size != other.font_size
            || self.max_width != other.max_width
            || self.align != other.align
            || self.justify_last_line != other.justify_last_line
            || self.letter_spacing != other.letter_spacing
            || self.line_spacing != other.line_spacing
            || self.round_pixels != other.round_pixels
    }

    pub(crate) fn validate(&self) -> TextResult<()> {
        if self.font.is_empty() {
            return Err(TextError::InvalidStyle("font name is empty".into()));
        }
        if !(self.font_size > 0.0) || !self.font_size.is_finite() {
            return Err(TextError::InvalidStyle(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}
