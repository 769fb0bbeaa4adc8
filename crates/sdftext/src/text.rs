use std::sync::Arc;

use sdftext_core::geometry::Size;
use sdftext_core::math::{Affine2, Vec2};
use sdftext_core::profiling::profile_function;

use crate::batch::{BatchEvent, BatchSet, BuildParams, PageBatch};
use crate::chars::normalize_into;
use crate::config::BatchConfig;
use crate::error::{TextError, TextResult};
use crate::font::{FontMetrics, FontRegistry};
use crate::layout::{GlyphLayout, LayoutParams, break_lines, resolve_offsets};
use crate::style::TextStyle;
use crate::uniforms::SdfUniforms;

/// A paragraph of SDF bitmap-font text.
///
/// Layout runs synchronously whenever text or a layout-affecting style field
/// changes, so geometry read right after a setter is always current.
/// Buffers (code points, placements, page batches) are kept between passes.
///
/// # Example
///
/// ```ignore
/// let mut text = SdfText::new("Hello world", TextStyle::new("body").size(24.0), &fonts)?;
/// text.set_max_width(120.0);
/// for batch in text.batches() {
///     upload(batch.id(), batch.vertices(), batch.uvs(), batch.indices());
/// }
/// let uniforms = text.frame_uniforms(&transform, 1.0);
/// ```
pub struct SdfText {
    text: String,
    style: TextStyle,
    font: Arc<dyn FontMetrics>,
    anchor: Vec2,

    chars: Vec<char>,
    layout: GlyphLayout,
    batches: BatchSet,

    measured: Size<f32>,
    max_line_height: f32,
    pivot: Vec2,
    layout_passes: u64,
}

impl SdfText {
    /// Create a text using the font registered under `style.font`.
    pub fn new(
        text: impl Into<String>,
        style: TextStyle,
        fonts: &FontRegistry,
    ) -> TextResult<Self> {
        style.validate()?;
        let font = fonts.resolve(&style)?;
        check_font(font.as_ref())?;
        Ok(Self::build(text.into(), style, font))
    }

    /// Create a text with an explicit font. `style.font` is only a label.
    pub fn with_font(
        text: impl Into<String>,
        style: TextStyle,
        font: Arc<dyn FontMetrics>,
    ) -> TextResult<Self> {
        style.validate()?;
        check_font(font.as_ref())?;
        Ok(Self::build(text.into(), style, font))
    }

    /// Replace the batch retention policy. Takes effect on the next layout.
    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.batches.set_config(config);
        self
    }

    fn build(text: String, style: TextStyle, font: Arc<dyn FontMetrics>) -> Self {
        let mut this = Self {
            text,
            style,
            font,
            anchor: Vec2::ZERO,
            chars: Vec::new(),
            layout: GlyphLayout::new(),
            batches: BatchSet::new(BatchConfig::default()),
            measured: Size::new(0.0, 0.0),
            max_line_height: 0.0,
            pivot: Vec2::ZERO,
            layout_passes: 0,
        };
        this.relayout();
        this
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        if self.text == text {
            return;
        }
        self.text.clear();
        self.text.push_str(text);
        self.relayout();
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Edit the style in place.
    ///
    /// Layout is redone only when a field other than the effects changed.
    /// An invalid result is rejected and the previous style kept. Changing
    /// the font name needs [`update_style_with`](Self::update_style_with).
    pub fn update_style(&mut self, edit: impl FnOnce(&mut TextStyle)) -> TextResult<()> {
        let mut next = self.style.clone();
        edit(&mut next);
        if next.font != self.style.font {
            return rejected(TextError::InvalidStyle(format!(
                "font '{}' cannot be resolved without a registry",
                next.font
            )));
        }
        self.apply_style(next, None)
    }

    /// Edit the style in place, resolving a changed font name in `fonts`.
    ///
    /// An unknown font is rejected like any other invalid style.
    pub fn update_style_with(
        &mut self,
        fonts: &FontRegistry,
        edit: impl FnOnce(&mut TextStyle),
    ) -> TextResult<()> {
        let mut next = self.style.clone();
        edit(&mut next);
        if next.font == self.style.font {
            return self.apply_style(next, None);
        }
        match fonts.resolve(&next) {
            Ok(font) => self.apply_style(next, Some(font)),
            Err(err) => rejected(err),
        }
    }

    fn apply_style(
        &mut self,
        next: TextStyle,
        font: Option<Arc<dyn FontMetrics>>,
    ) -> TextResult<()> {
        let mut checked = next.validate();
        if let (Ok(()), Some(font)) = (&checked, &font) {
            checked = check_font(font.as_ref());
        }
        if let Err(err) = checked {
            return rejected(err);
        }

        let relayout = font.is_some() || self.style.layout_differs(&next);
        if let Some(font) = font {
            self.font = font;
        }
        self.style = next;
        if relayout {
            self.relayout();
        }
        Ok(())
    }

    pub fn font(&self) -> &Arc<dyn FontMetrics> {
        &self.font
    }

    /// Switch to `font`, registered as `name`.
    pub fn set_font(
        &mut self,
        name: impl Into<String>,
        font: Arc<dyn FontMetrics>,
    ) -> TextResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(TextError::InvalidStyle("font name is empty".into()));
        }
        check_font(font.as_ref())?;
        self.style.font = name;
        self.font = font;
        self.relayout();
        Ok(())
    }

    pub fn set_max_width(&mut self, max_width: f32) {
        if self.style.max_width == max_width {
            return;
        }
        self.style.max_width = max_width;
        self.relayout();
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Set the anchor as a fraction of the measured size, `(0, 0)` being the
    /// top-left corner and `(1, 1)` the bottom-right one.
    pub fn set_anchor(&mut self, anchor: Vec2) {
        if self.anchor == anchor {
            return;
        }
        self.anchor = anchor;
        self.relayout();
    }

    /// Size of the text block in render pixels.
    pub fn measured_size(&self) -> Size<f32> {
        self.measured
    }

    /// Lowest glyph edge relative to its line, in render pixels.
    pub fn max_line_height(&self) -> f32 {
        self.max_line_height
    }

    /// Offset centering the block on its line spacing.
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    pub fn line_count(&self) -> u32 {
        self.layout.line_count
    }

    /// Number of visible glyphs.
    pub fn glyph_count(&self) -> usize {
        self.layout.glyphs.len()
    }

    pub fn layout(&self) -> &GlyphLayout {
        &self.layout
    }

    pub fn batches(&self) -> &[PageBatch] {
        self.batches.batches()
    }

    pub fn drain_batch_events(&mut self) -> std::vec::Drain<'_, BatchEvent> {
        self.batches.drain_events()
    }

    /// Number of layout passes run since creation.
    pub fn layout_passes(&self) -> u64 {
        self.layout_passes
    }

    /// Requested font size over the font's native size.
    pub fn font_scale(&self) -> f32 {
        self.style.font_size / self.font.size()
    }

    /// Shader parameters for this frame, or `None` when there is nothing to draw.
    pub fn frame_uniforms(
        &self,
        world_transform: &Affine2,
        resolution: f32,
    ) -> Option<SdfUniforms> {
        if self.batches.batches().is_empty() {
            return None;
        }
        Some(SdfUniforms::compute(
            &self.style.effects,
            world_transform,
            self.font.distance_field_range(),
            self.font_scale(),
            resolution,
        ))
    }

    fn relayout(&mut self) {
        profile_function!();
        let scale = self.font_scale();
        let params = LayoutParams {
            max_width: if self.style.wraps() {
                self.style.max_width / scale
            } else {
                0.0
            },
            letter_spacing: self.style.letter_spacing,
            line_spacing: self.style.line_spacing,
            justify_last_line: self.style.justify_last_line,
        };

        normalize_into(&self.text, &mut self.chars);
        break_lines(&self.chars, self.font.as_ref(), &params, &mut self.layout);
        let widest = self.layout.max_line_width;
        resolve_offsets(&mut self.layout.lines, self.style.align, widest);

        let build = BuildParams {
            scale,
            align: self.style.align,
            round_pixels: self.style.round_pixels,
            anchor: self.anchor,
            line_advance: self.font.line_height() + self.style.line_spacing,
        };
        self.measured = self.batches.rebuild(&self.layout, &build);
        self.max_line_height = self.layout.max_glyph_bottom * scale;
        self.pivot = Vec2::new(0.0, -self.style.line_spacing * 0.5 * scale);
        self.layout_passes += 1;

        tracing::debug!(
            "Laid out {} glyphs on {} lines across {} pages ({}x{})",
            self.layout.glyphs.len(),
            self.layout.line_count,
            self.batches.batches().len(),
            self.measured.width,
            self.measured.height
        );
    }
}

/// Reject fonts whose native size would make the scale meaningless.
fn check_font(font: &dyn FontMetrics) -> TextResult<()> {
    let size = font.size();
    if size > 0.0 && size.is_finite() {
        Ok(())
    } else {
        Err(TextError::InvalidStyle(format!(
            "font native size must be positive, got {}",
            size
        )))
    }
}

fn rejected(err: TextError) -> TextResult<()> {
    tracing::warn!("Rejected style update: {}", err);
    Err(err)
}

impl std::fmt::Debug for SdfText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdfText")
            .field("text", &self.text)
            .field("style", &self.style)
            .field("anchor", &self.anchor)
            .field("measured", &self.measured)
            .field("batches", &self.batches.batches().len())
            .finish_non_exhaustive()
    }
}
