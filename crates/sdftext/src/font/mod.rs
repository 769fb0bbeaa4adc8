//! Font metrics source.
//!
//! Layout only needs read access to per-glyph metrics and a few font-wide
//! constants, expressed by [`FontMetrics`]. [`BitmapFont`] is the in-memory
//! implementation, built programmatically or parsed from a BMFont descriptor.
//! Fonts are shared between text instances through [`FontRegistry`].

mod fnt;

use std::sync::Arc;

use sdftext_core::alloc::HashMap;
use sdftext_core::geometry::{Rect, Size};
use sdftext_core::math::Vec2;

use crate::error::{TextError, TextResult};
use crate::style::TextStyle;

/// Distance field range assumed when a font does not declare one.
pub const DEFAULT_DISTANCE_FIELD_RANGE: f32 = 4.0;

/// Index of an atlas page (texture) within a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PageId(pub u32);

/// Read-only access to the metrics of a distance field bitmap font.
pub trait FontMetrics: Send + Sync {
    /// Metrics for `code`, or `None` when the font has no glyph for it.
    fn glyph(&self, code: char) -> Option<&GlyphMetrics>;

    /// Distance between two baselines, in native pixels.
    fn line_height(&self) -> f32;

    /// Pixel size the atlas was generated at.
    fn size(&self) -> f32;

    /// Spread of the distance field, in atlas pixels.
    fn distance_field_range(&self) -> f32;
}

/// Placement and atlas data for one glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMetrics {
    pub page: PageId,
    /// Pixel rectangle of the glyph inside its atlas page.
    pub frame: Rect<f32>,
    /// Untrimmed glyph width, used for line extents.
    pub orig_width: f32,
    /// Normalized texture coordinates: top-left, top-right, bottom-right, bottom-left.
    pub uvs: [Vec2; 4],
    pub x_advance: f32,
    pub x_offset: f32,
    pub y_offset: f32,
    /// Extra advance keyed by the preceding character.
    pub kerning: HashMap<char, f32>,
}

impl GlyphMetrics {
    /// Glyph occupying `frame` on a page of `page_size` pixels.
    ///
    /// The advance defaults to the frame width and offsets to zero.
    pub fn new(page: PageId, frame: Rect<f32>, page_size: Size<f32>) -> Self {
        let x0 = frame.x / page_size.width;
        let y0 = frame.y / page_size.height;
        let x1 = (frame.x + frame.width) / page_size.width;
        let y1 = (frame.y + frame.height) / page_size.height;

        Self {
            page,
            frame,
            orig_width: frame.width,
            uvs: [
                Vec2::new(x0, y0),
                Vec2::new(x1, y0),
                Vec2::new(x1, y1),
                Vec2::new(x0, y1),
            ],
            x_advance: frame.width,
            x_offset: 0.0,
            y_offset: 0.0,
            kerning: HashMap::new(),
        }
    }

    pub fn advance(mut self, x_advance: f32) -> Self {
        self.x_advance = x_advance;
        self
    }

    pub fn offset(mut self, x_offset: f32, y_offset: f32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Add `amount` to the advance whenever this glyph follows `prev`.
    pub fn kern(mut self, prev: char, amount: f32) -> Self {
        self.kerning.insert(prev, amount);
        self
    }

    #[inline]
    pub fn kerning_after(&self, prev: char) -> f32 {
        self.kerning.get(&prev).copied().unwrap_or(0.0)
    }
}

/// An SDF bitmap font held in memory.
#[derive(Debug, Clone)]
pub struct BitmapFont {
    name: String,
    size: f32,
    line_height: f32,
    distance_field_range: f32,
    pages: Vec<Size<f32>>,
    glyphs: HashMap<char, GlyphMetrics>,
}

impl BitmapFont {
    pub fn builder(name: impl Into<String>, size: f32, line_height: f32) -> BitmapFontBuilder {
        BitmapFontBuilder::new(name, size, line_height)
    }

    /// Parse an AngelCode BMFont text descriptor.
    pub fn from_fnt(source: &str) -> TextResult<Self> {
        fnt::parse(source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pixel sizes of the atlas pages, indexed by [`PageId`].
    pub fn pages(&self) -> &[Size<f32>] {
        &self.pages
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }
}

impl FontMetrics for BitmapFont {
    fn glyph(&self, code: char) -> Option<&GlyphMetrics> {
        self.glyphs.get(&code)
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn size(&self) -> f32 {
        self.size
    }

    fn distance_field_range(&self) -> f32 {
        self.distance_field_range
    }
}

/// Builder for [`BitmapFont`].
///
/// # Example
///
/// ```
/// use sdftext::font::{BitmapFont, FontMetrics, GlyphMetrics};
/// use sdftext_core::geometry::{Rect, Size};
///
/// let mut builder = BitmapFont::builder("mono", 32.0, 40.0);
/// let page = builder.page(Size::new(256.0, 256.0));
/// let font = builder
///     .glyph(
///         'a',
///         GlyphMetrics::new(page, Rect::new(0.0, 0.0, 16.0, 24.0), Size::new(256.0, 256.0)),
///     )
///     .build()
///     .unwrap();
/// assert!(font.glyph('a').is_some());
/// ```
#[derive(Debug)]
pub struct BitmapFontBuilder {
    font: BitmapFont,
}

impl BitmapFontBuilder {
    pub fn new(name: impl Into<String>, size: f32, line_height: f32) -> Self {
        Self {
            font: BitmapFont {
                name: name.into(),
                size,
                line_height,
                distance_field_range: DEFAULT_DISTANCE_FIELD_RANGE,
                pages: Vec::new(),
                glyphs: HashMap::new(),
            },
        }
    }

    pub fn distance_field_range(mut self, range: f32) -> Self {
        self.font.distance_field_range = range;
        self
    }

    /// Register an atlas page and return its id.
    pub fn page(&mut self, size: Size<f32>) -> PageId {
        self.font.pages.push(size);
        PageId(self.font.pages.len() as u32 - 1)
    }

    pub fn glyph(mut self, code: char, metrics: GlyphMetrics) -> Self {
        self.insert_glyph(code, metrics);
        self
    }

    pub fn insert_glyph(&mut self, code: char, metrics: GlyphMetrics) {
        self.font.glyphs.insert(code, metrics);
    }

    pub fn build(self) -> TextResult<BitmapFont> {
        let font = self.font;
        if !(font.size > 0.0) {
            return Err(TextError::InvalidFontData(format!(
                "font '{}' has non-positive size {}",
                font.name, font.size
            )));
        }
        if let Some((code, glyph)) = font
            .glyphs
            .iter()
            .find(|(_, g)| g.page.0 as usize >= font.pages.len())
        {
            return Err(TextError::InvalidFontData(format!(
                "glyph {:?} references missing page {}",
                code, glyph.page.0
            )));
        }
        Ok(font)
    }
}

/// Named fonts available to text instances.
#[derive(Default, Clone)]
pub struct FontRegistry {
    fonts: HashMap<String, Arc<dyn FontMetrics>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `font` under `name`, replacing any previous entry.
    ///
    /// Text instances holding the previous font keep using it until they are
    /// rebuilt.
    pub fn register(&mut self, name: impl Into<String>, font: Arc<dyn FontMetrics>) {
        self.fonts.insert(name.into(), font);
    }

    pub fn insert_bitmap_font(&mut self, font: BitmapFont) -> Arc<dyn FontMetrics> {
        let name = font.name().to_owned();
        let font: Arc<dyn FontMetrics> = Arc::new(font);
        self.register(name, font.clone());
        font
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn FontMetrics>> {
        self.fonts.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub(crate) fn resolve(&self, style: &TextStyle) -> TextResult<Arc<dyn FontMetrics>> {
        self.get(&style.font)
            .ok_or_else(|| TextError::InvalidStyle(format!("unknown font '{}'", style.font)))
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.fonts.keys()).finish()
    }
}

/// Monospaced 10px font: letters on page 0, digits on page 1, 'V' kerned
/// by -2 after 'A'.
#[cfg(test)]
pub(crate) fn test_font() -> BitmapFont {
    let page_size = Size::new(256.0, 256.0);
    let mut builder = BitmapFont::builder("mono", 10.0, 12.0);
    let letters = builder.page(page_size);
    let digits = builder.page(page_size);

    let cell = |i: usize| Rect::new((i % 25) as f32 * 10.0, (i / 25) as f32 * 10.0, 10.0, 10.0);
    for (i, c) in ('a'..='z').chain('A'..='Z').enumerate() {
        let mut glyph = GlyphMetrics::new(letters, cell(i), page_size);
        if c == 'V' {
            glyph = glyph.kern('A', -2.0);
        }
        builder.insert_glyph(c, glyph);
    }
    for (i, c) in ('0'..='9').enumerate() {
        builder.insert_glyph(c, GlyphMetrics::new(digits, cell(i), page_size));
    }
    builder.insert_glyph(
        ' ',
        GlyphMetrics::new(letters, Rect::new(0.0, 250.0, 0.0, 0.0), page_size).advance(10.0),
    );
    builder.build().expect("test font is valid")
}
