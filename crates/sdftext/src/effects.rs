//! Distance field effects: outline, drop shadow and synthetic bold.
//!
//! Effects never change glyph geometry. Updating them only changes the
//! uniforms computed each frame, so they are kept apart from the layout
//! fields of [`TextStyle`](crate::style::TextStyle).
//!
//! # Example
//!
//! ```
//! use sdftext::effects::SdfEffects;
//! use sdftext_core::color::Color;
//! use sdftext_core::math::Vec2;
//!
//! let effects = SdfEffects::new()
//!     .outline(0.3, Color::BLACK)
//!     .shadow(Vec2::new(0.004, 0.004), Color::rgba(0.0, 0.0, 0.0, 0.5))
//!     .fake_bold(true);
//! assert!(effects.has_outline());
//! assert!(effects.has_shadow());
//! ```

use sdftext_core::color::Color;
use sdftext_core::math::Vec2;

/// Cosmetic parameters of an SDF text instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SdfEffects {
    /// Glyph fill color.
    pub tint: Color,
    /// Outline thickness as a fraction of the distance field (0 = none).
    pub outline_size: f32,
    pub outline_color: Color,
    /// Shadow displacement in texture space. Values around 0.004 read well.
    pub shadow_offset: Vec2,
    pub shadow_color: Color,
    /// Thicken glyphs by shifting the distance threshold.
    pub fake_bold: bool,
}

impl Default for SdfEffects {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            outline_size: 0.0,
            outline_color: Color::BLACK,
            shadow_offset: Vec2::ZERO,
            shadow_color: Color::BLACK,
            fake_bold: false,
        }
    }
}

impl SdfEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    /// Set the outline. Negative sizes clamp to zero.
    pub fn outline(mut self, size: f32, color: Color) -> Self {
        self.outline_size = size.max(0.0);
        self.outline_color = color;
        self
    }

    pub fn shadow(mut self, offset: Vec2, color: Color) -> Self {
        self.shadow_offset = offset;
        self.shadow_color = color;
        self
    }

    pub fn fake_bold(mut self, enable: bool) -> Self {
        self.fake_bold = enable;
        self
    }

    pub fn has_outline(&self) -> bool {
        self.outline_size > 0.0
    }

    pub fn has_shadow(&self) -> bool {
        self.shadow_offset.length_squared() > 0.0
    }
}
