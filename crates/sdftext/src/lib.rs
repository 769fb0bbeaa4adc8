//! sdftext - Paragraph layout and mesh generation for SDF bitmap fonts
//!
//! This crate turns a string plus a style into per-atlas-page quad buffers
//! ready for GPU upload, and computes the per-frame uniforms of a distance
//! field text shader:
//! - Greedy line breaking on whitespace with kerning and letter spacing
//! - Start, center, end and justified alignment
//! - Page batches whose buffers are reused across re-layouts
//! - Outline, drop shadow and synthetic bold as shader parameters
//!
//! ## Quick Start
//!
//! ```rust
//! use sdftext::font::{BitmapFont, FontRegistry, GlyphMetrics};
//! use sdftext::{SdfText, TextAlign, TextStyle};
//! use sdftext_core::geometry::{Rect, Size};
//! use sdftext_core::math::Affine2;
//!
//! let page_size = Size::new(256.0, 256.0);
//! let mut builder = BitmapFont::builder("body", 32.0, 40.0);
//! let page = builder.page(page_size);
//! for (i, c) in ('a'..='z').enumerate() {
//!     let frame = Rect::new(i as f32 * 9.0, 0.0, 9.0, 24.0);
//!     builder.insert_glyph(c, GlyphMetrics::new(page, frame, page_size));
//! }
//! let space = GlyphMetrics::new(page, Rect::new(0.0, 0.0, 0.0, 0.0), page_size).advance(8.0);
//! builder.insert_glyph(' ', space);
//!
//! let mut fonts = FontRegistry::new();
//! fonts.insert_bitmap_font(builder.build()?);
//!
//! let style = TextStyle::new("body").size(16.0).max_width(80.0).align(TextAlign::Center);
//! let mut text = SdfText::new("hello distance fields", style, &fonts)?;
//! assert!(text.line_count() > 1);
//!
//! for batch in text.batches() {
//!     // upload batch.vertices(), batch.uvs() and batch.indices() keyed by batch.id()
//!     assert_eq!(batch.indices().len(), batch.live() * 6);
//! }
//! for _event in text.drain_batch_events() {}
//!
//! let uniforms = text.frame_uniforms(&Affine2::IDENTITY, 1.0);
//! assert!(uniforms.is_some());
//! # Ok::<(), sdftext::TextError>(())
//! ```
//!
//! ## Features
//!
//! - `profiling`: serve puffin scopes over HTTP through
//!   `sdftext_core::profiling::init_profiling`.

pub mod batch;
pub mod chars;
pub mod config;
pub mod effects;
pub mod error;
pub mod font;
pub mod layout;
pub mod style;
pub mod text;
pub mod uniforms;

pub use batch::{BatchEvent, BatchId, PageBatch};
pub use config::BatchConfig;
pub use effects::SdfEffects;
pub use error::{TextError, TextResult};
pub use font::{BitmapFont, FontMetrics, FontRegistry, GlyphMetrics, PageId};
pub use layout::{GlyphLayout, LineMetrics, PlacedGlyph};
pub use style::{TextAlign, TextStyle};
pub use text::SdfText;
pub use uniforms::{FAKE_BOLD_AMOUNT, SdfUniforms};
