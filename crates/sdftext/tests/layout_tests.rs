//! End-to-end layout tests through the public `SdfText` API (no GPU required).
//!
//! The fixture font is proportional: lowercase glyphs are 6 to 9 pixels wide
//! with one pixel of extra advance, digits live on a second atlas page.

use std::sync::Arc;

use sdftext::font::{BitmapFont, FontMetrics, FontRegistry, GlyphMetrics};
use sdftext::{
    BatchConfig, BatchEvent, PageId, SdfEffects, SdfText, TextAlign, TextError, TextStyle,
};
use sdftext_core::color::Color;
use sdftext_core::geometry::{Rect, Size};
use sdftext_core::math::{Affine2, Vec2};

const NATIVE_SIZE: f32 = 20.0;
const LINE_HEIGHT: f32 = 24.0;

fn fixture_font() -> BitmapFont {
    let page_size = Size::new(512.0, 512.0);
    let mut builder =
        BitmapFont::builder("serif", NATIVE_SIZE, LINE_HEIGHT).distance_field_range(6.0);
    let letters = builder.page(page_size);
    let digits = builder.page(page_size);

    for (i, c) in ('a'..='z').enumerate() {
        let width = 6.0 + (i % 4) as f32;
        let frame = Rect::new(i as f32 * 10.0, 0.0, width, 20.0);
        let glyph = GlyphMetrics::new(letters, frame, page_size)
            .advance(width + 1.0)
            .offset(0.0, 2.0);
        builder.insert_glyph(c, glyph);
    }
    for (i, c) in ('0'..='9').enumerate() {
        let frame = Rect::new(i as f32 * 10.0, 0.0, 8.0, 20.0);
        let glyph = GlyphMetrics::new(digits, frame, page_size)
            .advance(9.0)
            .offset(0.0, 2.0);
        builder.insert_glyph(c, glyph);
    }
    let space = GlyphMetrics::new(letters, Rect::new(0.0, 40.0, 0.0, 0.0), page_size).advance(5.0);
    builder.insert_glyph(' ', space);

    builder.build().unwrap()
}

fn registry() -> FontRegistry {
    let mut fonts = FontRegistry::new();
    fonts.insert_bitmap_font(fixture_font());
    fonts
}

fn style() -> TextStyle {
    TextStyle::new("serif").size(NATIVE_SIZE)
}

fn text(content: &str, style: TextStyle) -> SdfText {
    SdfText::new(content, style, &registry()).unwrap()
}

/// Left x of every quad, in placement order.
fn quad_lefts(text: &SdfText) -> Vec<f32> {
    text.batches()
        .iter()
        .flat_map(|b| b.vertices().chunks_exact(8).map(|q| q[0]))
        .collect()
}

/// Line widths computed from advances alone, for text without kerning.
fn expected_line_widths(content: &str, font: &dyn FontMetrics) -> Vec<f32> {
    content
        .split('\n')
        .map(|line| {
            let mut pen = 0.0;
            let mut width = 0.0;
            for c in line.chars() {
                let Some(glyph) = font.glyph(c) else { continue };
                if !c.is_whitespace() {
                    width = pen + glyph.x_offset + glyph.orig_width;
                }
                pen += glyph.x_advance;
            }
            width
        })
        .collect()
}

#[test]
fn test_line_count_follows_explicit_breaks() {
    for content in ["", "abc", "a\nb", "a\n\nb", "ab\n", "\n\n\n", "one two\r\nthree\rfour"] {
        let t = text(content, style());
        let breaks = content.replace("\r\n", "\n").replace('\r', "\n").matches('\n').count();
        assert_eq!(t.line_count() as usize, breaks + 1, "text {:?}", content);
    }
}

#[test]
fn test_glyph_count_excludes_whitespace_and_missing() {
    let t = text("ab c\td\u{3000}e\n\u{2603}f", style());
    assert_eq!(t.glyph_count(), 6);

    let with_missing = text("a\u{2603}b\nc\u{2603}\u{2603}d", style());
    let without = text("ab\ncd", style());
    assert_eq!(with_missing.glyph_count(), without.glyph_count());
    assert_eq!(with_missing.line_count(), without.line_count());
    assert_eq!(with_missing.measured_size(), without.measured_size());
}

#[test]
fn test_relayout_is_idempotent() {
    let content = "justify these words\nplease 42";
    let style = style().max_width(90.0).align(TextAlign::Justify);
    let once = text(content, style.clone());
    let mut twice = text(content, style);
    twice.set_text("x");
    twice.set_text(content);

    assert_eq!(once.batches().len(), twice.batches().len());
    for (a, b) in once.batches().iter().zip(twice.batches()) {
        let bits = |v: &[f32]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(a.page(), b.page());
        assert_eq!(bits(a.vertex_buffer()), bits(b.vertex_buffer()));
        assert_eq!(bits(a.uv_buffer()), bits(b.uv_buffer()));
        assert_eq!(a.index_buffer(), b.index_buffer());
    }
}

#[test]
fn test_measured_width_matches_advances() {
    let font = fixture_font();
    let content = "the quick brown\nfox jumps\nover lazy dogs 123";
    let t = text(content, style());
    let widest = expected_line_widths(content, &font)
        .into_iter()
        .fold(0.0f32, f32::max);
    assert!((t.measured_size().width - widest).abs() < 1e-4);
    assert_eq!(t.measured_size().height, 3.0 * LINE_HEIGHT);

    // rounding can only nudge, never shrink below the widest line
    let rounded = text(content, style().round_pixels(true));
    assert!(rounded.measured_size().width >= widest - 1e-4);
}

#[test]
fn test_measured_size_scales_with_font_size() {
    let t = text("abc\nde", style().size(NATIVE_SIZE * 2.0).line_spacing(2.0));
    let width = expected_line_widths("abc", &fixture_font())[0];
    assert_eq!(t.measured_size(), Size::new(width * 2.0, 2.0 * (LINE_HEIGHT + 2.0) * 2.0));
}

#[test]
fn test_wrap_breaks_between_words() {
    // "aaaa bbbb" ends at 64 with the pen at 65; the first 'c' would push it to 79
    let t = text("aaaa bbbb cccc", style().max_width(66.0));
    assert_eq!(t.line_count(), 2);
    let first: String = t.layout().line_glyphs(0).map(|g| g.code).collect();
    let second: String = t.layout().line_glyphs(1).map(|g| g.code).collect();
    assert_eq!(first, "aaaabbbb");
    assert_eq!(second, "cccc");
    assert_eq!(t.measured_size().width, 64.0);
}

#[test]
fn test_long_word_overflows_alone() {
    let t = text("abcdefghijklmnop", style().max_width(30.0));
    assert_eq!(t.line_count(), 1);
    assert!(t.measured_size().width > 30.0);

    let t = text("ab abcdefghijklmnop ab", style().max_width(30.0));
    assert_eq!(t.line_count(), 3);
    assert_eq!(t.layout().line_glyphs(1).count(), 16);
}

#[test]
fn test_justify_single_word_has_no_offset() {
    for justify_last_line in [false, true] {
        let t = text(
            "abc",
            style()
                .align(TextAlign::Justify)
                .justify_last_line(justify_last_line),
        );
        let lefts = quad_lefts(&t);
        assert_eq!(lefts[0], 0.0);
        assert!(lefts.iter().all(|x| x.is_finite()));
        assert!(t.layout().lines.iter().all(|l| l.offset == 0.0));
    }
}

#[test]
fn test_justify_wrapped_lines_only() {
    // line 0 "aa a" (width 25, one space) is stretched to the widest line, 27
    let t = text("aa a aaaa", style().max_width(35.0).align(TextAlign::Justify));
    assert_eq!(t.line_count(), 2);
    let lefts = quad_lefts(&t);
    assert_eq!(lefts[..3], [0.0, 7.0, 21.0]);
    // the paragraph-final line is left alone
    assert_eq!(lefts[3], 0.0);
    assert_eq!(lefts[6], 21.0);
}

#[test]
fn test_justify_last_line_setting() {
    let content = "aa aa aa\naa a";
    let justify = style().align(TextAlign::Justify);

    let exempt = text(content, justify.clone());
    assert_eq!(quad_lefts(&exempt)[8], 19.0);
    assert!(exempt.layout().lines.iter().all(|l| l.spaces.is_none()));

    let stretched = text(content, justify.justify_last_line(true));
    let lefts = quad_lefts(&stretched);
    // both lines now end flush at the widest line, 51
    assert_eq!(lefts[5], 45.0);
    assert_eq!(lefts[8], 45.0);
    assert_eq!(stretched.layout().lines[1].spaces, Some(1));
}

#[test]
fn test_center_and_end_alignment() {
    let center = text("aaaa\naa", style().align(TextAlign::Center));
    let end = text("aaaa\naa", style().align(TextAlign::End));
    // widths 27 and 13
    assert_eq!(quad_lefts(&center)[4], 7.0);
    assert_eq!(quad_lefts(&end)[4], 14.0);
}

#[test]
fn test_buffer_capacity_reused() {
    let long = "a".repeat(30);
    let mut t = text(&long, style()).with_config(BatchConfig::retain_all());
    let generation = t.batches()[0].generation();

    t.set_text("aaaaa");
    t.set_text(&"a".repeat(20));
    t.set_text(&long);
    assert_eq!(t.batches()[0].generation(), generation);
    assert_eq!(t.batches()[0].capacity(), 30);

    t.set_text(&"a".repeat(31));
    assert_eq!(t.batches()[0].generation(), generation + 1);
    t.set_text(&"a".repeat(25));
    t.set_text(&"a".repeat(31));
    assert_eq!(t.batches()[0].generation(), generation + 1);
}

#[test]
fn test_buffer_capacity_reused_by_default() {
    let long = "a".repeat(30);
    let mut t = text(&long, style());
    let generation = t.batches()[0].generation();

    t.set_text("aaaaa");
    assert_eq!(t.batches()[0].generation(), generation);
    t.set_text(&long);
    assert_eq!(t.batches()[0].generation(), generation);
    assert_eq!(t.batches()[0].capacity(), 30);

    t.set_text(&"a".repeat(40));
    assert_eq!(t.batches()[0].generation(), generation + 1);
}

#[test]
fn test_oversized_buffers_released() {
    let mut t = text(&"a".repeat(200), style())
        .with_config(BatchConfig::new().with_min_retained_capacity(16));
    t.set_text("ab");
    let batch = &t.batches()[0];
    assert_eq!(batch.capacity(), 2);
    assert_eq!(batch.vertex_buffer().len(), 16);
    assert_eq!(batch.index_buffer().len(), 12);
}

#[test]
fn test_anchor_centers_block() {
    let mut t = text("centered text\nacross 3 lines\nok", style());
    t.set_anchor(Vec2::splat(0.5));

    let (mut min, mut max) = (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN));
    for batch in t.batches() {
        for v in batch.vertices().chunks_exact(2) {
            let p = Vec2::new(v[0], v[1]);
            min = min.min(p);
            max = max.max(p);
        }
    }
    let center = (min + max) * 0.5;
    assert!(center.abs().max_element() < 1e-3, "center {center:?}");
}

#[test]
fn test_anchor_change_relayouts() {
    let mut t = text("ab", style());
    let passes = t.layout_passes();
    t.set_anchor(Vec2::ZERO);
    assert_eq!(t.layout_passes(), passes);
    t.set_anchor(Vec2::new(1.0, 0.0));
    assert_eq!(t.layout_passes(), passes + 1);
    assert_eq!(quad_lefts(&t)[0], -t.measured_size().width);
}

#[test]
fn test_frame_uniforms_are_pure() {
    let effects = SdfEffects::new()
        .outline(0.25, Color::BLACK)
        .shadow(Vec2::new(0.004, 0.004), Color::rgba(0.0, 0.0, 0.0, 0.5));
    let t = text("pure", style().size(40.0).effects(effects));
    let transform =
        Affine2::from_scale_angle_translation(Vec2::splat(1.5), 0.2, Vec2::new(10.0, 5.0));

    let first = t.frame_uniforms(&transform, 2.0).unwrap();
    let second = t.frame_uniforms(&transform, 2.0).unwrap();
    assert_eq!(first, second);
    assert!((first.f_width - 1.5 * 6.0 * 2.0 * 2.0).abs() < 1e-4);
    assert_eq!(first.shadow_offset, [-0.004, -0.004]);
}

#[test]
fn test_no_uniforms_without_glyphs() {
    let t = text("   ", style());
    assert!(t.batches().is_empty());
    assert!(t.frame_uniforms(&Affine2::IDENTITY, 1.0).is_none());
}

#[test]
fn test_cosmetic_update_keeps_geometry() {
    let mut t = text("style me", style());
    let passes = t.layout_passes();
    let before = t.frame_uniforms(&Affine2::IDENTITY, 1.0).unwrap();

    t.update_style(|s| s.effects = s.effects.tint(Color::RED).fake_bold(true))
        .unwrap();
    assert_eq!(t.layout_passes(), passes);
    let after = t.frame_uniforms(&Affine2::IDENTITY, 1.0).unwrap();
    assert_ne!(before, after);
    assert_eq!(after.outline_color, Color::RED.to_array());

    t.update_style(|s| s.letter_spacing = 2.0).unwrap();
    assert_eq!(t.layout_passes(), passes + 1);
}

#[test]
fn test_page_events() {
    let mut t = text("ab 12", style());
    let attached: Vec<_> = t.drain_batch_events().collect();
    assert_eq!(attached.len(), 2);
    assert!(attached
        .iter()
        .all(|e| matches!(e, BatchEvent::Attached { .. })));
    let digits = t.batches()[1].id();

    t.set_text("ab");
    let events: Vec<_> = t.drain_batch_events().collect();
    assert_eq!(
        events,
        vec![BatchEvent::Detached {
            id: digits,
            page: PageId(1)
        }]
    );
    assert_eq!(t.drain_batch_events().count(), 0);
}

#[test]
fn test_invalid_styles_rejected() {
    let fonts = registry();
    let unknown = SdfText::new("x", TextStyle::new("missing"), &fonts);
    assert!(matches!(unknown, Err(TextError::InvalidStyle(_))));

    let zero = SdfText::new("x", style().size(0.0), &fonts);
    assert!(matches!(zero, Err(TextError::InvalidStyle(_))));

    let mut t = text("x", style());
    assert!(t.update_style(|s| s.font_size = -1.0).is_err());
    assert_eq!(t.style().font_size, NATIVE_SIZE);
}

#[test]
fn test_shared_font_instance() {
    let font: Arc<dyn FontMetrics> = Arc::new(fixture_font());
    let a = SdfText::with_font("shared", style(), font.clone()).unwrap();
    let b = SdfText::with_font("shared", style().size(10.0), font.clone()).unwrap();
    assert!(Arc::ptr_eq(a.font(), b.font()));
    assert_eq!(b.measured_size().width * 2.0, a.measured_size().width);
}

#[test]
fn test_style_update_switches_font() {
    let mut fonts = registry();
    let alternate: Arc<dyn FontMetrics> = Arc::new(fixture_font());
    fonts.register("serif-alt", alternate.clone());

    let mut t = SdfText::new("switch fonts", style(), &fonts).unwrap();
    let width = t.measured_size().width;
    t.update_style_with(&fonts, |s| {
        s.font = "serif-alt".into();
        s.font_size = NATIVE_SIZE * 2.0;
    })
    .unwrap();
    assert!(Arc::ptr_eq(t.font(), &alternate));
    assert_eq!(t.style().font, "serif-alt");
    assert_eq!(t.layout_passes(), 2);
    assert_eq!(t.measured_size().width, width * 2.0);

    let err = t.update_style_with(&fonts, |s| s.font = "sans".into()).unwrap_err();
    assert_eq!(err, TextError::InvalidStyle("unknown font 'sans'".into()));
    assert!(Arc::ptr_eq(t.font(), &alternate));
    assert_eq!(t.style().font, "serif-alt");
    assert_eq!(t.layout_passes(), 2);
}

#[test]
fn test_parsed_font_lays_out() {
    let source = r#"info face="Tiny" size=-16 bold=0
common lineHeight=20 base=16 scaleW=64 scaleH=64 pages=1
page id=0 file="tiny.png"
distanceField fieldType=sdf distanceRange=8
chars count=3
char id=32 x=0 y=0 width=0 height=0 xoffset=0 yoffset=0 xadvance=4 page=0
char id=65 x=0 y=0 width=10 height=14 xoffset=0 yoffset=2 xadvance=11 page=0
char id=86 x=10 y=0 width=10 height=14 xoffset=0 yoffset=2 xadvance=11 page=0
kernings count=1
kerning first=65 second=86 amount=-2
"#;
    let font = BitmapFont::from_fnt(source).unwrap();
    assert_eq!(font.name(), "Tiny");
    let mut fonts = FontRegistry::new();
    fonts.insert_bitmap_font(font);

    let t = SdfText::new("AV A", TextStyle::new("Tiny").size(16.0), &fonts).unwrap();
    assert_eq!(t.glyph_count(), 3);
    assert_eq!(quad_lefts(&t)[1], 9.0);
    assert_eq!(t.measured_size(), Size::new(34.0, 20.0));
    let uniforms = t.frame_uniforms(&Affine2::IDENTITY, 1.0).unwrap();
    assert_eq!(uniforms.f_width, 8.0);
}
