//! Layout Dump Example
//!
//! Lays out a paragraph with an embedded BMFont descriptor and prints the
//! resulting lines, page batches and shader uniforms.
//!
//! ## Usage
//! ```bash
//! RUST_LOG=sdftext=trace cargo run -p sdftext --example layout_dump
//! ```

use sdftext::font::{BitmapFont, FontRegistry};
use sdftext::{SdfEffects, SdfText, TextAlign, TextResult, TextStyle};
use sdftext_core::color::Color;
use sdftext_core::logging;
use sdftext_core::math::{Affine2, Vec2};

const WIDTH: u32 = 12;

/// Monospace descriptor: every printable ASCII glyph is a 12x20 cell.
fn descriptor() -> String {
    let mut fnt = String::from(
        "info face=\"Demo Mono\" size=-24 bold=0 italic=0\n\
         common lineHeight=28 base=22 scaleW=256 scaleH=256 pages=1\n\
         page id=0 file=\"demo_mono.png\"\n\
         distanceField fieldType=sdf distanceRange=4\n",
    );
    for (i, code) in (33u32..127).enumerate() {
        let (x, y) = ((i as u32 % 21) * WIDTH, (i as u32 / 21) * 22);
        fnt.push_str(&format!(
            "char id={code} x={x} y={y} width={WIDTH} height=20 \
             xoffset=0 yoffset=4 xadvance=13 page=0\n"
        ));
    }
    fnt.push_str("char id=32 x=0 y=0 width=0 height=0 xoffset=0 yoffset=0 xadvance=13 page=0\n");
    fnt
}

fn main() -> TextResult<()> {
    logging::init();

    #[cfg(feature = "profiling")]
    sdftext_core::profiling::init_profiling(sdftext_core::profiling::ProfilingBackend::PuffinHttp);

    let mut fonts = FontRegistry::new();
    fonts.insert_bitmap_font(BitmapFont::from_fnt(&descriptor())?);

    let style = TextStyle::new("Demo Mono")
        .size(18.0)
        .max_width(260.0)
        .align(TextAlign::Justify)
        .effects(SdfEffects::new().outline(0.2, Color::BLACK));
    let mut text = SdfText::new(
        "Distance field glyphs stay crisp at any scale.\nJustified lines stretch their spaces.",
        style,
        &fonts,
    )?;
    text.set_anchor(Vec2::new(0.5, 0.0));

    let size = text.measured_size();
    println!(
        "{} lines, {} glyphs, {}x{}",
        text.line_count(),
        text.glyph_count(),
        size.width,
        size.height
    );
    for (i, line) in text.layout().lines.iter().enumerate() {
        let content: String = text.layout().line_glyphs(i as u32).map(|g| g.code).collect();
        println!(
            "  line {i}: width {:>6.1} spaces {:?} offset {:>5.2} {content:?}",
            line.width, line.spaces, line.offset
        );
    }

    for event in text.drain_batch_events() {
        println!("event {event:?}");
    }
    for batch in text.batches() {
        println!(
            "batch {:?} page {} live {}/{} generation {}",
            batch.id(),
            batch.page().0,
            batch.live(),
            batch.capacity(),
            batch.generation()
        );
        if let Some(first) = batch.vertices().chunks_exact(8).next() {
            println!("  first quad {first:?}");
        }
    }

    text.update_style(|s| s.effects = s.effects.fake_bold(true))?;
    let uniforms = text.frame_uniforms(&Affine2::from_scale(Vec2::splat(2.0)), 1.0);
    println!("uniforms {uniforms:#?}");
    println!("layout passes {}", text.layout_passes());

    Ok(())
}
