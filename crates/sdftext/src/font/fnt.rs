//! AngelCode BMFont text descriptor parsing.
//!
//! Only the tags layout needs are read: `info`, `common`, `page`, `char`,
//! `kerning` and the `distanceField` extension written by msdf generators.
//! Unknown tags and keys are ignored.

use std::str::FromStr;

use sdftext_core::alloc::HashMap;
use sdftext_core::geometry::{Rect, Size};

use super::{BitmapFont, BitmapFontBuilder, GlyphMetrics, PageId};
use crate::error::{TextError, TextResult};

struct Line<'a> {
    line_no: usize,
    fields: Vec<(&'a str, &'a str)>,
}

impl<'a> Line<'a> {
    fn get(&self, key: &str) -> Option<&'a str> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn number<T: FromStr>(&self, key: &str) -> TextResult<T> {
        let raw = self.get(key).ok_or_else(|| {
            TextError::InvalidFontData(format!("line {}: missing '{}'", self.line_no, key))
        })?;
        raw.parse().map_err(|_| {
            TextError::InvalidFontData(format!(
                "line {}: '{}' is not a valid number for '{}'",
                self.line_no, raw, key
            ))
        })
    }

    fn number_or<T: FromStr>(&self, key: &str, default: T) -> TextResult<T> {
        match self.get(key) {
            Some(_) => self.number(key),
            None => Ok(default),
        }
    }
}

/// Split `key=value` pairs, honouring double-quoted values.
fn split_fields(rest: &str) -> Vec<(&str, &str)> {
    let mut fields = Vec::new();
    let mut s = rest.trim_start();

    while let Some(eq) = s.find('=') {
        let key = s[..eq].trim();
        let after = &s[eq + 1..];

        let (value, remaining) = if let Some(quoted) = after.strip_prefix('"') {
            match quoted.find('"') {
                Some(end) => (&quoted[..end], &quoted[end + 1..]),
                None => (quoted, ""),
            }
        } else {
            let end = after.find(char::is_whitespace).unwrap_or(after.len());
            (&after[..end], &after[end..])
        };

        fields.push((key, value));
        s = remaining.trim_start();
    }

    fields
}

fn char_from_id(line: &Line<'_>, key: &str) -> TextResult<Option<char>> {
    let id: i64 = line.number(key)?;
    // id=-1 marks the fallback glyph in some generators
    Ok(u32::try_from(id).ok().and_then(char::from_u32))
}

/// Upper bound on atlas pages a descriptor may declare.
const MAX_PAGES: u32 = 1024;

fn check_page_count(line: &Line<'_>, count: u32) -> TextResult<u32> {
    if count > MAX_PAGES {
        return Err(TextError::InvalidFontData(format!(
            "line {}: {} pages exceeds the limit of {}",
            line.line_no, count, MAX_PAGES
        )));
    }
    Ok(count)
}

pub(super) fn parse(source: &str) -> TextResult<BitmapFont> {
    let mut name = String::new();
    let mut size = 0.0f32;
    let mut line_height = 0.0f32;
    let mut page_size = Size::new(0.0f32, 0.0);
    let mut page_count = 0u32;
    let mut distance_field_range = None;
    let mut chars = Vec::new();
    let mut kernings: HashMap<char, Vec<(char, f32)>> = HashMap::new();

    for (idx, raw) in source.lines().enumerate() {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let (tag, rest) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));
        let line = Line {
            line_no: idx + 1,
            fields: split_fields(rest),
        };

        match tag {
            "info" => {
                name = line.get("face").unwrap_or_default().to_owned();
                size = line.number::<f32>("size")?.abs();
            }
            "common" => {
                line_height = line.number("lineHeight")?;
                page_size = Size::new(line.number("scaleW")?, line.number("scaleH")?);
                page_count = check_page_count(&line, line.number_or("pages", 1)?)?;
            }
            "page" => {
                let id: u32 = line.number("id")?;
                let count = id.checked_add(1).ok_or_else(|| {
                    TextError::InvalidFontData(format!(
                        "line {}: page id {} is out of range",
                        line.line_no, id
                    ))
                })?;
                page_count = page_count.max(check_page_count(&line, count)?);
            }
            "distanceField" => {
                distance_field_range = Some(line.number::<f32>("distanceRange")?);
            }
            "char" => {
                let Some(code) = char_from_id(&line, "id")? else {
                    continue;
                };
                let frame: Rect<f32> = Rect::new(
                    line.number("x")?,
                    line.number("y")?,
                    line.number("width")?,
                    line.number("height")?,
                );
                let page = PageId(line.number_or("page", 0)?);
                let x_offset: f32 = line.number_or("xoffset", 0.0)?;
                let y_offset: f32 = line.number_or("yoffset", 0.0)?;
                let x_advance = line.number_or("xadvance", frame.width)?;
                chars.push((code, page, frame, x_offset, y_offset, x_advance, line.line_no));
            }
            "kerning" => {
                let (Some(first), Some(second)) =
                    (char_from_id(&line, "first")?, char_from_id(&line, "second")?)
                else {
                    continue;
                };
                let amount = line.number::<f32>("amount")?;
                kernings.entry(second).or_default().push((first, amount));
            }
            _ => {}
        }
    }

    if !(page_size.width > 0.0 && page_size.height > 0.0) {
        return Err(TextError::InvalidFontData(
            "missing or empty 'common' scaleW/scaleH".into(),
        ));
    }

    let range = distance_field_range.unwrap_or(super::DEFAULT_DISTANCE_FIELD_RANGE);
    let mut builder =
        BitmapFontBuilder::new(name, size, line_height).distance_field_range(range);
    for _ in 0..page_count.max(1) {
        builder.page(page_size);
    }

    for (code, page, frame, x_offset, y_offset, x_advance, line_no) in chars {
        if page.0 >= page_count.max(1) {
            return Err(TextError::InvalidFontData(format!(
                "line {}: char {:?} references missing page {}",
                line_no, code, page.0
            )));
        }
        let mut metrics = GlyphMetrics::new(page, frame, page_size)
            .advance(x_advance)
            .offset(x_offset, y_offset);
        if let Some(pairs) = kernings.get(&code) {
            metrics.kerning.extend(pairs.iter().copied());
        }
        builder.insert_glyph(code, metrics);
    }

    let font = builder.build()?;
    tracing::debug!(
        "Parsed BMFont '{}': {} glyphs, {} pages, size {}",
        font.name(),
        font.glyph_count(),
        font.pages().len(),
        size
    );
    Ok(font)
}
