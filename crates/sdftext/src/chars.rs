//! Code point stream fed to the line breaker.
//!
//! Text is decoded into Unicode scalar values once per layout pass, with
//! `\r\n` and lone `\r` folded into `\n`. The stream can be rewound, which the
//! line breaker uses to re-measure the tail of a wrapped line.

/// Classification of a code point for line breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharKind {
    Regular,
    /// Break opportunity; counted for justification.
    Whitespace,
    /// Mandatory line break (`\n`).
    LineBreak,
}

impl CharKind {
    pub fn of(c: char) -> Self {
        match c {
            '\n' => CharKind::LineBreak,
            // U+FEFF is whitespace for ECMAScript `\s` but not Unicode White_Space
            c if c.is_whitespace() || c == '\u{FEFF}' => CharKind::Whitespace,
            _ => CharKind::Regular,
        }
    }
}

/// Decode `text` into `out`, normalizing line endings.
///
/// `out` is cleared first and keeps its capacity. Empty input produces a single
/// space so the layout always has one line.
pub fn normalize_into(text: &str, out: &mut Vec<char>) {
    out.clear();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            chars.next_if_eq(&'\n');
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    if out.is_empty() {
        out.push(' ');
    }
}

/// Rewindable iterator over normalized code points.
#[derive(Debug, Clone)]
pub struct CharStream<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> CharStream<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    /// Index of the next code point to be yielded.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Continue iteration from `index`.
    pub fn rewind_to(&mut self, index: usize) {
        debug_assert!(index <= self.chars.len());
        self.pos = index;
    }

    pub fn last_char(&self) -> Option<char> {
        self.chars.last().copied()
    }
}

impl Iterator for CharStream<'_> {
    type Item = (usize, char, CharKind);

    fn next(&mut self) -> Option<Self::Item> {
        let c = *self.chars.get(self.pos)?;
        let idx = self.pos;
        self.pos += 1;
        Some((idx, c, CharKind::of(c)))
    }
}
