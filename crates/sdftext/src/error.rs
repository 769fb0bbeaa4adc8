/// Errors surfaced by the text engine.
///
/// Missing glyphs are not errors: they are skipped during layout.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// The style cannot be laid out (unknown font, non-positive size).
    InvalidStyle(String),

    /// A font descriptor could not be parsed.
    InvalidFontData(String),
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextError::InvalidStyle(msg) => write!(f, "Invalid text style: {}", msg),
            TextError::InvalidFontData(msg) => write!(f, "Invalid font data: {}", msg),
        }
    }
}

impl std::error::Error for TextError {}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;
