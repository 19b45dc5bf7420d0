//! Runs and terminal styles
//!
//! [`StyleRun`] is what the classifier hands back to the host.
//! [`Style`] is only used when this crate paints runs itself (the CLI).

use super::scanner::ByteLen;
use super::tokens::StyleTag;

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Add bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Add italics
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Add underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// One contiguous classified span, as a byte length and a tag.
///
/// Runs carry no offsets: a sequence of them is laid end to end starting
/// at the restyled range's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleRun {
    pub len: ByteLen,
    pub tag: StyleTag,
}

impl StyleRun {
    /// A run of `len` bytes tagged `tag`. `len` must be non-zero.
    pub fn new(len: ByteLen, tag: StyleTag) -> Self {
        debug_assert!(!len.is_zero(), "style runs are never empty");
        Self { len, tag }
    }

    /// Length in bytes as a plain integer
    pub fn byte_len(&self) -> usize {
        self.len.get()
    }
}

/// Pair each run with its absolute byte offset, starting at `start`.
pub fn with_offsets(start: usize, runs: &[StyleRun]) -> impl Iterator<Item = (usize, StyleRun)> + '_ {
    runs.iter().scan(start, |pos, run| {
        let at = *pos;
        *pos += run.byte_len();
        Some((at, *run))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_underline();
        assert_eq!(style.fg, Color::Red);
        assert!(style.bold);
        assert!(style.underline);
        assert!(!style.is_default());
    }

    #[test]
    fn test_with_offsets() {
        let runs = [
            StyleRun::new(ByteLen::new(3), StyleTag::Keyword),
            StyleRun::new(ByteLen::new(1), StyleTag::Default),
            StyleRun::new(ByteLen::new(2), StyleTag::Number),
        ];
        let offsets: Vec<usize> = with_offsets(10, &runs).map(|(at, _)| at).collect();
        assert_eq!(offsets, vec![10, 13, 14]);
    }
}
