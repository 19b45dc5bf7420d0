//! Terminal output of classified text using crossterm

use std::io::Write;

use crossterm::queue;
use crossterm::style::{self, Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};

use crate::error::Result;
use crate::syntax::{Color, Restyle, Style};

fn to_crossterm(color: Color) -> Option<style::Color> {
    let c = match color {
        Color::Default => return None,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    };
    Some(c)
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> Result<()> {
    if let Some(fg) = to_crossterm(style.fg) {
        queue!(out, SetForegroundColor(fg))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

/// Write the restyled region of `buffer`, painting each run with its tag's
/// default style. With `color` off the text is written unchanged.
pub fn write_highlighted<W: Write>(out: &mut W, buffer: &[u8], restyle: &Restyle, color: bool) -> Result<()> {
    for (at, run) in restyle.spans() {
        let text = String::from_utf8_lossy(&buffer[at..at + run.byte_len()]);
        let style = run.tag.default_style();
        if !color || style.is_default() {
            queue!(out, Print(text))?;
            continue;
        }
        apply_style(out, style)?;
        queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    out.flush()?;
    Ok(())
}

/// Write one `offset length tag text` line per run
pub fn write_runs<W: Write>(out: &mut W, buffer: &[u8], restyle: &Restyle) -> Result<()> {
    for (at, run) in restyle.spans() {
        let text = String::from_utf8_lossy(&buffer[at..at + run.byte_len()]);
        writeln!(
            out,
            "{:>6} {:>4} {:<20} {:?}",
            at,
            run.byte_len(),
            run.tag.name(),
            text
        )?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::IncrementalLexer;

    #[test]
    fn test_plain_output_is_unchanged_text() {
        let src = "namespace Alpha { out(\"é\") }";
        let restyle = IncrementalLexer::default().restyle_all(src.as_bytes());
        let mut out = Vec::new();
        write_highlighted(&mut out, src.as_bytes(), &restyle, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), src);
    }

    #[test]
    fn test_colored_output_contains_escapes() {
        let src = "let x";
        let restyle = IncrementalLexer::default().restyle_all(src.as_bytes());
        let mut out = Vec::new();
        write_highlighted(&mut out, src.as_bytes(), &restyle, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("let"));
    }

    #[test]
    fn test_write_runs() {
        let src = b"foo(1)";
        let restyle = IncrementalLexer::default().restyle_all(src);
        let mut out = Vec::new();
        write_runs(&mut out, src, &restyle).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("FunctionCall"));
        assert!(lines[1].contains("Operator"));
        assert!(lines[2].contains("Number"));
        assert!(lines[3].starts_with("     5    1 Operator"));
    }
}
