//! Byte-level UTF-8 scanning
//!
//! The classifier never assumes single-byte characters. Every decision
//! goes through [`decode_at`], which reports the codepoint together with
//! the number of bytes it occupies in the buffer.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A length measured in bytes of the underlying buffer.
///
/// Kept distinct from plain `usize` so byte counts can't be mixed up with
/// codepoint or column counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteLen(usize);

impl ByteLen {
    pub const ZERO: ByteLen = ByteLen(0);

    /// Wrap a raw byte count
    pub const fn new(bytes: usize) -> Self {
        Self(bytes)
    }

    /// Number of bytes as a plain integer
    pub const fn get(self) -> usize {
        self.0
    }

    /// True for an empty span
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for ByteLen {
    type Output = ByteLen;

    fn add(self, rhs: ByteLen) -> ByteLen {
        ByteLen(self.0 + rhs.0)
    }
}

impl AddAssign for ByteLen {
    fn add_assign(&mut self, rhs: ByteLen) {
        self.0 += rhs.0;
    }
}

impl Sum for ByteLen {
    fn sum<I: Iterator<Item = ByteLen>>(iter: I) -> ByteLen {
        iter.fold(ByteLen::ZERO, Add::add)
    }
}

impl fmt::Display for ByteLen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}b", self.0)
    }
}

/// A decoded codepoint and the bytes it spans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub ch: char,
    pub len: ByteLen,
}

impl Decoded {
    /// True if this came from a malformed or truncated sequence
    pub fn is_replacement(&self) -> bool {
        self.ch == char::REPLACEMENT_CHARACTER && self.len.get() == 1
    }
}

/// Sequence length implied by a UTF-8 leading byte.
///
/// Continuation bytes and invalid leads count as 1.
pub fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Decode the codepoint starting at `pos`.
///
/// Returns `None` only at or past the end of `buf`. Malformed input
/// (bad lead, bad continuation, truncated tail, overlong or surrogate
/// encodings) decodes to U+FFFD spanning a single byte.
pub fn decode_at(buf: &[u8], pos: usize) -> Option<Decoded> {
    let lead = *buf.get(pos)?;
    if lead < 0x80 {
        return Some(Decoded {
            ch: lead as char,
            len: ByteLen(1),
        });
    }

    let replacement = Decoded {
        ch: char::REPLACEMENT_CHARACTER,
        len: ByteLen(1),
    };

    let len = sequence_len(lead);
    if len == 1 || pos + len > buf.len() {
        return Some(replacement);
    }

    let bytes = &buf[pos..pos + len];
    if !bytes[1..].iter().all(|b| b & 0xC0 == 0x80) {
        return Some(replacement);
    }

    match std::str::from_utf8(bytes).ok().and_then(|s| s.chars().next()) {
        Some(ch) => Some(Decoded {
            ch,
            len: ByteLen(len),
        }),
        None => Some(replacement),
    }
}

/// Forward-only cursor over a byte slice.
///
/// The slice is exactly the region being scanned; nothing past its end is
/// ever inspected.
#[derive(Debug, Clone, Copy)]
pub struct ByteScanner<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteScanner<'a> {
    /// Cursor at the start of `buf`
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset into the scanned slice
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Codepoint at the cursor
    pub fn peek(&self) -> Option<Decoded> {
        decode_at(self.buf, self.pos)
    }

    /// Codepoint immediately after the one at the cursor
    pub fn peek_next(&self) -> Option<Decoded> {
        let cur = self.peek()?;
        decode_at(self.buf, self.pos + cur.len.get())
    }

    /// Raw byte `offset` bytes ahead of the cursor
    pub fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.buf.get(self.pos + offset).copied()
    }

    /// Advance past the codepoint at the cursor
    pub fn bump(&mut self) -> Option<Decoded> {
        let cur = self.peek()?;
        self.pos += cur.len.get();
        Some(cur)
    }

    /// Advance while `pred` holds, returning the bytes consumed
    pub fn eat_while(&mut self, mut pred: impl FnMut(char) -> bool) -> ByteLen {
        let start = self.pos;
        while let Some(d) = self.peek() {
            if !pred(d.ch) {
                break;
            }
            self.pos += d.len.get();
        }
        ByteLen(self.pos - start)
    }

    /// Bytes consumed since `start`
    pub fn since(&self, start: usize) -> ByteLen {
        ByteLen(self.pos - start)
    }

    /// The raw bytes between `start` and the cursor
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.buf[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_len() {
        assert_eq!(sequence_len(b'a'), 1);
        assert_eq!(sequence_len(0xC3), 2);
        assert_eq!(sequence_len(0xE2), 3);
        assert_eq!(sequence_len(0xF0), 4);
        // continuation byte and invalid leads
        assert_eq!(sequence_len(0x80), 1);
        assert_eq!(sequence_len(0xF8), 1);
        assert_eq!(sequence_len(0xFF), 1);
    }

    #[test]
    fn test_decode_multibyte() {
        let s = "aé→😀";
        let buf = s.as_bytes();
        assert_eq!(decode_at(buf, 0), Some(Decoded { ch: 'a', len: ByteLen(1) }));
        assert_eq!(decode_at(buf, 1), Some(Decoded { ch: 'é', len: ByteLen(2) }));
        assert_eq!(decode_at(buf, 3), Some(Decoded { ch: '→', len: ByteLen(3) }));
        assert_eq!(decode_at(buf, 6), Some(Decoded { ch: '😀', len: ByteLen(4) }));
        assert_eq!(decode_at(buf, 10), None);
    }

    #[test]
    fn test_truncated_tail_is_single_byte() {
        // first two bytes of '→'
        let buf = [0xE2, 0x86];
        let d = decode_at(&buf, 0).unwrap();
        assert!(d.is_replacement());
        assert_eq!(d.len, ByteLen(1));
    }

    #[test]
    fn test_bad_continuation_is_single_byte() {
        let buf = [0xE2, b'a', b'b'];
        let d = decode_at(&buf, 0).unwrap();
        assert!(d.is_replacement());
        assert_eq!(decode_at(&buf, 1).unwrap().ch, 'a');
    }

    #[test]
    fn test_surrogate_and_overlong_rejected() {
        // encoded U+D800
        assert!(decode_at(&[0xED, 0xA0, 0x80], 0).unwrap().is_replacement());
        // overlong '/'
        assert!(decode_at(&[0xC0, 0xAF], 0).unwrap().is_replacement());
    }

    #[test]
    fn test_scanner_eat_while() {
        let mut sc = ByteScanner::new("héllo world".as_bytes());
        let len = sc.eat_while(char::is_alphanumeric);
        assert_eq!(len, ByteLen(6));
        assert_eq!(sc.slice_from(0), "héllo".as_bytes());
        assert_eq!(sc.peek().map(|d| d.ch), Some(' '));
        assert_eq!(sc.peek_next().map(|d| d.ch), Some('w'));
    }

    #[test]
    fn test_byte_len_sum() {
        let total: ByteLen = [ByteLen::new(2), ByteLen::new(3)].into_iter().sum();
        assert_eq!(total.get(), 5);
        assert_eq!(total.to_string(), "5b");
    }
}
