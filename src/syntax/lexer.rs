//! Incremental restyling entry point
//!
//! Hosts call [`IncrementalLexer::restyle`] with the region an edit touched.
//! Every call starts from a clean [`ScanContext`](super::ScanContext), so a
//! range that begins between `namespace` and its name will not mark the
//! name. [`IncrementalLexer::restyle_lines`] widens the range to a line
//! boundary for callers that want that handled for them.

use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::classifier::TokenClassifier;
use super::scanner::ByteLen;
use super::style::{with_offsets, StyleRun};
use super::vocabulary::Vocabulary;

/// Name reported to hosts
pub const LANGUAGE_NAME: &str = "TwistLang";

/// File extensions handled by this lexer
pub const EXTENSIONS: &[&str] = &["twist"];

/// Whether `path` looks like a TwistLang source file
pub fn is_twist_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Clamp `range` to a buffer of `len` bytes. Inverted ranges become empty.
pub fn clamp_range(len: usize, range: Range<usize>) -> Range<usize> {
    let end = range.end.min(len);
    let start = range.start.min(end);
    start..end
}

/// Offset of the first byte of the line containing `pos`
pub fn line_start_before(buffer: &[u8], pos: usize) -> usize {
    let pos = pos.min(buffer.len());
    buffer[..pos]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1)
}

/// Result of one restyle call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restyle {
    /// First byte the runs apply to
    pub start: usize,
    /// Runs laid end to end from `start`
    pub runs: Vec<StyleRun>,
}

impl Restyle {
    /// Total bytes covered by the runs
    pub fn len(&self) -> ByteLen {
        self.runs.iter().map(|run| run.len).sum()
    }

    /// True if the restyled range was empty
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// One past the last byte covered
    pub fn end(&self) -> usize {
        self.start + self.len().get()
    }

    /// Runs paired with their absolute byte offsets
    pub fn spans(&self) -> impl Iterator<Item = (usize, StyleRun)> + '_ {
        with_offsets(self.start, &self.runs)
    }
}

/// Restyles byte ranges of a host buffer
#[derive(Debug, Clone, Default)]
pub struct IncrementalLexer {
    classifier: TokenClassifier,
}

impl IncrementalLexer {
    /// Lexer over its own copy of `vocab`
    pub fn new(vocab: Vocabulary) -> Self {
        Self::with_shared(Arc::new(vocab))
    }

    /// Share one frozen vocabulary between several lexers
    pub fn with_shared(vocab: Arc<Vocabulary>) -> Self {
        Self {
            classifier: TokenClassifier::new(vocab),
        }
    }

    /// The vocabulary currently used for classification
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        self.classifier.vocabulary()
    }

    /// Swap in a new vocabulary.
    ///
    /// The old tables are never modified; anything still holding the previous
    /// `Arc` keeps seeing them.
    pub fn reload(&mut self, vocab: Vocabulary) {
        debug!(words = vocab.word_count(), "reloading vocabulary");
        self.classifier = TokenClassifier::new(Arc::new(vocab));
    }

    /// Classify `range` of `buffer`.
    ///
    /// The range is clamped to the buffer and the returned runs cover it
    /// exactly.
    pub fn restyle(&self, buffer: &[u8], range: Range<usize>) -> Restyle {
        let range = clamp_range(buffer.len(), range);
        let runs = self.classifier.classify(buffer, range.start, range.end);
        debug!(
            start = range.start,
            end = range.end,
            runs = runs.len(),
            "restyled range"
        );
        Restyle {
            start: range.start,
            runs,
        }
    }

    /// Like [`restyle`](Self::restyle), but first moves the start back to
    /// the beginning of its line so declaration context is seen.
    pub fn restyle_lines(&self, buffer: &[u8], range: Range<usize>) -> Restyle {
        let range = clamp_range(buffer.len(), range);
        let start = line_start_before(buffer, range.start);
        self.restyle(buffer, start..range.end)
    }

    /// Classify the whole buffer
    pub fn restyle_all(&self, buffer: &[u8]) -> Restyle {
        self.restyle(buffer, 0..buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::StyleTag;
    use pretty_assertions::assert_eq;

    fn tags(restyle: &Restyle) -> Vec<StyleTag> {
        restyle.runs.iter().map(|r| r.tag).collect()
    }

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(10, 2..5), 2..5);
        assert_eq!(clamp_range(10, 2..50), 2..10);
        assert_eq!(clamp_range(10, 20..50), 10..10);
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 7..3;
        assert_eq!(clamp_range(10, inverted), 3..3);
    }

    #[test]
    fn test_line_start_before() {
        let buf = b"ab\ncd\nef";
        assert_eq!(line_start_before(buf, 0), 0);
        assert_eq!(line_start_before(buf, 2), 0);
        assert_eq!(line_start_before(buf, 3), 3);
        assert_eq!(line_start_before(buf, 7), 6);
        assert_eq!(line_start_before(buf, 100), 6);
    }

    #[test]
    fn test_restyle_covers_range() {
        let lexer = IncrementalLexer::default();
        let buf = "let π = 3.14 // pi\nout(π)".as_bytes();
        let restyle = lexer.restyle(buf, 4..buf.len() + 10);
        assert_eq!(restyle.start, 4);
        assert_eq!(restyle.end(), buf.len());
        assert_eq!(restyle.len().get(), buf.len() - 4);
    }

    #[test]
    fn test_restyle_mid_declaration_loses_context() {
        let lexer = IncrementalLexer::default();
        let buf = b"namespace Foo {}";
        let from_start = lexer.restyle(buf, 0..13);
        assert_eq!(
            tags(&from_start),
            vec![StyleTag::Keyword, StyleTag::Default, StyleTag::NamespaceIdentifier]
        );
        let mid = lexer.restyle(buf, 10..13);
        assert_eq!(tags(&mid), vec![StyleTag::Default]);
        let widened = lexer.restyle_lines(buf, 10..13);
        assert_eq!(widened.start, 0);
        assert_eq!(tags(&widened), tags(&from_start));
    }

    #[test]
    fn test_restyle_is_idempotent() {
        let lexer = IncrementalLexer::default();
        let buf = b"struct P { let x: Int }\nP::make(1).x";
        assert_eq!(lexer.restyle_all(buf), lexer.restyle_all(buf));
    }

    #[test]
    fn test_reload_swaps_vocabulary() {
        let mut lexer = IncrementalLexer::default();
        let before = Arc::clone(lexer.vocabulary());
        assert_eq!(tags(&lexer.restyle_all(b"yield")), vec![StyleTag::Default]);

        let vocab = Vocabulary::builder().keywords(["yield"]).build().unwrap();
        lexer.reload(vocab);
        assert_eq!(tags(&lexer.restyle_all(b"yield")), vec![StyleTag::Keyword]);
        // the previous snapshot is untouched
        assert!(!before.is_keyword("yield"));
    }

    #[test]
    fn test_spans_are_contiguous() {
        let lexer = IncrementalLexer::default();
        let restyle = lexer.restyle(b"a + b", 1..5);
        let spans: Vec<(usize, usize)> = restyle.spans().map(|(at, r)| (at, r.byte_len())).collect();
        assert_eq!(spans, vec![(1, 1), (2, 1), (3, 1), (4, 1)]);
    }

    #[test]
    fn test_is_twist_file() {
        assert!(is_twist_file(Path::new("main.twist")));
        assert!(is_twist_file(Path::new("lib/Core.TWIST")));
        assert!(!is_twist_file(Path::new("main.rs")));
        assert!(!is_twist_file(Path::new("twist")));
    }
}
