//! Range-scoped token classification
//!
//! [`TokenClassifier::classify`] turns a byte range into [`StyleRun`]s that
//! cover the range exactly. Nothing outside the range is read, not even for
//! lookahead, so the result depends only on the bytes inside it.

use std::sync::Arc;

use tracing::trace;

use super::scanner::{decode_at, ByteLen, ByteScanner, Decoded};
use super::style::StyleRun;
use super::tokens::StyleTag;
use super::vocabulary::{Vocabulary, DIRECTIVE_SENTINEL};

/// Characters that form operator runs
pub const OPERATOR_CHARS: &str = "+-*/%=&|^!<>~?.:;(){}[]";

fn is_operator(c: char) -> bool {
    OPERATOR_CHARS.contains(c)
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == DIRECTIVE_SENTINEL
}

fn is_word_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '@'
}

/// Cross-token memory for one classification pass.
///
/// Only tracks whether the previous significant token was `namespace` or
/// `struct`. Whitespace and other fallback characters leave it alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanContext {
    pub expecting_declared_name: bool,
}

impl ScanContext {
    /// Forget any pending declaration keyword
    pub fn reset(&mut self) {
        self.expecting_declared_name = false;
    }
}

/// Everything a decision rule may look at for one word
#[derive(Debug, Clone, Copy)]
pub struct WordInput<'a> {
    pub word: &'a str,
    pub expecting_declared_name: bool,
    /// Up to two raw bytes following the word, inside the scanned range
    pub lookahead: [Option<u8>; 2],
    pub vocab: &'a Vocabulary,
}

/// One row of the identifier decision table
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&WordInput<'_>) -> bool,
    pub tag: StyleTag,
    /// Whether a match leaves the context expecting a declared name
    pub expects_declared_name: bool,
}

const fn row(name: &'static str, matches: fn(&WordInput<'_>) -> bool, tag: StyleTag) -> Rule {
    Rule {
        name,
        matches,
        tag,
        expects_declared_name: false,
    }
}

/// Identifier classification, evaluated top to bottom. The last row always
/// matches.
pub static DECISION_TABLE: [Rule; 12] = [
    Rule {
        name: "declaration-keyword",
        matches: |w| Vocabulary::is_declaration_keyword(w.word),
        tag: StyleTag::Keyword,
        expects_declared_name: true,
    },
    row("declared-name", |w| w.expecting_declared_name, StyleTag::NamespaceIdentifier),
    row("keyword", |w| w.vocab.is_keyword(w.word), StyleTag::Keyword),
    row("special", |w| w.vocab.is_special(w.word), StyleTag::Special),
    row("modifier", |w| w.vocab.is_modifier(w.word), StyleTag::Modifier),
    row("type", |w| w.vocab.is_type(w.word), StyleTag::Type),
    row("literal", |w| w.vocab.is_literal(w.word), StyleTag::Literal),
    row(
        "directive",
        |w| w.word.starts_with(DIRECTIVE_SENTINEL),
        StyleTag::Directive,
    ),
    row(
        "namespace-qualifier",
        |w| w.lookahead == [Some(b':'), Some(b':')],
        StyleTag::NamespaceIdentifier,
    ),
    row("call", |w| w.lookahead[0] == Some(b'('), StyleTag::FunctionCall),
    row("member", |w| w.lookahead[0] == Some(b'.'), StyleTag::MemberAccess),
    row("plain", |_| true, StyleTag::Default),
];

/// Run a word through [`DECISION_TABLE`], updating `ctx`.
pub fn classify_word(input: &WordInput<'_>, ctx: &mut ScanContext) -> StyleTag {
    let rule = DECISION_TABLE
        .iter()
        .find(|rule| (rule.matches)(input))
        .unwrap_or(&DECISION_TABLE[DECISION_TABLE.len() - 1]);
    trace!(word = input.word, rule = rule.name, "classified word");
    ctx.expecting_declared_name = rule.expects_declared_name;
    rule.tag
}

/// Classifies byte ranges of TwistLang source
#[derive(Debug, Clone)]
pub struct TokenClassifier {
    vocab: Arc<Vocabulary>,
}

impl TokenClassifier {
    /// Classifier sharing `vocab`
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    /// The shared word tables
    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// Classify `buffer[start..end]`.
    ///
    /// Out-of-bounds ends are clamped to the buffer; an inverted range yields
    /// no runs. The returned lengths always sum to the clamped range length.
    pub fn classify(&self, buffer: &[u8], start: usize, end: usize) -> Vec<StyleRun> {
        let end = end.min(buffer.len());
        let start = start.min(end);

        let mut sc = ByteScanner::new(&buffer[start..end]);
        let mut ctx = ScanContext::default();
        let mut runs = Vec::new();

        while let Some(cur) = sc.peek() {
            let begin = sc.pos();
            let tag = self.scan_token(&mut sc, cur, &mut ctx);
            match tag {
                StyleTag::String | StyleTag::Comment => {
                    push_split_malformed(&mut runs, sc.slice_from(begin), tag)
                }
                _ => runs.push(StyleRun::new(sc.since(begin), tag)),
            }
        }

        runs
    }

    /// Consume one token starting at `cur` and return its tag
    fn scan_token(&self, sc: &mut ByteScanner<'_>, cur: Decoded, ctx: &mut ScanContext) -> StyleTag {
        let ch = cur.ch;
        let next = sc.peek_next().map(|d| d.ch);

        if ch == '/' && next == Some('/') {
            sc.eat_while(|c| c != '\n');
            ctx.reset();
            return StyleTag::Comment;
        }

        if ch == '"' || ch == '\'' {
            scan_string(sc, ch);
            ctx.reset();
            return StyleTag::String;
        }

        if ch.is_ascii_digit() || (ch == '.' && next.is_some_and(|c| c.is_ascii_digit())) {
            sc.eat_while(|c| c.is_ascii_digit() || c == '.');
            ctx.reset();
            return StyleTag::Number;
        }

        if is_word_start(ch) {
            let begin = sc.pos();
            sc.bump();
            sc.eat_while(is_word_continue);
            let word = String::from_utf8_lossy(sc.slice_from(begin));
            let input = WordInput {
                word: &word,
                expecting_declared_name: ctx.expecting_declared_name,
                lookahead: [sc.peek_byte_at(0), sc.peek_byte_at(1)],
                vocab: &self.vocab,
            };
            return classify_word(&input, ctx);
        }

        if is_operator(ch) {
            scan_operators(sc);
            ctx.reset();
            return StyleTag::Operator;
        }

        sc.bump();
        StyleTag::Default
    }
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self::new(Arc::new(Vocabulary::twist()))
    }
}

/// Consume a maximal operator run, stopping before a `//` comment
fn scan_operators(sc: &mut ByteScanner<'_>) {
    while let Some(d) = sc.peek() {
        let comment = d.ch == '/' && sc.peek_next().is_some_and(|n| n.ch == '/');
        if !is_operator(d.ch) || comment {
            break;
        }
        sc.bump();
    }
}

/// Push `bytes` as runs of `tag`, cutting out each malformed byte as its
/// own 1-byte Default run.
fn push_split_malformed(runs: &mut Vec<StyleRun>, bytes: &[u8], tag: StyleTag) {
    let mut pending = ByteLen::ZERO;
    let mut pos = 0;
    while let Some(d) = decode_at(bytes, pos) {
        if d.is_replacement() {
            if !pending.is_zero() {
                runs.push(StyleRun::new(pending, tag));
                pending = ByteLen::ZERO;
            }
            runs.push(StyleRun::new(d.len, StyleTag::Default));
        } else {
            pending += d.len;
        }
        pos += d.len.get();
    }
    if !pending.is_zero() {
        runs.push(StyleRun::new(pending, tag));
    }
}

/// Consume a quoted literal, including the closing quote if present.
///
/// A backslash flips the escaped flag; the flag only survives to the next
/// codepoint.
fn scan_string(sc: &mut ByteScanner<'_>, quote: char) {
    sc.bump();
    let mut escaped = false;
    while let Some(d) = sc.bump() {
        if d.ch == '\\' {
            escaped = !escaped;
        } else if d.ch == quote && !escaped {
            break;
        } else {
            escaped = false;
        }
    }
}
