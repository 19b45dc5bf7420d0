//! Syntax classification for TwistLang
//!
//! Layered leaf-first:
//! - `scanner`: UTF-8 decoding with explicit byte lengths
//! - `vocabulary`: frozen word tables
//! - `classifier`: range-scoped tokenizer and the identifier decision table
//! - `lexer`: the restyle entry point hosts call on every edit

mod classifier;
mod lexer;
mod scanner;
mod style;
mod tokens;
mod vocabulary;

pub use classifier::{
    classify_word, Rule, ScanContext, TokenClassifier, WordInput, DECISION_TABLE, OPERATOR_CHARS,
};
pub use lexer::{
    clamp_range, is_twist_file, line_start_before, IncrementalLexer, Restyle, EXTENSIONS,
    LANGUAGE_NAME,
};
pub use scanner::{decode_at, sequence_len, ByteLen, ByteScanner, Decoded};
pub use style::{with_offsets, Color, Style, StyleRun};
pub use tokens::StyleTag;
pub use vocabulary::{
    Table, Vocabulary, VocabularyBuilder, DECLARATION_KEYWORDS, DIRECTIVE_SENTINEL,
};
