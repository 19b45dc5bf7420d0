//! Word tables for TwistLang
//!
//! A [`Vocabulary`] is frozen once built. Changing the word lists means
//! building a new value and handing it to
//! [`IncrementalLexer::reload`](super::IncrementalLexer::reload).

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Sentinel that starts a directive word (`#include`)
pub const DIRECTIVE_SENTINEL: char = '#';

/// Keywords that make the next identifier a declared name
pub const DECLARATION_KEYWORDS: [&str; 2] = ["namespace", "struct"];

const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "let", "in", "and", "or", "ret", "auto", "assert",
    "lambda", "break", "continue", "out", "outln", "struct", "namespace", "func", "return",
    "where", "println", "print", "match", "case", "default", "import", "export", "as", "from",
    "del", "new",
];

const MODIFIERS: &[&str] = &[
    "const", "static", "global", "final", "private", "public", "protected", "volatile",
    "mutable", "transient", "synchronized",
];

const TYPES: &[&str] = &[
    "Int", "Bool", "String", "Char", "Null", "Double", "Namespace", "Func", "Lambda",
];

const LITERALS: &[&str] = &["true", "false", "null", "none", "self", "super"];

const SPECIALS: &[&str] = &[
    "input", "typeof", "sizeof", "exit", "len", "range", "map", "filter", "reduce",
];

const DIRECTIVES: &[&str] = &[
    "#include", "#define", "#macro", "#if", "#else", "#endif", "#debug", "#test",
];

/// The five disjoint word tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Keywords,
    Modifiers,
    Types,
    Literals,
    Specials,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Keywords => "keywords",
            Table::Modifiers => "modifiers",
            Table::Types => "types",
            Table::Literals => "literals",
            Table::Specials => "specials",
        };
        f.write_str(name)
    }
}

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_@]*$").expect("valid word pattern"))
}

fn directive_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#[A-Za-z_][A-Za-z0-9_]*$").expect("valid directive pattern"))
}

/// Immutable keyword/modifier/type/literal/special tables plus directive prefixes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    keywords: HashSet<String>,
    modifiers: HashSet<String>,
    types: HashSet<String>,
    literals: HashSet<String>,
    specials: HashSet<String>,
    /// Sorted longest first so prefix matching picks `#include` over `#in...`
    directives: Vec<String>,
}

impl Vocabulary {
    /// The built-in TwistLang vocabulary
    pub fn twist() -> Self {
        fn set(words: &[&str]) -> HashSet<String> {
            words.iter().map(|w| w.to_string()).collect()
        }
        let mut directives: Vec<String> = DIRECTIVES.iter().map(|d| d.to_string()).collect();
        directives.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self {
            keywords: set(KEYWORDS),
            modifiers: set(MODIFIERS),
            types: set(TYPES),
            literals: set(LITERALS),
            specials: set(SPECIALS),
            directives,
        }
    }

    /// Start from the built-in tables and add to them
    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder::default()
    }

    /// Control-flow and declaration words (`if`, `let`, `func`, ...)
    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    /// Storage and visibility modifiers (`const`, `global`, ...)
    pub fn is_modifier(&self, word: &str) -> bool {
        self.modifiers.contains(word)
    }

    /// Built-in type names
    pub fn is_type(&self, word: &str) -> bool {
        self.types.contains(word)
    }

    /// Literal words such as `true` and `null`
    pub fn is_literal(&self, word: &str) -> bool {
        self.literals.contains(word)
    }

    /// Built-in functions
    pub fn is_special(&self, word: &str) -> bool {
        self.specials.contains(word)
    }

    /// `namespace` and `struct`
    pub fn is_declaration_keyword(word: &str) -> bool {
        DECLARATION_KEYWORDS.contains(&word)
    }

    /// Which table, if any, holds `word`
    pub fn table_of(&self, word: &str) -> Option<Table> {
        if self.is_keyword(word) {
            Some(Table::Keywords)
        } else if self.is_modifier(word) {
            Some(Table::Modifiers)
        } else if self.is_type(word) {
            Some(Table::Types)
        } else if self.is_literal(word) {
            Some(Table::Literals)
        } else if self.is_special(word) {
            Some(Table::Specials)
        } else {
            None
        }
    }

    /// The directive prefix `text` starts with, if any.
    ///
    /// The prefix must end at a word boundary, so `#iffy` matches nothing.
    pub fn directive_prefix<'a>(&'a self, text: &str) -> Option<&'a str> {
        self.directives
            .iter()
            .find(|prefix| {
                text.starts_with(prefix.as_str())
                    && !text[prefix.len()..]
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_alphanumeric() || c == '_')
            })
            .map(String::as_str)
    }

    /// Number of words across the five tables
    pub fn word_count(&self) -> usize {
        self.keywords.len()
            + self.modifiers.len()
            + self.types.len()
            + self.literals.len()
            + self.specials.len()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::twist()
    }
}

/// Collects extra words before freezing them into a [`Vocabulary`]
#[derive(Debug, Clone, Default)]
pub struct VocabularyBuilder {
    extra: Vec<(Table, String)>,
    directives: Vec<String>,
}

impl VocabularyBuilder {
    /// Add `words` to `table`
    pub fn add(mut self, table: Table, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra
            .extend(words.into_iter().map(|w| (table, w.into())));
        self
    }

    /// Shorthand for `add(Table::Keywords, words)`
    pub fn keywords(self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.add(Table::Keywords, words)
    }

    /// Shorthand for `add(Table::Modifiers, words)`
    pub fn modifiers(self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.add(Table::Modifiers, words)
    }

    /// Shorthand for `add(Table::Types, words)`
    pub fn types(self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.add(Table::Types, words)
    }

    /// Shorthand for `add(Table::Literals, words)`
    pub fn literals(self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.add(Table::Literals, words)
    }

    /// Shorthand for `add(Table::Specials, words)`
    pub fn specials(self, words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.add(Table::Specials, words)
    }

    /// Add directive prefixes such as `#pragma`
    pub fn directives(mut self, prefixes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.directives.extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Validate and freeze.
    ///
    /// Words must look like identifiers, directives like `#name`, and no
    /// word may appear in two tables.
    pub fn build(self) -> Result<Vocabulary> {
        let mut vocab = Vocabulary::twist();

        for (table, word) in self.extra {
            if !word_pattern().is_match(&word) {
                return Err(Error::InvalidWord { table, word });
            }
            match vocab.table_of(&word) {
                Some(existing) if existing == table => continue,
                Some(existing) => {
                    return Err(Error::VocabularyOverlap {
                        word,
                        first: existing,
                        second: table,
                    })
                }
                None => {}
            }
            let target = match table {
                Table::Keywords => &mut vocab.keywords,
                Table::Modifiers => &mut vocab.modifiers,
                Table::Types => &mut vocab.types,
                Table::Literals => &mut vocab.literals,
                Table::Specials => &mut vocab.specials,
            };
            target.insert(word);
        }

        for prefix in self.directives {
            if !directive_pattern().is_match(&prefix) {
                return Err(Error::InvalidDirective(prefix));
            }
            if !vocab.directives.contains(&prefix) {
                vocab.directives.push(prefix);
            }
        }
        vocab
            .directives
            .sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        Ok(vocab)
    }
}
