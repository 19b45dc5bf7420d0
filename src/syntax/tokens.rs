//! Style tags for TwistLang highlighting
//!
//! Each classified byte run carries exactly one of these tags.
//! The numeric ids match the style slots hosts allocate for the language.

use super::style::{Color, Style};

/// Lexical category of a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleTag {
    /// Plain text, whitespace and anything unrecognised
    Default,
    /// Language keywords (if, for, let, namespace, ...)
    Keyword,
    /// Built-in type names (Int, String, ...)
    Type,
    /// Line comments (// ...)
    Comment,
    /// String and char literals
    String,
    /// Numeric literals
    Number,
    /// Operators and punctuation
    Operator,
    /// Identifier directly followed by `(`
    FunctionCall,
    /// Variable modifiers (const, static, global, ...)
    Modifier,
    /// Preprocessor directives (#include, #define, #macro)
    Directive,
    /// Literal words (true, false, null, ...)
    Literal,
    /// Declared namespace/struct names and `Name::` qualifiers
    NamespaceIdentifier,
    /// Built-in functions (input, typeof, sizeof, ...)
    Special,
    /// Identifier directly followed by `.`
    MemberAccess,
}

impl StyleTag {
    /// Every tag, in style-id order
    pub const ALL: [StyleTag; 14] = [
        StyleTag::Default,
        StyleTag::Keyword,
        StyleTag::Type,
        StyleTag::Comment,
        StyleTag::String,
        StyleTag::Number,
        StyleTag::Operator,
        StyleTag::FunctionCall,
        StyleTag::Modifier,
        StyleTag::Directive,
        StyleTag::Literal,
        StyleTag::NamespaceIdentifier,
        StyleTag::Special,
        StyleTag::MemberAccess,
    ];

    /// Numeric style slot used by hosts
    pub fn style_id(&self) -> u8 {
        match self {
            StyleTag::Default => 0,
            StyleTag::Keyword => 1,
            StyleTag::Type => 2,
            StyleTag::Comment => 3,
            StyleTag::String => 4,
            StyleTag::Number => 5,
            StyleTag::Operator => 6,
            StyleTag::FunctionCall => 7,
            StyleTag::Modifier => 8,
            StyleTag::Directive => 9,
            StyleTag::Literal => 10,
            StyleTag::NamespaceIdentifier => 11,
            StyleTag::Special => 12,
            StyleTag::MemberAccess => 13,
        }
    }

    /// Inverse of [`StyleTag::style_id`]
    pub fn from_style_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Default terminal style for this tag
    pub fn default_style(&self) -> Style {
        match self {
            StyleTag::Default => Style::default(),
            StyleTag::Keyword => Style::fg(Color::Magenta).with_bold(),
            StyleTag::Type => Style::fg(Color::BrightMagenta),
            StyleTag::Comment => Style::fg(Color::BrightBlack).with_italic(),
            StyleTag::String => Style::fg(Color::Green),
            StyleTag::Number => Style::fg(Color::Yellow),
            StyleTag::Operator => Style::fg(Color::Blue),
            StyleTag::FunctionCall => Style::fg(Color::Red),
            StyleTag::Modifier => Style::fg(Color::BrightBlue).with_bold(),
            StyleTag::Directive => Style::fg(Color::BrightRed),
            StyleTag::Literal => Style::fg(Color::BrightYellow),
            StyleTag::NamespaceIdentifier => Style::fg(Color::Cyan).with_underline(),
            StyleTag::Special => Style::fg(Color::BrightCyan),
            StyleTag::MemberAccess => Style::fg(Color::BrightGreen),
        }
    }

    /// Human-readable description, as shown in style pickers
    pub fn description(&self) -> &'static str {
        match self {
            StyleTag::Default => "Default",
            StyleTag::Keyword => "Keyword",
            StyleTag::Type => "Type",
            StyleTag::Comment => "Comment",
            StyleTag::String => "String",
            StyleTag::Number => "Number",
            StyleTag::Operator => "Operator",
            StyleTag::FunctionCall => "Function",
            StyleTag::Modifier => "Modifier",
            StyleTag::Directive => "Directive",
            StyleTag::Literal => "Literal",
            StyleTag::NamespaceIdentifier => "Namespace",
            StyleTag::Special => "Special",
            StyleTag::MemberAccess => "Member",
        }
    }

    /// Variant name, stable for dumps and config files
    pub fn name(&self) -> &'static str {
        match self {
            StyleTag::Default => "Default",
            StyleTag::Keyword => "Keyword",
            StyleTag::Type => "Type",
            StyleTag::Comment => "Comment",
            StyleTag::String => "String",
            StyleTag::Number => "Number",
            StyleTag::Operator => "Operator",
            StyleTag::FunctionCall => "FunctionCall",
            StyleTag::Modifier => "Modifier",
            StyleTag::Directive => "Directive",
            StyleTag::Literal => "Literal",
            StyleTag::NamespaceIdentifier => "NamespaceIdentifier",
            StyleTag::Special => "Special",
            StyleTag::MemberAccess => "MemberAccess",
        }
    }

    /// Parse a tag from its [`StyleTag::name`]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_ids_are_dense() {
        for (i, tag) in StyleTag::ALL.iter().enumerate() {
            assert_eq!(tag.style_id() as usize, i);
            assert_eq!(StyleTag::from_style_id(i as u8), Some(*tag));
        }
        assert_eq!(StyleTag::from_style_id(14), None);
    }

    #[test]
    fn test_default_styles() {
        assert!(StyleTag::Default.default_style().is_default());
        assert!(!StyleTag::Keyword.default_style().is_default());
        assert!(StyleTag::Comment.default_style().italic);
        assert!(StyleTag::NamespaceIdentifier.default_style().underline);
    }

    #[test]
    fn test_from_name_roundtrip() {
        for tag in StyleTag::ALL {
            assert_eq!(StyleTag::from_name(tag.name()), Some(tag));
        }
        assert_eq!(StyleTag::from_name("Function"), None);
        assert_eq!(StyleTag::from_name(""), None);
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(StyleTag::FunctionCall.description(), "Function");
        assert_eq!(StyleTag::NamespaceIdentifier.description(), "Namespace");
    }
}
