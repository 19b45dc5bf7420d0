//! Error types for twistlex
//!
//! Classification itself never fails. These cover configuration, the
//! filesystem and the convenience wrappers around include resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::syntax::Table;

/// Result type alias for twistlex operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Not a valid word for {table}: {word:?}")]
    InvalidWord { table: Table, word: String },

    #[error("Not a valid directive prefix: {0:?}")]
    InvalidDirective(String),

    #[error("{word:?} is listed in both {first} and {second}")]
    VocabularyOverlap {
        word: String,
        first: Table,
        second: Table,
    },

    #[error("Not an include directive")]
    NotAnInclude,

    #[error("Include directive has no \"path\" or <path> argument")]
    MissingIncludeArgument,

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{0}")]
    Usage(String),
}
