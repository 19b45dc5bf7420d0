//! twistlex - syntax classification and include resolution for TwistLang
//!
//! Two independent pieces that an editor host drives:
//! - [`syntax::IncrementalLexer`] restyles a byte range of the buffer and
//!   returns `(length, tag)` runs covering it exactly.
//! - [`directive::DirectiveResolver`] turns an `#include` line into a file
//!   on disk.

pub mod config;
pub mod directive;
pub mod error;
pub mod render;
pub mod syntax;

pub use directive::{DirectiveResolver, IncludeDirective};
pub use error::{Error, Result};
pub use syntax::{ByteLen, IncrementalLexer, StyleRun, StyleTag};
