//! Include directive detection and resolution
//!
//! A directive line looks like `#include "lib/core.twist"` or
//! `#include <std>`. The resolver turns the argument into an existing file,
//! trying the including file's directory first, then the path as given,
//! then each include search path.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::syntax::Vocabulary;

/// Keyword that starts an include line
pub const INCLUDE_KEYWORD: &str = "#include";

/// Search path used when none are configured
pub const DEFAULT_SEARCH_PATH: &str = "include";

/// How an include argument was delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `"path"`
    Quoted,
    /// `<path>`
    Angled,
}

/// The argument of an include directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludePath {
    pub path: String,
    pub kind: Delimiter,
}

/// A parsed include line. Produced on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub raw_line: String,
    pub argument: Option<IncludePath>,
}

/// Which directive a line carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    Include,
    Define,
    Macro,
    /// Any other configured prefix, e.g. `#if`
    Other(String),
}

/// True if the trimmed line starts with `#include`
pub fn is_include_line(line: &str) -> bool {
    line.trim().starts_with(INCLUDE_KEYWORD)
}

/// Interior of the first `open`..`close` pair in `text`
fn delimited(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)? + open.len_utf8();
    let len = text[start..].find(close)?;
    Some(&text[start..start + len])
}

/// The include argument with its delimiter.
///
/// A `"..."` pair wins over `<...>`; an unclosed pair counts as absent.
pub fn extract_argument(line: &str) -> Option<IncludePath> {
    let line = line.trim();
    if let Some(path) = delimited(line, '"', '"') {
        return Some(IncludePath {
            path: path.to_string(),
            kind: Delimiter::Quoted,
        });
    }
    delimited(line, '<', '>').map(|path| IncludePath {
        path: path.to_string(),
        kind: Delimiter::Angled,
    })
}

/// The include argument without its delimiter
pub fn extract_path(line: &str) -> Option<String> {
    extract_argument(line).map(|arg| arg.path)
}

/// Parse an include line, or `None` if the line isn't one
pub fn parse_include(line: &str) -> Option<IncludeDirective> {
    if !is_include_line(line) {
        return None;
    }
    Some(IncludeDirective {
        raw_line: line.to_string(),
        argument: extract_argument(line),
    })
}

/// Which directive, if any, the trimmed line starts with
pub fn directive_kind(line: &str, vocab: &Vocabulary) -> Option<DirectiveKind> {
    let prefix = vocab.directive_prefix(line.trim())?;
    Some(match prefix {
        INCLUDE_KEYWORD => DirectiveKind::Include,
        "#define" => DirectiveKind::Define,
        "#macro" => DirectiveKind::Macro,
        other => DirectiveKind::Other(other.to_string()),
    })
}

/// Resolves include arguments to files on disk
#[derive(Debug, Clone)]
pub struct DirectiveResolver {
    search_paths: Vec<PathBuf>,
    working_dir: Option<PathBuf>,
}

impl Default for DirectiveResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectiveResolver {
    /// Resolver with the default `include` search path
    pub fn new() -> Self {
        Self {
            search_paths: vec![PathBuf::from(DEFAULT_SEARCH_PATH)],
            working_dir: None,
        }
    }

    /// Replace the search paths
    pub fn with_search_paths(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.search_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Append a search path, tried after the existing ones
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// Directory that relative paths are taken from instead of the process cwd
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Search paths in the order they are tried
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    fn from_working_dir(&self, path: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Every location tried for `path`, in order
    pub fn candidates(&self, path: &str, base_dir: &Path) -> Vec<PathBuf> {
        let path = Path::new(path);
        let mut out = vec![base_dir.join(path), self.from_working_dir(path)];
        out.extend(
            self.search_paths
                .iter()
                .map(|dir| self.from_working_dir(&dir.join(path))),
        );
        out
    }

    /// First existing file among [`candidates`](Self::candidates)
    pub fn resolve(&self, path: &str, base_dir: &Path) -> Option<PathBuf> {
        if path.is_empty() {
            return None;
        }
        let found = self
            .candidates(path, base_dir)
            .into_iter()
            .find(|candidate| candidate.is_file());
        match &found {
            Some(file) => debug!(path, file = %file.display(), "resolved include"),
            None => debug!(path, base = %base_dir.display(), "include not found"),
        }
        found
    }

    /// Detect, extract and resolve in one step.
    ///
    /// Each way of failing is reported as a distinct error value for the
    /// host to show.
    pub fn resolve_line(&self, line: &str, base_dir: &Path) -> Result<PathBuf> {
        let directive = parse_include(line).ok_or(Error::NotAnInclude)?;
        let argument = directive
            .argument
            .filter(|arg| !arg.path.is_empty())
            .ok_or(Error::MissingIncludeArgument)?;
        self.resolve(&argument.path, base_dir)
            .ok_or_else(|| Error::FileNotFound(PathBuf::from(argument.path)))
    }
}
