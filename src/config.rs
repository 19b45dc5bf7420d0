//! Configuration file support
//!
//! Loads settings from ~/.twistlex.toml (or %USERPROFILE%\.twistlex.toml on
//! Windows). Every key is optional.
//!
//! Example:
//! ```toml
//! include-paths = ["include", "/usr/share/twist"]
//! color = true
//!
//! [vocabulary]
//! keywords = ["yield"]
//! types = ["Float"]
//! directives = ["#pragma"]
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::directive::{DirectiveResolver, DEFAULT_SEARCH_PATH};
use crate::error::Result;
use crate::syntax::Vocabulary;

const FILE_NAME: &str = ".twistlex.toml";

/// Words added on top of the built-in tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VocabularyConfig {
    pub keywords: Vec<String>,
    pub modifiers: Vec<String>,
    pub types: Vec<String>,
    pub literals: Vec<String>,
    pub specials: Vec<String>,
    pub directives: Vec<String>,
}

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Directories searched for includes after the file's own directory
    pub include_paths: Vec<PathBuf>,
    /// Whether the CLI paints output with terminal colors
    pub color: bool,
    pub vocabulary: VocabularyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_paths: vec![PathBuf::from(DEFAULT_SEARCH_PATH)],
            color: true,
            vocabulary: VocabularyConfig::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(FILE_NAME))
        }
    }

    /// Load from the default location; a missing file means defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`; a missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loading config");
                Self::parse(&contents)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Built-in vocabulary extended with the configured words
    pub fn vocabulary(&self) -> Result<Vocabulary> {
        let v = &self.vocabulary;
        Vocabulary::builder()
            .keywords(v.keywords.iter().cloned())
            .modifiers(v.modifiers.iter().cloned())
            .types(v.types.iter().cloned())
            .literals(v.literals.iter().cloned())
            .specials(v.specials.iter().cloned())
            .directives(v.directives.iter().cloned())
            .build()
    }

    /// Resolver searching the configured include paths
    pub fn resolver(&self) -> DirectiveResolver {
        DirectiveResolver::new().with_search_paths(self.include_paths.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_config() {
        let contents = r##"
# Comment
include-paths = ["lib", "/opt/twist"]
color = false

[vocabulary]
keywords = ["yield"]
directives = ["#pragma"]
        "##;

        let config = Config::parse(contents).unwrap();
        assert_eq!(
            config.include_paths,
            vec![PathBuf::from("lib"), PathBuf::from("/opt/twist")]
        );
        assert!(!config.color);
        assert_eq!(config.vocabulary.keywords, vec!["yield".to_string()]);

        let vocab = config.vocabulary().unwrap();
        assert!(vocab.is_keyword("yield"));
        assert_eq!(vocab.directive_prefix("#pragma once"), Some("#pragma"));
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::default().vocabulary().unwrap(), Vocabulary::twist());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(matches!(Config::parse("tab-width = 4"), Err(Error::Config(_))));
        assert!(matches!(
            Config::parse("[vocabulary]\nverbs = [\"x\"]"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_bad_words_surface_on_build() {
        let config = Config::parse("[vocabulary]\ntypes = [\"if\"]").unwrap();
        assert!(matches!(config.vocabulary(), Err(Error::VocabularyOverlap { .. })));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_resolver_uses_include_paths() {
        let config = Config::parse("include-paths = [\"lib\"]").unwrap();
        assert_eq!(config.resolver().search_paths(), &[PathBuf::from("lib")]);
    }
}
