//! Path alias lookup.
//!
//! An alias maps a canonical system path (e.g. `/node/1`) to a
//! human-friendly path in a given language (e.g. `/artikel/meine-node`).

use crate::i18n::Langcode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors returned by an alias lookup backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AliasLookupError {
    #[error("source path '{0}' has to start with a slash")]
    InvalidPath(String),

    #[error("alias storage unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the alias of a system path in a language.
pub trait AliasLookup {
    /// Return the alias for `path` in `langcode`, or `path` itself when no
    /// alias exists.
    fn alias_by_path(&self, path: &str, langcode: &str) -> Result<String, AliasLookupError>;
}

impl<T: AliasLookup + ?Sized> AliasLookup for &T {
    fn alias_by_path(&self, path: &str, langcode: &str) -> Result<String, AliasLookupError> {
        (**self).alias_by_path(path, langcode)
    }
}

/// A single stored path alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAlias {
    /// Canonical system path (e.g., "/node/1")
    pub path: String,

    /// Alias for the path (e.g., "/articles/my-node")
    pub alias: String,

    /// Language of the alias; "und" applies to every language
    pub langcode: Langcode,
}

/// Alias storage held in memory.
///
/// Lookup prefers an alias in the requested language over a
/// language-neutral (`und`) one. Among aliases of equal preference the most
/// recently added wins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAliasStore {
    aliases: Vec<PathAlias>,
}

impl InMemoryAliasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load aliases from a JSON file holding an array of `PathAlias`.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read alias file {}", path.display()))?;
        let aliases: Vec<PathAlias> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse alias file {}", path.display()))?;

        Ok(Self { aliases })
    }

    /// Register an alias for a path in a language.
    pub fn add(&mut self, path: &str, alias: &str, langcode: Langcode) -> &mut Self {
        self.aliases.push(PathAlias {
            path: path.to_string(),
            alias: alias.to_string(),
            langcode,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    fn find(&self, path: &str, langcode: &str) -> Option<&PathAlias> {
        self.aliases
            .iter()
            .rev()
            .find(|a| a.path == path && a.langcode == langcode)
    }
}

impl AliasLookup for InMemoryAliasStore {
    fn alias_by_path(&self, path: &str, langcode: &str) -> Result<String, AliasLookupError> {
        if !path.starts_with('/') {
            return Err(AliasLookupError::InvalidPath(path.to_string()));
        }

        let alias = self
            .find(path, langcode)
            .or_else(|| self.find(path, Langcode::NOT_SPECIFIED))
            .map(|a| a.alias.clone())
            .unwrap_or_else(|| path.to_string());

        Ok(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn code(value: &str) -> Langcode {
        Langcode::parse(value).unwrap()
    }

    fn store() -> InMemoryAliasStore {
        let mut store = InMemoryAliasStore::new();
        store
            .add("/node/1", "/articles/my-node", code("en"))
            .add("/node/1", "/artikel/meine-node", code("de"));
        store
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_alias_in_requested_language() {
        let store = store();
        assert_eq!(
            store.alias_by_path("/node/1", "en").unwrap(),
            "/articles/my-node"
        );
        assert_eq!(
            store.alias_by_path("/node/1", "de").unwrap(),
            "/artikel/meine-node"
        );
    }

    #[test]
    fn test_missing_alias_returns_path() {
        let store = store();
        assert_eq!(store.alias_by_path("/node/1", "fr").unwrap(), "/node/1");
        assert_eq!(store.alias_by_path("/node/2", "en").unwrap(), "/node/2");
    }

    #[test]
    fn test_language_neutral_fallback() {
        let mut store = store();
        store.add("/node/1", "/neutral", code("und"));

        assert_eq!(store.alias_by_path("/node/1", "fr").unwrap(), "/neutral");
        // Language specific alias still wins
        assert_eq!(
            store.alias_by_path("/node/1", "en").unwrap(),
            "/articles/my-node"
        );
    }

    #[test]
    fn test_newest_alias_wins() {
        let mut store = store();
        store.add("/node/1", "/articles/renamed", code("en"));

        assert_eq!(
            store.alias_by_path("/node/1", "en").unwrap(),
            "/articles/renamed"
        );
    }

    #[test]
    fn test_path_without_leading_slash_is_rejected() {
        let store = store();
        let err = store.alias_by_path("node/1", "en").unwrap_err();
        assert_eq!(err, AliasLookupError::InvalidPath("node/1".to_string()));
        assert!(err.to_string().contains("start with a slash"));
    }

    // ==================== File Loading Tests ====================

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"path": "/node/1", "alias": "/articles/my-node", "langcode": "en"}},
                {{"path": "/node/1", "alias": "/artikel/meine-node", "langcode": "de"}}
            ]"#
        )
        .unwrap();

        let store = InMemoryAliasStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.alias_by_path("/node/1", "de").unwrap(),
            "/artikel/meine-node"
        );
    }

    #[test]
    fn test_from_json_file_invalid_langcode() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"path": "/node/1", "alias": "/a", "langcode": "German"}}]"#
        )
        .unwrap();

        let result = InMemoryAliasStore::from_json_file(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = InMemoryAliasStore::from_json_file(Path::new("/nonexistent/aliases.json"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read alias file"));
    }
}
