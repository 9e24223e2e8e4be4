//! Language registry: the set of languages configured on the site.
//!
//! Enrichment walks the registry in registration order, so the order in
//! which languages are added is the order of the emitted `localeInfo`
//! entries.

use crate::i18n::Langcode;
use anyhow::{bail, Result};

/// Configuration for a configured language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Language code (e.g., "en", "de")
    pub code: Langcode,

    /// Display name of the language (e.g., "English", "German")
    pub name: String,

    /// Whether this is the site default language (only one should be true)
    pub is_default: bool,

    /// Locked languages ("und", "zxx") are system languages that are never
    /// offered as a translation target
    pub locked: bool,
}

impl LanguageConfig {
    /// Create a configurable, non-default language.
    pub fn new(code: Langcode, name: impl Into<String>) -> Self {
        let locked = code.is_locked();
        Self {
            code,
            name: name.into(),
            is_default: false,
            locked,
        }
    }
}

/// Read-only view of the configured languages.
pub trait LanguageRegistry {
    /// Configurable (non-locked) languages, in registration order.
    fn languages(&self) -> Vec<&LanguageConfig>;

    /// The site default language, if one is configured.
    fn default_language(&self) -> Option<&LanguageConfig>;
}

impl<T: LanguageRegistry + ?Sized> LanguageRegistry for &T {
    fn languages(&self) -> Vec<&LanguageConfig> {
        (**self).languages()
    }

    fn default_language(&self) -> Option<&LanguageConfig> {
        (**self).default_language()
    }
}

/// Language registry backed by an ordered list of language configurations.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLanguages {
    languages: Vec<LanguageConfig>,
}

impl ConfiguredLanguages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a comma-separated list of language codes.
    ///
    /// The first code becomes the default language. Duplicates are ignored.
    ///
    /// # Example
    /// ```ignore
    /// let registry = ConfiguredLanguages::from_codes("en,de,fr")?;
    /// ```
    pub fn from_codes(codes: &str) -> Result<Self> {
        let mut registry = Self::new();

        for code in codes.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let code = Langcode::parse(code)?;
            let name = code.as_str().to_string();
            registry.add(LanguageConfig::new(code, name));
        }

        let first = match registry.languages.iter().position(|lang| !lang.locked) {
            Some(index) => index,
            None => bail!("No configurable language in '{}'", codes),
        };
        registry.languages[first].is_default = true;

        Ok(registry)
    }

    /// Add a language, keeping registration order.
    ///
    /// Adding a code that is already registered replaces its configuration
    /// in place.
    pub fn add(&mut self, config: LanguageConfig) -> &mut Self {
        if config.is_default {
            for lang in &mut self.languages {
                lang.is_default = false;
            }
        }

        match self
            .languages
            .iter_mut()
            .find(|lang| lang.code == config.code)
        {
            Some(existing) => *existing = config,
            None => self.languages.push(config),
        }
        self
    }

    /// Builder style variant of [`ConfiguredLanguages::add`].
    pub fn with(mut self, config: LanguageConfig) -> Self {
        self.add(config);
        self
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all languages, including locked ones.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Check if a language code is registered and configurable.
    pub fn is_configurable(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| !lang.locked)
            .unwrap_or(false)
    }
}

impl LanguageRegistry for ConfiguredLanguages {
    fn languages(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| !lang.locked).collect()
    }

    fn default_language(&self) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.is_default)
    }
}
