//! Content translation settings.
//!
//! Tracks which (entity type, bundle) pairs have content translation
//! enabled. Only resources of translatable bundles are decorated with
//! locale info.

use anyhow::{bail, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Answers whether content translation is enabled for a bundle.
pub trait TranslationSettings {
    fn is_enabled(&self, entity_type_id: &str, bundle: &str) -> bool;
}

impl<T: TranslationSettings + ?Sized> TranslationSettings for &T {
    fn is_enabled(&self, entity_type_id: &str, bundle: &str) -> bool {
        (**self).is_enabled(entity_type_id, bundle)
    }
}

/// In-memory translation settings: translatable bundles per entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTranslationSettings {
    enabled: BTreeMap<String, BTreeSet<String>>,
}

impl ContentTranslationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list of `entity_type:bundle` pairs.
    ///
    /// # Example
    /// ```ignore
    /// let settings = ContentTranslationSettings::parse("node:article,taxonomy_term:tags")?;
    /// assert!(settings.is_enabled("node", "article"));
    /// ```
    pub fn parse(list: &str) -> Result<Self> {
        let mut settings = Self::new();

        for pair in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (entity_type_id, bundle) = match pair.split_once(':') {
                Some((entity_type_id, bundle)) => (entity_type_id.trim(), bundle.trim()),
                None => bail!(
                    "Invalid translatable bundle '{}', expected 'entity_type:bundle'",
                    pair
                ),
            };
            if entity_type_id.is_empty() || bundle.is_empty() {
                bail!(
                    "Invalid translatable bundle '{}', expected 'entity_type:bundle'",
                    pair
                );
            }
            settings.set_enabled(entity_type_id, bundle, true);
        }

        Ok(settings)
    }

    /// Enable or disable content translation for a bundle.
    pub fn set_enabled(&mut self, entity_type_id: &str, bundle: &str, enabled: bool) {
        if enabled {
            self.enabled
                .entry(entity_type_id.to_string())
                .or_default()
                .insert(bundle.to_string());
        } else if let Some(bundles) = self.enabled.get_mut(entity_type_id) {
            bundles.remove(bundle);
            if bundles.is_empty() {
                self.enabled.remove(entity_type_id);
            }
        }
    }

    /// Number of bundles with translation enabled.
    pub fn len(&self) -> usize {
        self.enabled.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl TranslationSettings for ContentTranslationSettings {
    fn is_enabled(&self, entity_type_id: &str, bundle: &str) -> bool {
        self.enabled
            .get(entity_type_id)
            .is_some_and(|bundles| bundles.contains(bundle))
    }
}
