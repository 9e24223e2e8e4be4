//! Locale info computation.
//!
//! For an eligible resource, lists the path under which the same entity is
//! reachable in every other configured language.

use crate::alias::AliasLookup;
use crate::error::LocaleInfoError;
use crate::i18n::{Langcode, LanguageRegistry};
use crate::metrics::EnrichmentMetrics;
use crate::path::PathResolver;
use crate::resource::{Resource, ResourceType};
use crate::translation::TranslationSettings;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Field a resource type must expose to be decorated.
pub const PATH_FIELD: &str = "path";

/// One alternate language of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleInfoEntry {
    pub langcode: Langcode,
    pub path: String,
}

/// Whether resources of `descriptor` get locale info: the type must have a
/// `path` field and its bundle must be translatable.
pub fn is_eligible<T: TranslationSettings + ?Sized>(
    descriptor: &ResourceType,
    translation: &T,
) -> bool {
    if !descriptor.has_field(PATH_FIELD) {
        return false;
    }

    translation.is_enabled(&descriptor.entity_type_id, &descriptor.bundle)
}

/// Computes `localeInfo` entries from the configured languages, the
/// translation settings and the alias storage.
pub struct LocaleInfoEnricher<L, T, A> {
    languages: L,
    translation: T,
    aliases: A,
    paths: PathResolver,
    metrics: Arc<EnrichmentMetrics>,
}

impl<L, T, A> LocaleInfoEnricher<L, T, A>
where
    L: LanguageRegistry,
    T: TranslationSettings,
    A: AliasLookup,
{
    pub fn new(languages: L, translation: T, aliases: A) -> Self {
        Self {
            languages,
            translation,
            aliases,
            paths: PathResolver::default(),
            metrics: Arc::new(EnrichmentMetrics::new()),
        }
    }

    pub fn with_path_resolver(mut self, paths: PathResolver) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<EnrichmentMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn aliases(&self) -> &A {
        &self.aliases
    }

    pub fn metrics(&self) -> &Arc<EnrichmentMetrics> {
        &self.metrics
    }

    pub fn is_eligible(&self, descriptor: &ResourceType) -> bool {
        is_eligible(descriptor, &self.translation)
    }

    /// Alternate-language paths of a resource, in registry order, without
    /// the eligibility check.
    ///
    /// The resource's own language is skipped. A resource without a
    /// derivable canonical path yields an empty list.
    pub fn locale_paths<R: Resource + ?Sized>(
        &self,
        resource: &R,
    ) -> Result<Vec<LocaleInfoEntry>, LocaleInfoError> {
        let Some(entity_path) = self.paths.resolve(resource) else {
            debug!(
                "{}: no canonical path derivable, no alternate paths",
                resource.type_name()
            );
            return Ok(Vec::new());
        };

        let current = resource.langcode();
        let mut entries = Vec::new();

        for language in self.languages.languages() {
            if language.code == *current {
                continue;
            }

            self.metrics.record_alias_lookup();
            let alias = self
                .aliases
                .alias_by_path(&entity_path, language.code.as_str())
                .map_err(|source| {
                    self.metrics.record_alias_failure();
                    warn!(
                        "Alias lookup failed for {} in '{}': {}",
                        entity_path, language.code, source
                    );
                    LocaleInfoError::AliasLookup {
                        path: entity_path.clone(),
                        langcode: language.code.to_string(),
                        source,
                    }
                })?;

            entries.push(LocaleInfoEntry {
                langcode: language.code.clone(),
                path: alias,
            });
        }

        Ok(entries)
    }

    /// Locale info of a resource.
    ///
    /// # Returns
    /// * `Ok(None)` if the resource is not eligible (nothing is emitted)
    /// * `Ok(Some(entries))` if it is, even when `entries` is empty
    pub fn locale_info<R: Resource + ?Sized>(
        &self,
        resource: &R,
    ) -> Result<Option<Vec<LocaleInfoEntry>>, LocaleInfoError> {
        if !self.is_eligible(resource.resource_type()) {
            return Ok(None);
        }

        self.locale_paths(resource).map(Some)
    }

    /// Locale info entries of a resource; empty when not eligible.
    pub fn enrich<R: Resource + ?Sized>(
        &self,
        resource: &R,
    ) -> Result<Vec<LocaleInfoEntry>, LocaleInfoError> {
        Ok(self.locale_info(resource)?.unwrap_or_default())
    }
}
