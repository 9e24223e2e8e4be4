//! Resource object normalization with locale info.
//!
//! `LocaleInfoNormalizer` decorates an inner normalizer: the inner one
//! produces the serialized resource object, then `meta.localeInfo` is
//! attached for eligible resources. Cacheability of the inner result is
//! carried over unchanged.

use crate::alias::AliasLookup;
use crate::enricher::{LocaleInfoEnricher, LocaleInfoEntry};
use crate::error::LocaleInfoError;
use crate::i18n::LanguageRegistry;
use crate::resource::Resource;
use crate::translation::TranslationSettings;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;
use tracing::debug;

/// Member of `meta` holding the alternate-language paths.
pub const LOCALE_INFO_KEY: &str = "localeInfo";

/// Member of a resource object holding its metadata.
pub const META_KEY: &str = "meta";

/// How long a normalization may be cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxAge {
    #[default]
    Permanent,
    Seconds(u32),
}

/// What a serialized value's validity depends on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheableMetadata {
    pub cache_tags: BTreeSet<String>,
    pub cache_contexts: BTreeSet<String>,
    pub max_age: MaxAge,
}

impl CacheableMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cache_tag(mut self, tag: impl Into<String>) -> Self {
        self.cache_tags.insert(tag.into());
        self
    }

    pub fn with_cache_context(mut self, context: impl Into<String>) -> Self {
        self.cache_contexts.insert(context.into());
        self
    }

    pub fn with_max_age(mut self, max_age: MaxAge) -> Self {
        self.max_age = max_age;
        self
    }
}

/// A normalized value together with its cacheability.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheableNormalization {
    pub normalization: Value,
    pub cacheability: CacheableMetadata,
}

impl CacheableNormalization {
    pub fn new(normalization: Value, cacheability: CacheableMetadata) -> Self {
        Self {
            normalization,
            cacheability,
        }
    }

    /// Normalization without cache dependencies.
    pub fn permanent(normalization: Value) -> Self {
        Self::new(normalization, CacheableMetadata::default())
    }

    /// Transform the normalized value, keeping cacheability as is.
    pub fn try_map_normalization<F>(self, f: F) -> Result<Self, LocaleInfoError>
    where
        F: FnOnce(Value) -> Result<Value, LocaleInfoError>,
    {
        Ok(Self {
            normalization: f(self.normalization)?,
            cacheability: self.cacheability,
        })
    }
}

/// Turns a resource into its serialized representation.
pub trait Normalize<R: ?Sized> {
    fn normalize(&self, resource: &R) -> Result<CacheableNormalization, LocaleInfoError>;
}

impl<R, F> Normalize<R> for F
where
    R: ?Sized,
    F: Fn(&R) -> Result<CacheableNormalization, LocaleInfoError>,
{
    fn normalize(&self, resource: &R) -> Result<CacheableNormalization, LocaleInfoError> {
        self(resource)
    }
}

/// Write `entries` under `meta.localeInfo` of a serialized resource object.
///
/// `meta` is created when missing or null. Other `meta` members and the rest
/// of the payload are left untouched; an existing `localeInfo` is replaced.
pub fn attach_locale_info(
    mut payload: Value,
    entries: &[LocaleInfoEntry],
) -> Result<Value, LocaleInfoError> {
    let object = payload
        .as_object_mut()
        .ok_or(LocaleInfoError::NotAnObject)?;

    let meta = object
        .entry(META_KEY)
        .or_insert_with(|| Value::Object(Map::new()));
    if meta.is_null() {
        *meta = Value::Object(Map::new());
    }
    let meta = meta
        .as_object_mut()
        .ok_or(LocaleInfoError::MetaNotAnObject)?;

    let locale_info = entries
        .iter()
        .map(|entry| json!({ "langcode": entry.langcode.as_str(), "path": entry.path }))
        .collect();

    if meta
        .insert(LOCALE_INFO_KEY.to_string(), Value::Array(locale_info))
        .is_some()
    {
        debug!("Replaced existing meta.{}", LOCALE_INFO_KEY);
    }

    Ok(payload)
}

/// Normalizer decorating an inner one with `meta.localeInfo`.
pub struct LocaleInfoNormalizer<N, L, T, A> {
    inner: N,
    enricher: LocaleInfoEnricher<L, T, A>,
}

impl<N, L, T, A> LocaleInfoNormalizer<N, L, T, A>
where
    L: LanguageRegistry,
    T: TranslationSettings,
    A: AliasLookup,
{
    pub fn new(inner: N, enricher: LocaleInfoEnricher<L, T, A>) -> Self {
        Self { inner, enricher }
    }

    pub fn enricher(&self) -> &LocaleInfoEnricher<L, T, A> {
        &self.enricher
    }
}

impl<R, N, L, T, A> Normalize<R> for LocaleInfoNormalizer<N, L, T, A>
where
    R: Resource + ?Sized,
    N: Normalize<R>,
    L: LanguageRegistry,
    T: TranslationSettings,
    A: AliasLookup,
{
    fn normalize(&self, resource: &R) -> Result<CacheableNormalization, LocaleInfoError> {
        let metrics = self.enricher.metrics();
        metrics.record_resource_seen();

        let normalization = self.inner.normalize(resource)?;

        let Some(entries) = self.enricher.locale_info(resource)? else {
            metrics.record_skipped();
            return Ok(normalization);
        };

        debug!(
            "{} ({}): {} alternate locale(s)",
            resource.type_name(),
            resource.langcode(),
            entries.len()
        );
        let decorated =
            normalization.try_map_normalization(|value| attach_locale_info(value, &entries))?;
        metrics.record_decorated();

        Ok(decorated)
    }
}
