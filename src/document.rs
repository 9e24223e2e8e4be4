//! Enrichment of whole JSON:API documents.
//!
//! Used when resource objects arrive already serialized: each member of
//! `data` and `included` is read back into a `ResourceObject` and run
//! through a normalizer whose inner stage returns the serialized value as
//! is.

use crate::error::LocaleInfoError;
use crate::i18n::Langcode;
use crate::normalizer::{CacheableNormalization, Normalize};
use crate::resource::{Resource, ResourceObject, ResourceType};
use serde_json::Value;
use tracing::{debug, warn};

/// A resource object together with its serialized form.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializedResource {
    resource: ResourceObject,
    serialized: Value,
}

impl SerializedResource {
    /// Gives `serialized` back when it is not a resource object.
    pub fn from_value(serialized: Value, active_langcode: &Langcode) -> Result<Self, Value> {
        match ResourceObject::from_json_api(&serialized, active_langcode) {
            Some(resource) => Ok(Self {
                resource,
                serialized,
            }),
            None => Err(serialized),
        }
    }
}

impl Resource for SerializedResource {
    fn type_name(&self) -> &str {
        self.resource.type_name()
    }

    fn langcode(&self) -> &Langcode {
        self.resource.langcode()
    }

    fn resource_type(&self) -> &ResourceType {
        self.resource.resource_type()
    }

    fn has_field(&self, name: &str) -> bool {
        self.resource.has_field(name)
    }

    fn try_get_string(&self, name: &str) -> Option<String> {
        self.resource.try_get_string(name)
    }
}

/// Inner normalizer returning the already serialized resource object.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughNormalizer;

impl Normalize<SerializedResource> for PassThroughNormalizer {
    fn normalize(
        &self,
        resource: &SerializedResource,
    ) -> Result<CacheableNormalization, LocaleInfoError> {
        Ok(CacheableNormalization::permanent(resource.serialized.clone()))
    }
}

/// Run every resource object of `document` through `normalizer`.
///
/// Walks the primary `data` (single object or array) and `included`.
/// Members that are not resource objects (no string `type`) are left as
/// they are. Resources without a valid `langcode` attribute are taken to
/// be in `active_langcode`.
///
/// The document is only written back once every resource succeeded. On
/// error it is left exactly as it was passed in.
///
/// # Returns
/// The number of resource objects normalized.
pub fn enrich_document<N>(
    normalizer: &N,
    document: &mut Value,
    active_langcode: &Langcode,
) -> Result<usize, LocaleInfoError>
where
    N: Normalize<SerializedResource>,
{
    let Some(object) = document.as_object() else {
        return Err(LocaleInfoError::NotAnObject);
    };

    let mut working = object.clone();
    let mut count = 0;

    match working.get_mut("data") {
        Some(Value::Array(items)) => {
            for item in items.iter_mut() {
                count += normalize_slot(normalizer, item, active_langcode)?;
            }
        }
        Some(item) if item.is_object() => {
            count += normalize_slot(normalizer, item, active_langcode)?;
        }
        Some(Value::Null) | None => debug!("Document has no primary data"),
        Some(_) => warn!("Document 'data' is neither an object nor an array, skipping"),
    }

    if let Some(Value::Array(items)) = working.get_mut("included") {
        for item in items.iter_mut() {
            count += normalize_slot(normalizer, item, active_langcode)?;
        }
    }

    *document = Value::Object(working);
    Ok(count)
}

fn normalize_slot<N>(
    normalizer: &N,
    slot: &mut Value,
    active_langcode: &Langcode,
) -> Result<usize, LocaleInfoError>
where
    N: Normalize<SerializedResource>,
{
    let resource = match SerializedResource::from_value(std::mem::take(slot), active_langcode) {
        Ok(resource) => resource,
        Err(value) => {
            debug!("Skipping member without a resource type");
            *slot = value;
            return Ok(0);
        }
    };

    *slot = normalizer.normalize(&resource)?.normalization;
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::InMemoryAliasStore;
    use crate::enricher::LocaleInfoEnricher;
    use crate::i18n::ConfiguredLanguages;
    use crate::normalizer::LocaleInfoNormalizer;
    use crate::translation::ContentTranslationSettings;
    use serde_json::json;

    fn code(value: &str) -> Langcode {
        Langcode::parse(value).unwrap()
    }

    fn normalizer() -> LocaleInfoNormalizer<
        PassThroughNormalizer,
        ConfiguredLanguages,
        ContentTranslationSettings,
        InMemoryAliasStore,
    > {
        let mut aliases = InMemoryAliasStore::new();
        aliases
            .add("/node/1", "/articles/my-node", code("en"))
            .add("/node/1", "/artikel/meine-node", code("de"));

        LocaleInfoNormalizer::new(
            PassThroughNormalizer,
            LocaleInfoEnricher::new(
                ConfiguredLanguages::from_codes("en,de").unwrap(),
                ContentTranslationSettings::parse("node:article").unwrap(),
                aliases,
            ),
        )
    }

    fn article(langcode: &str) -> Value {
        json!({
            "type": "node--article",
            "id": "83bc47ad-2c58-45e3-9136-abcdef111111",
            "attributes": {
                "drupal_internal__nid": 1,
                "langcode": langcode,
                "path": {"alias": "/articles/my-node", "pid": 1, "langcode": langcode}
            }
        })
    }

    #[test]
    fn test_enrich_collection() {
        let mut document = json!({
            "jsonapi": {"version": "1.0"},
            "data": [article("en")],
            "links": {"self": {"href": "/jsonapi/node/article"}}
        });

        let count = enrich_document(&normalizer(), &mut document, &code("en")).unwrap();

        assert_eq!(count, 1);
        assert_eq!(
            document["data"][0]["meta"],
            json!({"localeInfo": [{"langcode": "de", "path": "/artikel/meine-node"}]})
        );
        assert_eq!(document["jsonapi"], json!({"version": "1.0"}));
        assert_eq!(document["data"][0]["attributes"], article("en")["attributes"]);
    }

    #[test]
    fn test_enrich_single_resource() {
        let mut document = json!({"data": article("de")});

        enrich_document(&normalizer(), &mut document, &code("de")).unwrap();

        assert_eq!(
            document["data"]["meta"]["localeInfo"],
            json!([{"langcode": "en", "path": "/articles/my-node"}])
        );
    }

    #[test]
    fn test_enrich_included() {
        let mut document = json!({
            "data": {"type": "user--user", "id": "u1", "attributes": {"name": "admin"}},
            "included": [article("en"), {"unexpected": true}]
        });

        let count = enrich_document(&normalizer(), &mut document, &code("en")).unwrap();

        assert_eq!(count, 2);
        assert!(document["data"].get("meta").is_none());
        assert_eq!(
            document["included"][0]["meta"]["localeInfo"][0]["langcode"],
            "de"
        );
        assert_eq!(document["included"][1], json!({"unexpected": true}));
    }

    #[test]
    fn test_active_language_used_without_langcode_attribute() {
        let mut resource = article("en");
        resource["attributes"]
            .as_object_mut()
            .unwrap()
            .remove("langcode");
        let mut document = json!({"data": [resource]});

        enrich_document(&normalizer(), &mut document, &code("de")).unwrap();

        assert_eq!(
            document["data"][0]["meta"]["localeInfo"],
            json!([{"langcode": "en", "path": "/articles/my-node"}])
        );
    }

    #[test]
    fn test_null_data_is_noop() {
        let mut document = json!({"data": null, "errors": []});
        let count = enrich_document(&normalizer(), &mut document, &code("en")).unwrap();
        assert_eq!(count, 0);
        assert_eq!(document, json!({"data": null, "errors": []}));
    }

    #[test]
    fn test_document_must_be_object() {
        let mut document = json!([article("en")]);
        let result = enrich_document(&normalizer(), &mut document, &code("en"));
        assert!(matches!(result, Err(LocaleInfoError::NotAnObject)));
    }

    #[test]
    fn test_failure_restores_resource() {
        let mut resource = article("en");
        resource["meta"] = json!("not an object");
        let mut document = json!({"data": [resource.clone()]});

        let result = enrich_document(&normalizer(), &mut document, &code("en"));

        assert!(matches!(result, Err(LocaleInfoError::MetaNotAnObject)));
        assert_eq!(document["data"][0], resource);
    }

    #[test]
    fn test_failure_leaves_earlier_resources_untouched() {
        let mut broken = article("en");
        broken["meta"] = json!("not an object");
        let original = json!({
            "data": [article("en"), broken],
            "included": [article("de")]
        });
        let mut document = original.clone();

        let result = enrich_document(&normalizer(), &mut document, &code("en"));

        assert!(matches!(result, Err(LocaleInfoError::MetaNotAnObject)));
        assert!(document["data"][0].get("meta").is_none());
        assert_eq!(document, original);
    }

    #[test]
    fn test_failure_in_included_leaves_data_untouched() {
        let mut broken = article("de");
        broken["meta"] = json!(["not", "an", "object"]);
        let original = json!({"data": article("en"), "included": [broken]});
        let mut document = original.clone();

        assert!(enrich_document(&normalizer(), &mut document, &code("en")).is_err());
        assert_eq!(document, original);
    }

    #[test]
    fn test_translatable_term_in_included() {
        let mut aliases = InMemoryAliasStore::new();
        aliases
            .add("/node/1", "/artikel/meine-node", code("de"))
            .add("/taxonomy_term/5", "/schlagworte/rust", code("de"));
        let normalizer = LocaleInfoNormalizer::new(
            PassThroughNormalizer,
            LocaleInfoEnricher::new(
                ConfiguredLanguages::from_codes("en,de").unwrap(),
                ContentTranslationSettings::parse("node:article,taxonomy_term:tags").unwrap(),
                aliases,
            ),
        );
        let mut document = json!({
            "data": article("en"),
            "included": [{
                "type": "taxonomy_term--tags",
                "id": "5a1f2e3d-0000-4c4c-9f9f-123456789abc",
                "attributes": {
                    "drupal_internal__tid": 5,
                    "langcode": "en",
                    "name": "Rust",
                    "path": {"alias": "/tags/rust", "pid": 7, "langcode": "en"}
                }
            }]
        });

        let count = enrich_document(&normalizer, &mut document, &code("en")).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            document["data"]["meta"]["localeInfo"],
            json!([{"langcode": "de", "path": "/artikel/meine-node"}])
        );
        assert_eq!(
            document["included"][0]["meta"]["localeInfo"],
            json!([{"langcode": "de", "path": "/schlagworte/rust"}])
        );
    }

    #[test]
    fn test_uuid_only_term_gets_empty_locale_info() {
        let mut document = json!({
            "data": article("en"),
            "included": [{
                "type": "taxonomy_term--tags",
                "id": "5a1f2e3d-0000-4c4c-9f9f-123456789abc",
                "attributes": {"langcode": "en", "path": null}
            }]
        });
        let normalizer = LocaleInfoNormalizer::new(
            PassThroughNormalizer,
            LocaleInfoEnricher::new(
                ConfiguredLanguages::from_codes("en,de").unwrap(),
                ContentTranslationSettings::parse("node:article,taxonomy_term:tags").unwrap(),
                InMemoryAliasStore::new(),
            ),
        );

        let count = enrich_document(&normalizer, &mut document, &code("en")).unwrap();

        assert_eq!(count, 2);
        assert_eq!(document["included"][0]["meta"]["localeInfo"], json!([]));
    }
}
