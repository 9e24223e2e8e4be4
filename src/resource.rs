//! Resource objects as seen by the enricher.
//!
//! The enricher never mutates a resource; it only asks for the type name,
//! the language and scalar field values.

use crate::i18n::Langcode;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Delimiter between entity type id and bundle in a resource type name.
pub const TYPE_NAME_DELIMITER: &str = "--";

/// Per resource type description supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    /// Public type name (e.g., "node--article")
    pub type_name: String,

    /// Entity type id (e.g., "node")
    pub entity_type_id: String,

    /// Bundle (e.g., "article")
    pub bundle: String,

    /// Names of the fields this resource type exposes
    pub fields: BTreeSet<String>,
}

impl ResourceType {
    /// Build a resource type from a `"<entity_type>--<bundle>"` type name.
    ///
    /// A name without the delimiter is taken as entity type id and bundle
    /// at once (e.g. "user").
    pub fn from_type_name<I, S>(type_name: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entity_type_id = entity_type_id_of(type_name).to_string();
        let bundle = match type_name.split_once(TYPE_NAME_DELIMITER) {
            Some((_, bundle)) => bundle.to_string(),
            None => type_name.to_string(),
        };

        Self {
            type_name: type_name.to_string(),
            entity_type_id,
            bundle,
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains(name)
    }
}

/// Segment of a type name preceding the first `--`.
pub fn entity_type_id_of(type_name: &str) -> &str {
    type_name
        .split(TYPE_NAME_DELIMITER)
        .next()
        .unwrap_or(type_name)
}

/// Typed, read-only access to a resource being normalized.
pub trait Resource {
    /// Public type name (e.g., "node--article")
    fn type_name(&self) -> &str;

    /// Language the resource is being served in
    fn langcode(&self) -> &Langcode;

    fn resource_type(&self) -> &ResourceType;

    fn has_field(&self, name: &str) -> bool;

    /// String value of a scalar field; `None` when the field is missing or
    /// not scalar.
    fn try_get_string(&self, name: &str) -> Option<String>;
}

/// A resource object: one translation of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceObject {
    resource_type: ResourceType,
    langcode: Langcode,
    fields: BTreeMap<String, Value>,
}

impl ResourceObject {
    pub fn new(resource_type: ResourceType, langcode: Langcode) -> Self {
        Self {
            resource_type,
            langcode,
            fields: BTreeMap::new(),
        }
    }

    /// Set a field value (builder style).
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Build a resource from a serialized JSON:API resource object.
    ///
    /// `attributes` and `id` become fields; relationship names are only
    /// recorded on the resource type. The language is taken from the
    /// `langcode` attribute when it is valid, else `active_langcode` is
    /// used. Returns `None` when the value has no string `type`.
    pub fn from_json_api(value: &Value, active_langcode: &Langcode) -> Option<Self> {
        let object = value.as_object()?;
        let type_name = object.get("type")?.as_str()?;

        let empty = Map::new();
        let attributes = object
            .get("attributes")
            .and_then(Value::as_object)
            .unwrap_or(&empty);
        let relationships = object
            .get("relationships")
            .and_then(Value::as_object)
            .unwrap_or(&empty);

        let mut fields: BTreeMap<String, Value> = attributes
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if let Some(id) = object.get("id") {
            fields.insert("id".to_string(), id.clone());
        }

        let field_names = fields
            .keys()
            .chain(relationships.keys())
            .cloned()
            .collect::<Vec<_>>();
        let resource_type = ResourceType::from_type_name(type_name, field_names);

        let langcode = attributes
            .get("langcode")
            .and_then(Value::as_str)
            .and_then(|code| Langcode::parse(code).ok())
            .unwrap_or_else(|| active_langcode.clone());

        Some(Self {
            resource_type,
            langcode,
            fields,
        })
    }
}

impl Resource for ResourceObject {
    fn type_name(&self) -> &str {
        &self.resource_type.type_name
    }

    fn langcode(&self) -> &Langcode {
        &self.langcode
    }

    fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn try_get_string(&self, name: &str) -> Option<String> {
        match self.fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
