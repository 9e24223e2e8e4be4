//! Canonical entity path derivation.
//!
//! A canonical path has the form `/<entity_type_id>/<id>`, e.g. `/node/1`.
//! It is the key under which aliases are stored.

use crate::resource::{entity_type_id_of, Resource};
use anyhow::bail;
use tracing::warn;

/// Field holding the numeric id of a node.
pub const DEFAULT_INTERNAL_ID_FIELD: &str = "drupal_internal__nid";

/// Generic id field used when no internal id field is present.
pub const ID_FIELD: &str = "id";

/// Internal id fields of the core entity types.
const ENTITY_ID_FIELDS: &[(&str, &str)] = &[
    ("node", "drupal_internal__nid"),
    ("taxonomy_term", "drupal_internal__tid"),
    ("user", "drupal_internal__uid"),
    ("media", "drupal_internal__mid"),
    ("comment", "drupal_internal__cid"),
    ("file", "drupal_internal__fid"),
    ("block_content", "drupal_internal__id"),
    ("menu_link_content", "drupal_internal__id"),
];

/// How entity ids are turned into path segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdPolicy {
    /// Ids must be unsigned integers. They are normalized through the
    /// integer, so "007" yields `/node/7`.
    #[default]
    Strict,

    /// Ids are used verbatim.
    PassThrough,
}

impl std::str::FromStr for IdPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(IdPolicy::Strict),
            "passthrough" | "pass-through" | "pass_through" => Ok(IdPolicy::PassThrough),
            other => bail!("Unknown id policy '{}', expected 'strict' or 'passthrough'", other),
        }
    }
}

/// Derives canonical paths from resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    internal_id_field: String,
    id_policy: IdPolicy,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new(DEFAULT_INTERNAL_ID_FIELD, IdPolicy::default())
    }
}

impl PathResolver {
    pub fn new(internal_id_field: impl Into<String>, id_policy: IdPolicy) -> Self {
        Self {
            internal_id_field: internal_id_field.into(),
            id_policy,
        }
    }

    pub fn internal_id_field(&self) -> &str {
        &self.internal_id_field
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// Id field holding the numeric id for an entity type, when known.
    fn entity_id_field(entity_type_id: &str) -> Option<&'static str> {
        ENTITY_ID_FIELDS
            .iter()
            .find(|(entity_type, _)| *entity_type == entity_type_id)
            .map(|(_, field)| *field)
    }

    /// Canonical path of a resource.
    ///
    /// Looks for the configured internal id field, then the internal id
    /// field of the resource's entity type, then `id`.
    ///
    /// # Returns
    /// * `Some(path)` when an id field yields a usable segment
    /// * `None` when there is no id field, the id is not scalar, or the id
    ///   is not numeric under `IdPolicy::Strict`
    pub fn resolve<R: Resource + ?Sized>(&self, resource: &R) -> Option<String> {
        let entity_type_id = entity_type_id_of(resource.type_name());

        let field = [
            Some(self.internal_id_field.as_str()),
            Self::entity_id_field(entity_type_id),
            Some(ID_FIELD),
        ]
        .into_iter()
        .flatten()
        .find(|field| resource.has_field(field))?;

        // Present but not scalar: nothing to build a path from
        let id = resource.try_get_string(field)?;

        let segment = match self.id_policy {
            IdPolicy::Strict => match id.trim().parse::<u64>() {
                Ok(numeric) => numeric.to_string(),
                Err(_) => {
                    warn!(
                        "{}: '{}' holds non-numeric id '{}', no canonical path",
                        resource.type_name(),
                        field,
                        id
                    );
                    return None;
                }
            },
            IdPolicy::PassThrough => id,
        };

        Some(format!("/{}/{}", entity_type_id, segment))
    }
}
