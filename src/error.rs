use crate::alias::AliasLookupError;
use thiserror::Error;

/// Errors raised while computing or attaching locale info.
///
/// Every variant aborts the normalization of the resource it was raised
/// for; no partial `localeInfo` is ever emitted.
#[derive(Debug, Error)]
pub enum LocaleInfoError {
    #[error("alias lookup failed for '{path}' in language '{langcode}'")]
    AliasLookup {
        path: String,
        langcode: String,
        #[source]
        source: AliasLookupError,
    },

    #[error("normalized resource object is not a JSON object")]
    NotAnObject,

    #[error("normalized resource object has a non-object 'meta' member")]
    MetaNotAnObject,

    #[error("inner normalizer failed")]
    Normalizer(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}
