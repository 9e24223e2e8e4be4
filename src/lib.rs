//! Alternate-language paths for JSON:API resource objects.
//!
//! Resource objects of translatable bundles that expose a `path` field get
//! a `meta.localeInfo` member listing, for every other configured
//! language, the path alias under which the same entity is reachable:
//!
//! ```json
//! {"meta": {"localeInfo": [{"langcode": "de", "path": "/artikel/meine-node"}]}}
//! ```

pub mod alias;
pub mod config;
pub mod document;
pub mod enricher;
pub mod error;
pub mod i18n;
pub mod metrics;
pub mod normalizer;
pub mod path;
pub mod resource;
pub mod translation;

pub use enricher::{is_eligible, LocaleInfoEnricher, LocaleInfoEntry};
pub use error::LocaleInfoError;
pub use normalizer::{attach_locale_info, LocaleInfoNormalizer, Normalize};
