//! Language handling for locale enrichment.
//!
//! - `language`: validated `Langcode` type
//! - `registry`: configured languages and the `LanguageRegistry` seam
//!
//! # Example
//!
//! ```rust,ignore
//! use jsonapi_locale_info::i18n::{ConfiguredLanguages, LanguageRegistry};
//!
//! let registry = ConfiguredLanguages::from_codes("en,de")?;
//! let default = registry.default_language();
//! ```

mod language;
mod registry;

pub use language::Langcode;
pub use registry::{ConfiguredLanguages, LanguageConfig, LanguageRegistry};
