use crate::alias::InMemoryAliasStore;
use crate::enricher::LocaleInfoEnricher;
use crate::i18n::{ConfiguredLanguages, Langcode, LanguageRegistry};
use crate::path::{IdPolicy, PathResolver, DEFAULT_INTERNAL_ID_FIELD};
use crate::translation::ContentTranslationSettings;
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Languages
    pub languages: ConfiguredLanguages,
    pub active_language: Langcode,

    // Content translation
    pub translation: ContentTranslationSettings,

    // Aliases
    pub aliases_file: Option<PathBuf>,

    // Path derivation
    pub internal_id_field: String,
    pub id_policy: IdPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Languages - first entry is the default language
        let languages = ConfiguredLanguages::from_codes(
            &std::env::var("LOCALE_INFO_LANGUAGES").unwrap_or_else(|_| "en".to_string()),
        )
        .context("Invalid LOCALE_INFO_LANGUAGES")?;

        let active_language = match std::env::var("LOCALE_INFO_ACTIVE_LANGUAGE") {
            Ok(code) => Langcode::parse(&code).context("Invalid LOCALE_INFO_ACTIVE_LANGUAGE")?,
            Err(_) => languages
                .default_language()
                .map(|lang| lang.code.clone())
                .context("No default language configured")?,
        };

        Ok(Self {
            languages,
            active_language,

            // Content translation - "entity_type:bundle" pairs
            translation: ContentTranslationSettings::parse(
                &std::env::var("LOCALE_INFO_TRANSLATABLE").unwrap_or_default(),
            )
            .context("Invalid LOCALE_INFO_TRANSLATABLE")?,

            // Aliases
            aliases_file: std::env::var("LOCALE_INFO_ALIASES_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),

            // Path derivation
            internal_id_field: std::env::var("LOCALE_INFO_INTERNAL_ID_FIELD")
                .unwrap_or_else(|_| DEFAULT_INTERNAL_ID_FIELD.to_string()),
            id_policy: match std::env::var("LOCALE_INFO_ID_POLICY") {
                Ok(policy) => policy.parse::<IdPolicy>().context("Invalid LOCALE_INFO_ID_POLICY")?,
                Err(_) => IdPolicy::default(),
            },
        })
    }

    pub fn language_registry(&self) -> ConfiguredLanguages {
        self.languages.clone()
    }

    pub fn translation_settings(&self) -> ContentTranslationSettings {
        self.translation.clone()
    }

    /// Alias store loaded from `aliases_file`, or an empty one.
    pub fn alias_store(&self) -> Result<InMemoryAliasStore> {
        match &self.aliases_file {
            Some(path) => InMemoryAliasStore::from_json_file(path),
            None => Ok(InMemoryAliasStore::new()),
        }
    }

    pub fn path_resolver(&self) -> PathResolver {
        PathResolver::new(self.internal_id_field.clone(), self.id_policy)
    }

    /// Enricher wired from all of the above.
    pub fn enricher(
        &self,
    ) -> Result<LocaleInfoEnricher<ConfiguredLanguages, ContentTranslationSettings, InMemoryAliasStore>>
    {
        Ok(LocaleInfoEnricher::new(
            self.language_registry(),
            self.translation_settings(),
            self.alias_store()?,
        )
        .with_path_resolver(self.path_resolver()))
    }
}
