//! Enrich a JSON:API document with `meta.localeInfo`.
//!
//! Usage:
//!   jsonapi-locale-info document.json    # Read the document from a file
//!   jsonapi-locale-info < document.json  # Read the document from stdin
//!
//! The enriched document is printed to stdout.
//!
//! Optional environment variables:
//! - LOCALE_INFO_LANGUAGES (defaults to "en", first entry is the default language)
//! - LOCALE_INFO_ACTIVE_LANGUAGE (defaults to the default language)
//! - LOCALE_INFO_TRANSLATABLE (e.g. "node:article,taxonomy_term:tags")
//! - LOCALE_INFO_ALIASES_FILE (JSON array of {path, alias, langcode})
//! - LOCALE_INFO_INTERNAL_ID_FIELD (defaults to drupal_internal__nid)
//! - LOCALE_INFO_ID_POLICY (strict | passthrough, defaults to strict)

use anyhow::{Context, Result};
use jsonapi_locale_info::config::Config;
use jsonapi_locale_info::document::{enrich_document, PassThroughNormalizer};
use jsonapi_locale_info::LocaleInfoNormalizer;
use serde_json::Value;
use std::io::Read;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging (stdout carries the document)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jsonapi_locale_info=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let input = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read document from stdin")?;
            buffer
        }
    };
    let mut document: Value = serde_json::from_str(&input).context("Invalid JSON document")?;

    let enricher = config.enricher()?;
    info!(
        "Loaded {} aliases, {} translatable bundles",
        enricher.aliases().len(),
        config.translation.len()
    );

    let normalizer = LocaleInfoNormalizer::new(PassThroughNormalizer, enricher);

    let count = enrich_document(&normalizer, &mut document, &config.active_language)
        .context("Failed to enrich document")?;

    let report = normalizer.enricher().metrics().report();
    info!(
        "Processed {} resource objects ({} decorated, {} skipped, {} alias lookups)",
        count, report.resources_decorated, report.resources_skipped, report.alias_lookups
    );

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
