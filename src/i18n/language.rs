//! Langcode type: validated language identifier.
//!
//! Language codes travel through the whole enrichment pipeline (resource
//! language, registry entries, alias lookups, the emitted `localeInfo`
//! entries), so they are validated once at the edge and passed around as a
//! `Langcode` afterwards.

use anyhow::{bail, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Primary subtag of 2-3 lowercase letters, optionally followed by
/// region/script/variant subtags (e.g. "en", "pt-br", "zh-Hans").
static LANGCODE_REGEX: OnceLock<Regex> = OnceLock::new();

/// A validated language code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Langcode(String);

impl Langcode {
    /// Language not specified.
    pub const NOT_SPECIFIED: &'static str = "und";

    /// Language not applicable.
    pub const NOT_APPLICABLE: &'static str = "zxx";

    /// Create a Langcode from a language code string.
    ///
    /// # Returns
    /// * `Ok(Langcode)` if the code is well formed
    /// * `Err` if the code is empty or malformed
    pub fn parse(code: &str) -> Result<Langcode> {
        let regex = LANGCODE_REGEX.get_or_init(|| {
            Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{1,8})*$").expect("langcode pattern is valid")
        });

        let code = code.trim();
        if code.is_empty() {
            bail!("Language code is empty");
        }
        if !regex.is_match(code) {
            bail!("Invalid language code: '{}'", code);
        }

        Ok(Langcode(code.to_string()))
    }

    /// Get the language code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is one of the locked codes (`und`, `zxx`) that never
    /// represent a configurable language.
    pub fn is_locked(&self) -> bool {
        self.0 == Self::NOT_SPECIFIED || self.0 == Self::NOT_APPLICABLE
    }
}

impl fmt::Display for Langcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Langcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Langcode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Langcode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for Langcode {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Langcode::parse(&value)
    }
}

impl From<Langcode> for String {
    fn from(value: Langcode) -> Self {
        value.0
    }
}

impl std::str::FromStr for Langcode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Langcode::parse(s)
    }
}
