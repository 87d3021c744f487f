//! Per-language text tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The language codes a stock host database ships with.
pub const DEFAULT_LANGUAGES: &[&str] = &[
    "ch", "cz", "en", "es", "fr", "ge", "hu", "it", "jp", "kr", "pl", "po", "ru", "sk", "tu",
];

/// Free-text tables keyed by language code, then by entry key.
///
/// Entry keys are host-defined, e.g. `"{traderId} Nickname"`. Writes go to
/// one language at a time; plugins that have no translations simply write
/// the same text under every seeded language.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LocaleTables {
    global: HashMap<String, HashMap<String, String>>,
}

impl LocaleTables {
    /// Seeds empty tables for the given language codes.
    pub fn with_languages<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let global = languages
            .into_iter()
            .map(|lang| (lang.into(), HashMap::new()))
            .collect();
        Self { global }
    }

    /// Seeds the stock host language set.
    pub fn with_default_languages() -> Self {
        Self::with_languages(DEFAULT_LANGUAGES.iter().copied())
    }

    /// Writes one entry into one language table, creating the language table
    /// if it was never seeded. Overwrites an existing entry.
    pub fn set(&mut self, language: &str, key: impl Into<String>, text: impl Into<String>) {
        self.global
            .entry(language.to_owned())
            .or_default()
            .insert(key.into(), text.into());
    }

    pub fn get(&self, language: &str, key: &str) -> Option<&str> {
        self.global.get(language)?.get(key).map(String::as_str)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> + '_ {
        self.global.keys().map(String::as_str)
    }
}
