//! Interface translations keyed by the selected language.
//!
//! The store owns a `Translator` and switches its active language whenever
//! `set_language` commits; views resolve their strings through it.

mod tables;

use std::sync::LazyLock;

use {
    parking_lot::RwLock,
    regex::{Captures, Regex},
    tracing::debug,
};

use crate::state::preferences::Language;

/// `{{ name }}` placeholders, whitespace inside the braces allowed.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("placeholder pattern should compile")
});

/// Translation lookup with English fallback.
#[derive(Debug)]
pub struct Translator {
    /// Active language.
    language: RwLock<Language>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Translator {
    /// Creates a translator starting in `language`.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language: RwLock::new(language),
        }
    }

    /// Gets the active language.
    #[must_use]
    pub fn language(&self) -> Language {
        *self.language.read()
    }

    /// Switches the active language.
    pub fn set_language(&self, language: Language) {
        debug!("Translator: Switching language to {}", language);
        *self.language.write() = language;
    }

    /// Whether `key` has a translation in the active language itself.
    #[must_use]
    pub fn has_translation(&self, key: &str) -> bool {
        tables::lookup(self.language(), key).is_some()
    }

    /// Resolves `key` in the active language.
    ///
    /// Falls back to English, then to the key itself.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        let language = self.language();
        tables::lookup(language, key)
            .or_else(|| tables::lookup(Language::En, key))
            .map_or_else(|| key.to_string(), str::to_string)
    }

    /// Resolves `key` and substitutes `{{name}}` placeholders.
    ///
    /// Placeholders without a matching argument are left untouched.
    #[must_use]
    pub fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self.translate(key);
        interpolate(&template, args)
    }
}

/// Substitutes `{{name}}` placeholders in `template`.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let name = &caps[1];
            args.iter()
                .find_map(|(arg, value)| (*arg == name).then(|| (*value).to_string()))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
