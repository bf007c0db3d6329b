//! Language type: validated handle to one of the registered site languages.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated display language.
///
/// Only codes that are registered and enabled can be turned into a
/// `Language`, so every handle is guaranteed to have a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "mn")
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };

    pub const MONGOLIAN: Language = Language { code: "mn" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is registered and enabled
    /// * `Err` if the code is unknown or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language { code: config.code }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The language every visit starts in.
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// All selectable languages, in toggle order.
    pub fn enabled() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Never for a handle built through `from_code` or the constants, because
    /// both only yield registered codes.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name of the language (e.g., "Mongolian").
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name of the language (e.g., "Монгол").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Label shown on the language toggle (e.g., "MN").
    pub fn toggle_label(&self) -> &'static str {
        self.config().toggle_label
    }

    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::default_language()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.code(), "en");
        assert_eq!(english.name(), "English");
        assert!(english.is_default());
    }

    #[test]
    fn test_mongolian_constant() {
        let mongolian = Language::MONGOLIAN;
        assert_eq!(mongolian.code(), "mn");
        assert_eq!(mongolian.name(), "Mongolian");
        assert_eq!(mongolian.native_name(), "Монгол");
        assert!(!mongolian.is_default());
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_known_languages() {
        assert_eq!(Language::from_code("en").unwrap(), Language::ENGLISH);
        assert_eq!(Language::from_code("mn").unwrap(), Language::MONGOLIAN);
    }

    #[test]
    fn test_from_code_unknown() {
        let result = Language::from_code("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_code_is_case_sensitive() {
        assert!(Language::from_code("MN").is_err());
    }

    #[test]
    fn test_from_code_empty() {
        assert!(Language::from_code("").is_err());
    }

    // ==================== Default Tests ====================

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::ENGLISH);
        assert_eq!(Language::default_language(), Language::ENGLISH);
    }

    #[test]
    fn test_enabled_lists_both_languages_in_order() {
        assert_eq!(
            Language::enabled(),
            vec![Language::ENGLISH, Language::MONGOLIAN]
        );
    }

    #[test]
    fn test_toggle_labels() {
        assert_eq!(Language::ENGLISH.toggle_label(), "EN");
        assert_eq!(Language::MONGOLIAN.toggle_label(), "MN");
    }
}
