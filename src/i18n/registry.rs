//! Language registry: Single source of truth for the site's display languages.
//!
//! The registry is initialized once behind a `OnceLock` and is immutable
//! afterwards, so lookups are lock-free from any request handler.

use std::sync::OnceLock;

/// Configuration for a supported display language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "mn")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "Mongolian")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Монгол")
    pub native_name: &'static str,

    /// Short label shown on the language toggle (e.g., "EN", "MN")
    pub toggle_label: &'static str,

    /// Whether visitors start in this language (exactly one should be true)
    pub is_default: bool,

    /// Whether this language can be selected
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in toggle order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the language every visit starts in.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default language.
    /// This is a static configuration error, caught by the tests below.
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }
}

/// English is the default; Mongolian is the second site language.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            toggle_label: "EN",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            code: "mn",
            name: "Mongolian",
            native_name: "Монгол",
            toggle_label: "MN",
            is_default: false,
            enabled: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_english() {
        let config = LanguageRegistry::get()
            .get_by_code("en")
            .expect("English should be registered");

        assert_eq!(config.name, "English");
        assert_eq!(config.toggle_label, "EN");
        assert!(config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_mongolian() {
        let config = LanguageRegistry::get()
            .get_by_code("mn")
            .expect("Mongolian should be registered");

        assert_eq!(config.name, "Mongolian");
        assert_eq!(config.native_name, "Монгол");
        assert_eq!(config.toggle_label, "MN");
        assert!(!config.is_default);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_list_enabled_keeps_toggle_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();

        assert_eq!(codes, vec!["en", "mn"]);
    }

    #[test]
    fn test_default_language_is_english() {
        let default = LanguageRegistry::get().default_language();
        assert_eq!(default.code, "en");
    }
}
