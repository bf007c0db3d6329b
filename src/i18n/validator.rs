//! Translation table validation.
//!
//! Checks that every language defines the same set of keys. Also flags keys
//! outside the dotted `section.name` convention and figures (years, counts,
//! hours) that changed in translation.

use crate::i18n::TranslationTable;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Keys that would show up on the page verbatim
    pub errors: Vec<String>,

    /// Non-critical issues worth a look
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for the translation table.
pub struct TranslationValidator;

static KEY_REGEX: OnceLock<Regex> = OnceLock::new();
static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();

impl TranslationValidator {
    /// Validate a whole table.
    ///
    /// Errors:
    /// - a key defined for one language but missing for another
    ///
    /// Warnings:
    /// - a key that is not dotted camelCase segments (`contact.form.name`)
    /// - an empty translation
    /// - a translation whose numbers differ from the other languages'
    pub fn validate(table: &TranslationTable) -> ValidationReport {
        let mut report = ValidationReport::new();
        let languages = table.languages();

        let all_keys: BTreeSet<&str> = languages
            .iter()
            .flat_map(|code| table.keys(code))
            .collect();

        for key in &all_keys {
            if !Self::is_valid_key(key) {
                report
                    .warnings
                    .push(format!("Malformed key '{}': expected dotted camelCase segments", key));
            }

            let mut reference: Option<(&str, Vec<String>)> = None;
            for code in &languages {
                let Some(text) = table.lookup(code, key) else {
                    report
                        .errors
                        .push(format!("Missing translation: '{}' has no '{}' entry", key, code));
                    continue;
                };

                if text.trim().is_empty() {
                    report
                        .warnings
                        .push(format!("Empty translation: '{}' in '{}'", key, code));
                }

                let numbers = Self::extract_numbers(text);
                match &reference {
                    Some((ref_code, ref_numbers)) if *ref_numbers != numbers => {
                        report.warnings.push(format!(
                            "Number mismatch in '{}': '{}' has {:?}, '{}' has {:?}",
                            key, ref_code, ref_numbers, code, numbers
                        ));
                    }
                    _ => {}
                }
                if reference.is_none() {
                    reference = Some((*code, numbers));
                }
            }
        }

        report
    }

    fn is_valid_key(key: &str) -> bool {
        let regex = KEY_REGEX.get_or_init(|| {
            Regex::new(r"^[a-z][a-zA-Z]*(\.[a-z][a-zA-Z]*)+$").expect("key pattern is valid")
        });
        regex.is_match(key)
    }

    /// Digit runs in the text, sorted so word order changes don't matter.
    fn extract_numbers(text: &str) -> Vec<String> {
        let regex =
            NUMBER_REGEX.get_or_init(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

        let mut numbers: Vec<String> = regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        numbers.sort();
        numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Entries = &'static [(&'static str, &'static str)];

    fn table(en: Entries, mn: Entries) -> TranslationTable {
        TranslationTable::from_entries(&[("en", en), ("mn", mn)])
    }

    // ==================== Key Format Tests ====================

    #[test]
    fn test_valid_keys() {
        assert!(TranslationValidator::is_valid_key("nav.about"));
        assert!(TranslationValidator::is_valid_key("contact.form.namePlaceholder"));
        assert!(TranslationValidator::is_valid_key("notFound.title"));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(!TranslationValidator::is_valid_key("nav"));
        assert!(!TranslationValidator::is_valid_key("Nav.about"));
        assert!(!TranslationValidator::is_valid_key("nav..about"));
        assert!(!TranslationValidator::is_valid_key("nav.about."));
        assert!(!TranslationValidator::is_valid_key("nav.get_quote"));
        assert!(!TranslationValidator::is_valid_key(""));
    }

    // ==================== Number Extraction Tests ====================

    #[test]
    fn test_extract_numbers() {
        assert_eq!(
            TranslationValidator::extract_numbers("15+ Years of Excellence • Since 2008"),
            vec!["15", "2008"]
        );
    }

    #[test]
    fn test_extract_numbers_ignores_order() {
        assert_eq!(
            TranslationValidator::extract_numbers("2008 онд, 15 гаруй жил"),
            TranslationValidator::extract_numbers("15 years since 2008")
        );
    }

    #[test]
    fn test_extract_numbers_none() {
        assert!(TranslationValidator::extract_numbers("No figures here").is_empty());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_shipped_table_has_no_errors() {
        let report = TranslationValidator::validate(TranslationTable::get());
        assert!(!report.has_errors(), "errors: {:?}", report.errors);
    }

    #[test]
    fn test_shipped_table_is_clean() {
        let report = TranslationValidator::validate(TranslationTable::get());
        assert!(report.is_clean(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_missing_key_is_error() {
        let report = TranslationValidator::validate(&table(
            &[("nav.about", "About"), ("nav.news", "News")],
            &[("nav.about", "Бидний тухай")],
        ));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("nav.news"));
        assert!(report.errors[0].contains("'mn'"));
    }

    #[test]
    fn test_malformed_key_is_warning() {
        let report = TranslationValidator::validate(&table(
            &[("navAbout", "About")],
            &[("navAbout", "Бидний тухай")],
        ));
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("Malformed key"));
    }

    #[test]
    fn test_empty_text_is_warning() {
        let report = TranslationValidator::validate(&table(
            &[("nav.about", "About")],
            &[("nav.about", "  ")],
        ));
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("Empty translation"));
    }

    #[test]
    fn test_number_mismatch_is_warning() {
        let report = TranslationValidator::validate(&table(
            &[("footer.years", "15+ Years")],
            &[("footer.years", "16+ жил")],
        ));
        assert!(!report.has_errors());
        assert!(report.warnings[0].contains("Number mismatch"));
    }

    #[test]
    fn test_matching_tables_are_clean() {
        let report = TranslationValidator::validate(&table(
            &[("hero.badge", "Since 2008"), ("nav.about", "About")],
            &[("hero.badge", "2008 оноос"), ("nav.about", "Бидний тухай")],
        ));
        assert!(report.is_clean());
    }

    #[test]
    fn test_validation_report_with_warning() {
        let mut report = ValidationReport::new();
        report.warnings.push("Test warning".to_string());

        assert!(!report.is_clean());
        assert!(!report.has_errors());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_validation_report_with_error() {
        let mut report = ValidationReport::new();
        report.errors.push("Test error".to_string());

        assert!(!report.is_clean());
        assert!(report.has_errors());
        assert!(!report.has_warnings());
    }
}
