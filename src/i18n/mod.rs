//! Internationalization (i18n) for the bilingual site.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `language`: Validated `Language` handle built from the registry
//! - `strings`: Static translation table with key fallback
//! - `validator`: Consistency checks over the translation table
//! - `locale`: Active-language holder with change notification
//!
//! # Example
//!
//! ```rust,ignore
//! use armos_site::i18n::{Language, LocaleHolder};
//!
//! let holder = LocaleHolder::default();
//! holder.set(Language::from_code("mn")?);
//! assert_eq!(holder.snapshot().t("nav.news"), "Мэдээ");
//! ```

mod language;
mod locale;
mod registry;
mod strings;
mod validator;

pub use language::Language;
pub use locale::{Locale, LocaleHolder, LocaleReader};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::TranslationTable;
pub use validator::{TranslationValidator, ValidationReport};
