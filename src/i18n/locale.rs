//! Active display language: one writer, many readers.
//!
//! `LocaleHolder` owns the current language and is the only place it can be
//! changed. Readers subscribe through `LocaleReader` and either take an
//! immutable `Locale` snapshot for rendering or await the next change.

use crate::i18n::{Language, TranslationTable};
use tokio::sync::watch;

/// Owner of the active language.
#[derive(Debug)]
pub struct LocaleHolder {
    tx: watch::Sender<Language>,
}

impl LocaleHolder {
    pub fn new(initial: Language) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Switch the active language.
    ///
    /// Returns `true` when the value actually changed; readers are only
    /// notified in that case.
    pub fn set(&self, language: Language) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == language {
                false
            } else {
                *current = language;
                true
            }
        })
    }

    pub fn current(&self) -> Language {
        *self.tx.borrow()
    }

    pub fn snapshot(&self) -> Locale {
        Locale::new(self.current())
    }

    pub fn subscribe(&self) -> LocaleReader {
        LocaleReader {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for LocaleHolder {
    fn default() -> Self {
        Self::new(Language::default_language())
    }
}

/// Read side of the active language.
#[derive(Debug, Clone)]
pub struct LocaleReader {
    rx: watch::Receiver<Language>,
}

impl LocaleReader {
    pub fn current(&self) -> Language {
        *self.rx.borrow()
    }

    /// Take a snapshot and mark the current value as seen.
    pub fn snapshot(&mut self) -> Locale {
        Locale::new(*self.rx.borrow_and_update())
    }

    /// Whether the language changed since the last `snapshot` or `changed`.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next language switch and return the new snapshot.
    ///
    /// Returns `None` once the holder is gone.
    pub async fn changed(&mut self) -> Option<Locale> {
        self.rx.changed().await.ok()?;
        Some(self.snapshot())
    }
}

/// Immutable view of the active language used while rendering one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Locale {
    language: Language,
}

impl Locale {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn code(&self) -> &'static str {
        self.language.code()
    }

    /// Localized text for `key`, or the key itself when it has no entry.
    pub fn t<'k>(&self, key: &'k str) -> &'k str {
        TranslationTable::get().resolve(self.language, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Holder Tests ====================

    #[test]
    fn test_holder_starts_in_default_language() {
        let holder = LocaleHolder::default();
        assert_eq!(holder.current(), Language::ENGLISH);
    }

    #[test]
    fn test_set_reports_change() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        assert!(holder.set(Language::MONGOLIAN));
        assert_eq!(holder.current(), Language::MONGOLIAN);
    }

    #[test]
    fn test_set_same_language_is_not_a_change() {
        let holder = LocaleHolder::new(Language::MONGOLIAN);
        assert!(!holder.set(Language::MONGOLIAN));
    }

    #[test]
    fn test_set_without_readers_still_updates() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        holder.set(Language::MONGOLIAN);
        assert_eq!(holder.snapshot().code(), "mn");
    }

    // ==================== Reader Tests ====================

    #[test]
    fn test_readers_see_latest_value() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        let first = holder.subscribe();
        let second = holder.subscribe();

        holder.set(Language::MONGOLIAN);

        assert_eq!(first.current(), Language::MONGOLIAN);
        assert_eq!(second.current(), Language::MONGOLIAN);
    }

    #[test]
    fn test_has_changed_clears_after_snapshot() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        let mut reader = holder.subscribe();
        assert!(!reader.has_changed());

        holder.set(Language::MONGOLIAN);
        assert!(reader.has_changed());

        let locale = reader.snapshot();
        assert_eq!(locale.language(), Language::MONGOLIAN);
        assert!(!reader.has_changed());
    }

    #[test]
    fn test_unchanged_set_does_not_notify() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        let reader = holder.subscribe();
        holder.set(Language::ENGLISH);
        assert!(!reader.has_changed());
    }

    #[tokio::test]
    async fn test_changed_wakes_on_switch() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        let mut reader = holder.subscribe();

        let waiter = tokio::spawn(async move { reader.changed().await });
        holder.set(Language::MONGOLIAN);

        let locale = waiter.await.unwrap().unwrap();
        assert_eq!(locale.t("nav.news"), "Мэдээ");
    }

    #[tokio::test]
    async fn test_changed_returns_none_when_holder_dropped() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        let mut reader = holder.subscribe();
        drop(holder);
        assert!(reader.changed().await.is_none());
    }

    // ==================== Snapshot Tests ====================

    #[test]
    fn test_switching_changes_every_known_key() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        let before = holder.snapshot();
        holder.set(Language::MONGOLIAN);
        let after = holder.snapshot();

        let table = TranslationTable::get();
        for key in table.keys("en") {
            assert_eq!(before.t(key), table.resolve(Language::ENGLISH, key));
            assert_eq!(after.t(key), table.resolve(Language::MONGOLIAN, key));
        }
        assert_ne!(before.t("nav.about"), after.t("nav.about"));
    }

    #[test]
    fn test_snapshot_is_unaffected_by_later_switch() {
        let holder = LocaleHolder::new(Language::ENGLISH);
        let snapshot = holder.snapshot();
        holder.set(Language::MONGOLIAN);
        assert_eq!(snapshot.t("nav.about"), "About");
    }

    #[test]
    fn test_unknown_key_falls_back() {
        assert_eq!(Locale::default().t("hero.unknown"), "hero.unknown");
    }
}
