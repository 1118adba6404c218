//! Draft store: the current session mirrored to local storage.
//!
//! Lets a restart resume the same session without a server round trip.
//! Values are trusted strings; anything missing degrades to defaults and
//! write failures are logged, never returned.

use std::sync::Arc;

use gosta_core::session::{Session, SummaryOptions, is_translation};
use gosta_core::storage::LocalStorage;

pub const KEY_INPUT_TEXT: &str = "gosta_input_text";
pub const KEY_SUMMARY: &str = "gosta_summary";
pub const KEY_DISPLAYED_SUMMARY: &str = "gosta_displayed_summary";
pub const KEY_SELECTED_LANGUAGE: &str = "gosta_selected_language";
pub const KEY_STYLE: &str = "gosta_style";
pub const KEY_TONALITY: &str = "gosta_tonality";
pub const KEY_SUMMARY_TYPE: &str = "gosta_summary_type";

/// Every key owned by the draft. The device identity is not among them.
pub const SESSION_KEYS: [&str; 7] = [
    KEY_INPUT_TEXT,
    KEY_SUMMARY,
    KEY_DISPLAYED_SUMMARY,
    KEY_SELECTED_LANGUAGE,
    KEY_STYLE,
    KEY_TONALITY,
    KEY_SUMMARY_TYPE,
];

pub struct DraftStore {
    storage: Arc<dyn LocalStorage>,
}

impl DraftStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// Rebuilds the session from persisted fields.
    ///
    /// A missing displayed summary falls back to the plain summary (and no
    /// translation is considered active). Without a summary, no displayed
    /// summary or language is restored. `active_history_id` is never
    /// persisted and always comes back as `None`.
    pub fn hydrate(&self) -> Session {
        let read = |key: &str| self.storage.get(key).unwrap_or_default();
        let defaults = SummaryOptions::default();
        let option = |key: &str, default: String| {
            self.storage
                .get(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(default)
        };

        let mut session = Session {
            input_text: read(KEY_INPUT_TEXT),
            options: SummaryOptions {
                style: option(KEY_STYLE, defaults.style),
                tonality: option(KEY_TONALITY, defaults.tonality),
                summary_type: option(KEY_SUMMARY_TYPE, defaults.summary_type),
            },
            ..Session::default()
        };

        let summary = read(KEY_SUMMARY);
        if summary.is_empty() {
            return session;
        }

        let displayed = self.storage.get(KEY_DISPLAYED_SUMMARY);
        let language = read(KEY_SELECTED_LANGUAGE);
        session.original_summary = summary;

        match displayed {
            Some(displayed) if !displayed.is_empty() && is_translation(&language) => {
                session.displayed_summary = displayed;
                session.selected_language = language;
            }
            _ => session.show_original(),
        }

        tracing::debug!(
            "[DraftStore] Hydrated session: input={} chars, summary={} chars, language={:?}",
            session.input_text.len(),
            session.original_summary.len(),
            session.selected_language
        );

        session
    }

    /// Overwrites every persisted key with the session's current values.
    pub fn persist(&self, session: &Session) {
        let entries = [
            (KEY_INPUT_TEXT, session.input_text.clone()),
            (KEY_SUMMARY, session.original_summary.clone()),
            (KEY_DISPLAYED_SUMMARY, session.displayed_summary.clone()),
            (KEY_SELECTED_LANGUAGE, session.selected_language.clone()),
            (KEY_STYLE, session.options.style.clone()),
            (KEY_TONALITY, session.options.tonality.clone()),
            (KEY_SUMMARY_TYPE, session.options.summary_type.clone()),
        ];

        if let Err(e) = self.storage.set_many(&entries) {
            tracing::warn!("[DraftStore] Failed to persist draft: {}", e);
        }
    }

    /// Removes all persisted session keys.
    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_many(&SESSION_KEYS) {
            tracing::warn!("[DraftStore] Failed to clear draft: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gosta_core::error::{GostaError, Result};
    use gosta_infrastructure::{FileLocalStorage, MemoryLocalStorage};
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            input_text: "Patient reports mild headache.\nNo fever.".to_string(),
            original_summary: "Patient has mild headache.".to_string(),
            displayed_summary: "Potilaalla on lievä päänsärky.".to_string(),
            selected_language: "fi".to_string(),
            options: SummaryOptions::new("bullets", "casual", "key_points"),
            active_history_id: Some("ignored".to_string()),
        }
    }

    #[test]
    fn test_hydrate_empty_storage_gives_defaults() {
        let store = DraftStore::new(Arc::new(MemoryLocalStorage::new()));
        assert_eq!(store.hydrate(), Session::default());
    }

    #[test]
    fn test_persist_then_hydrate_on_fresh_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("local_storage.toml");
        let session = sample_session();

        DraftStore::new(Arc::new(FileLocalStorage::new(path.clone()))).persist(&session);
        let restored = DraftStore::new(Arc::new(FileLocalStorage::new(path))).hydrate();

        assert_eq!(restored.input_text, session.input_text);
        assert_eq!(restored.original_summary, session.original_summary);
        assert_eq!(restored.displayed_summary, session.displayed_summary);
        assert_eq!(restored.selected_language, session.selected_language);
        assert_eq!(restored.options, session.options);
        assert_eq!(restored.active_history_id, None);
    }

    #[test]
    fn test_hydrate_missing_displayed_falls_back_to_summary() {
        let storage = Arc::new(MemoryLocalStorage::new());
        storage.set(KEY_SUMMARY, "Plain summary").unwrap();
        storage.set(KEY_SELECTED_LANGUAGE, "sv").unwrap();

        let session = DraftStore::new(storage).hydrate();
        assert_eq!(session.displayed_summary, "Plain summary");
        assert_eq!(session.selected_language, "");
    }

    #[test]
    fn test_hydrate_displayed_without_summary_is_dropped() {
        let storage = Arc::new(MemoryLocalStorage::new());
        storage.set(KEY_DISPLAYED_SUMMARY, "orphan").unwrap();
        storage.set(KEY_SELECTED_LANGUAGE, "fi").unwrap();
        storage.set(KEY_INPUT_TEXT, "text").unwrap();

        let session = DraftStore::new(storage).hydrate();
        assert_eq!(session.input_text, "text");
        assert!(session.displayed_summary.is_empty());
        assert!(session.selected_language.is_empty());
    }

    #[test]
    fn test_hydrate_blank_option_uses_default() {
        let storage = Arc::new(MemoryLocalStorage::new());
        storage.set(KEY_STYLE, "").unwrap();
        storage.set(KEY_TONALITY, "casual").unwrap();

        let session = DraftStore::new(storage).hydrate();
        assert_eq!(session.options.style, "paragraph");
        assert_eq!(session.options.tonality, "casual");
    }

    #[test]
    fn test_clear_keeps_unrelated_keys() {
        let storage = Arc::new(MemoryLocalStorage::new());
        storage.set("gosta_device_id", "device").unwrap();
        let store = DraftStore::new(storage.clone());
        store.persist(&sample_session());

        store.clear();

        assert_eq!(store.hydrate(), Session::default());
        assert_eq!(storage.get("gosta_device_id").as_deref(), Some("device"));
    }

    struct FailingStorage;

    impl LocalStorage for FailingStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(GostaError::io("disk full"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(GostaError::io("disk full"))
        }
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let store = DraftStore::new(Arc::new(FailingStorage));
        store.persist(&sample_session());
        store.clear();
        assert_eq!(store.hydrate(), Session::default());
    }
}
