//! Session domain model.

use serde::{Deserialize, Serialize};

/// Language sentinel meaning "no translation active".
pub const ORIGINAL_LANGUAGE: &str = "original";

/// Summary types offered by the summarizer.
pub const SUMMARY_TYPES: [&str; 4] = ["brief", "detailed", "key_points", "action_points"];

/// Output formatting styles.
pub const STYLES: [&str; 3] = ["paragraph", "bullets", "numbered"];

/// Tonalities the summary can be written in.
pub const TONALITIES: [&str; 3] = ["professional", "casual", "simplified"];

/// Translation targets shown to the user as `(code, name)`.
pub const SUPPORTED_LANGUAGES: [(&str, &str); 5] = [
    ("en", "English"),
    ("fi", "Finnish"),
    ("sv", "Swedish"),
    ("ar", "Arabic"),
    ("ur", "Urdu"),
];

/// Returns `true` when `language` selects a real translation target.
///
/// Both the empty string and [`ORIGINAL_LANGUAGE`] mean "show the summary
/// as produced by the backend".
pub fn is_translation(language: &str) -> bool {
    let language = language.trim();
    !language.is_empty() && language != ORIGINAL_LANGUAGE
}

/// Summary formatting options sent with every summarize call.
///
/// Values are free-form strings; the backend decides which are valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOptions {
    pub style: String,
    pub tonality: String,
    pub summary_type: String,
}

impl SummaryOptions {
    pub fn new(
        style: impl Into<String>,
        tonality: impl Into<String>,
        summary_type: impl Into<String>,
    ) -> Self {
        Self {
            style: style.into(),
            tonality: tonality.into(),
            summary_type: summary_type.into(),
        }
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            style: STYLES[0].to_string(),
            tonality: TONALITIES[0].to_string(),
            summary_type: SUMMARY_TYPES[0].to_string(),
        }
    }
}

/// What the session is currently waiting on.
///
/// Only one operation is expected at a time by UI convention, but the
/// controller tolerates overlap; the status reflects the latest issued one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Generating,
    Regenerating,
    Translating,
}

impl SessionStatus {
    pub fn is_busy(self) -> bool {
        self != SessionStatus::Idle
    }
}

/// The single active summarization session.
///
/// `displayed_summary` is either `original_summary` or the latest successful
/// translation of it; `selected_language` is non-empty exactly when a
/// translation is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub input_text: String,
    /// Last summary produced by the backend, before translation.
    pub original_summary: String,
    /// What the UI shows.
    pub displayed_summary: String,
    /// Empty when no translation is active.
    pub selected_language: String,
    pub options: SummaryOptions,
    /// Saved history entry this session was loaded from, if any.
    pub active_history_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether there is summarized work that would be lost on reset.
    pub fn has_summary(&self) -> bool {
        !self.original_summary.is_empty()
    }

    pub fn has_translation(&self) -> bool {
        is_translation(&self.selected_language)
    }

    /// Drops any active translation, showing the untranslated summary.
    pub fn show_original(&mut self) {
        self.displayed_summary = self.original_summary.clone();
        self.selected_language.clear();
    }

    /// Replaces the summary with a fresh backend result.
    pub fn set_summary(&mut self, summary: String) {
        self.original_summary = summary;
        self.show_original();
    }

    /// Language tag as stored on history entries.
    pub fn history_language(&self) -> String {
        if self.has_translation() {
            self.selected_language.clone()
        } else {
            ORIGINAL_LANGUAGE.to_string()
        }
    }
}
