//! History domain models.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{ORIGINAL_LANGUAGE, Session, SummaryOptions, is_translation};

/// A saved summary as returned by the history endpoints.
///
/// Owned by the backend; the client only holds read-only projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Server-assigned, stable identifier.
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub input_text: String,
    pub summary: String,
    /// Present exactly when `language` is not `"original"`.
    #[serde(default)]
    pub translated_summary: Option<String>,
    pub summary_type: String,
    pub style: String,
    pub tonality: String,
    pub language: String,
    /// Server timestamp, kept as sent.
    #[serde(default)]
    pub created_at: String,
}

impl HistoryEntry {
    /// Title for list rendering.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Short local date such as `Mar 4, 14:05`.
    ///
    /// Accepts RFC 3339 and naive ISO timestamps (assumed UTC); anything
    /// else is returned unchanged.
    pub fn display_date(&self) -> String {
        let parsed = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&self.created_at, "%Y-%m-%dT%H:%M:%S%.f")
                    .map(|naive| naive.and_utc())
            });

        match parsed {
            Ok(utc) => utc.with_timezone(&Local).format("%b %-d, %H:%M").to_string(),
            Err(_) => self.created_at.clone(),
        }
    }

    /// Summary to show for this entry: the translation when present.
    pub fn display_summary(&self) -> &str {
        self.translated_summary.as_deref().unwrap_or(&self.summary)
    }

    pub fn options(&self) -> SummaryOptions {
        SummaryOptions::new(&self.style, &self.tonality, &self.summary_type)
    }

    /// Projects the entry into a session verbatim.
    pub fn to_session(&self) -> Session {
        let selected_language = if self.language == ORIGINAL_LANGUAGE {
            String::new()
        } else {
            self.language.clone()
        };

        Session {
            input_text: self.input_text.clone(),
            original_summary: self.summary.clone(),
            displayed_summary: self.display_summary().to_string(),
            selected_language,
            options: self.options(),
            active_history_id: Some(self.id.clone()),
        }
    }
}

/// One page of history for a device.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryPage {
    pub items: Vec<HistoryEntry>,
    /// Server's answer to "is there anything after this page".
    pub has_more: bool,
}

impl HistoryPage {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Body of a history upsert: the full current snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveHistoryPayload {
    pub input_text: String,
    pub summary: String,
    pub translated_summary: Option<String>,
    pub summary_type: String,
    pub style: String,
    pub tonality: String,
    pub language: String,
}

impl SaveHistoryPayload {
    /// Builds the payload from the session's current output state.
    pub fn from_session(session: &Session) -> Self {
        let translated_summary = if is_translation(&session.selected_language) {
            Some(session.displayed_summary.clone())
        } else {
            None
        };

        Self {
            input_text: session.input_text.clone(),
            summary: session.original_summary.clone(),
            translated_summary,
            summary_type: session.options.summary_type.clone(),
            style: session.options.style.clone(),
            tonality: session.options.tonality.clone(),
            language: session.history_language(),
        }
    }
}
