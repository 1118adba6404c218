//! Plain-text rendering of controller snapshots.

use std::fmt::Write;

use gosta_application::{PagerSnapshot, SessionSnapshot};
use gosta_core::history::HistoryEntry;
use gosta_core::session::SessionStatus;

const PREVIEW_CHARS: usize = 60;

pub fn print_session(snapshot: &SessionSnapshot) {
    print!("{}", format_session(snapshot));
}

pub fn print_history(history: &PagerSnapshot) {
    print!("{}", format_history(history));
}

pub fn format_session(snapshot: &SessionSnapshot) -> String {
    let session = &snapshot.session;
    let mut out = String::new();

    if session.input_text.is_empty() {
        let _ = writeln!(out, "Input:    (empty)");
    } else {
        let _ = writeln!(
            out,
            "Input:    {} ({} chars)",
            preview(&session.input_text, PREVIEW_CHARS),
            session.input_text.chars().count()
        );
    }
    let _ = writeln!(
        out,
        "Options:  type={}, style={}, tonality={}",
        session.options.summary_type, session.options.style, session.options.tonality
    );
    let _ = writeln!(
        out,
        "Language: {}",
        if session.has_translation() {
            session.selected_language.as_str()
        } else {
            "original"
        }
    );
    if let Some(id) = &session.active_history_id {
        let _ = writeln!(out, "Saved as: {id}");
    }
    if snapshot.status != SessionStatus::Idle {
        let _ = writeln!(out, "Status:   {:?}", snapshot.status);
    }
    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "⚠️  {error}");
    }

    if session.displayed_summary.is_empty() {
        let _ = writeln!(out, "\nNo summary yet.");
    } else {
        let _ = writeln!(out, "\n{}", session.displayed_summary);
    }

    out
}

pub fn format_history(history: &PagerSnapshot) -> String {
    let mut out = String::new();

    if history.items.is_empty() {
        let _ = writeln!(out, "No saved summaries.");
        return out;
    }

    for entry in &history.items {
        let _ = writeln!(out, "{}", format_history_line(entry));
    }
    if history.has_more {
        let _ = writeln!(out, "… more available (use --all)");
    }

    out
}

pub fn format_history_line(entry: &HistoryEntry) -> String {
    let language = if entry.language == "original" {
        String::new()
    } else {
        format!(" [{}]", entry.language)
    };
    format!(
        "{}  {:<14}  {}{}",
        entry.id,
        entry.display_date(),
        preview(entry.display_title(), PREVIEW_CHARS),
        language
    )
}

/// First line of `text`, cut to `max` characters.
pub fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= max && !text.trim().contains('\n') {
        return line.to_string();
    }
    let cut: String = line.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gosta_core::session::Session;

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdefghij", 4), "abcd…");
        assert_eq!(preview("first\nsecond", 20), "first…");
        assert_eq!(preview("", 5), "");
    }

    #[test]
    fn test_history_line_marks_translation() {
        let entry = HistoryEntry {
            id: "42".to_string(),
            title: String::new(),
            input_text: "in".to_string(),
            summary: "sum".to_string(),
            translated_summary: Some("käännös".to_string()),
            summary_type: "brief".to_string(),
            style: "paragraph".to_string(),
            tonality: "professional".to_string(),
            language: "fi".to_string(),
            created_at: "not a date".to_string(),
        };

        let line = format_history_line(&entry);
        assert!(line.starts_with("42  not a date"));
        assert!(line.contains("Untitled"));
        assert!(line.ends_with("[fi]"));
    }

    #[test]
    fn test_format_session_without_summary() {
        let snapshot = SessionSnapshot {
            session: Session::default(),
            status: SessionStatus::Idle,
            error: Some("Please enter some text to summarize.".to_string()),
            history: PagerSnapshot::default(),
            device_id: None,
        };

        let text = format_session(&snapshot);
        assert!(text.contains("Input:    (empty)"));
        assert!(text.contains("Language: original"));
        assert!(text.contains("Please enter some text"));
        assert!(text.contains("No summary yet."));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(format_history(&PagerSnapshot::default()), "No saved summaries.\n");
    }
}
