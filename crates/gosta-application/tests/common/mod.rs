//! Hand-written mock backends shared by the application test suites.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gosta_core::device::DeviceId;
use gosta_core::error::{GostaError, Result};
use gosta_core::history::{HistoryEntry, HistoryPage, HistoryRepository, SaveHistoryPayload};
use gosta_core::service::{SummarizerService, TextExtractor, UploadedFile};
use gosta_core::session::SummaryOptions;
use tokio::sync::Notify;

pub fn entry(id: &str) -> HistoryEntry {
    HistoryEntry {
        id: id.to_string(),
        title: format!("Input {id}"),
        input_text: format!("Input {id}"),
        summary: format!("Summary {id}"),
        translated_summary: None,
        summary_type: "brief".to_string(),
        style: "paragraph".to_string(),
        tonality: "professional".to_string(),
        language: "original".to_string(),
        created_at: "2025-03-04T14:05:00Z".to_string(),
    }
}

pub fn entries(count: usize) -> Vec<HistoryEntry> {
    (0..count).map(|i| entry(&format!("e{i}"))).collect()
}

/// Takes a one-shot gate, if armed, and waits for it to open.
async fn pass_gate(slot: &Mutex<Option<Arc<Notify>>>) {
    let gate = slot.lock().unwrap().take();
    if let Some(gate) = gate {
        gate.notified().await;
    }
}

fn arm_gate(slot: &Mutex<Option<Arc<Notify>>>) -> Arc<Notify> {
    let gate = Arc::new(Notify::new());
    *slot.lock().unwrap() = Some(gate.clone());
    gate
}

// ── History ──────────────────────────────────────────────────────────

#[derive(Default)]
struct HistoryState {
    /// Newest first.
    entries: Vec<HistoryEntry>,
    next_id: usize,
    fetch_calls: Vec<(usize, usize)>,
    upserts: Vec<SaveHistoryPayload>,
    removes: Vec<String>,
    devices: Vec<String>,
    fail_fetch: bool,
    fail_upsert: bool,
    fail_remove: bool,
    forced_has_more: Option<bool>,
}

/// In-memory history backend that upserts by input text like the real one.
#[derive(Default)]
pub struct MockHistoryRepository {
    state: Mutex<HistoryState>,
    fetch_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        let repo = Self::default();
        repo.state.lock().unwrap().entries = entries;
        repo
    }

    pub fn fetch_calls(&self) -> Vec<(usize, usize)> {
        self.state.lock().unwrap().fetch_calls.clone()
    }

    pub fn upserts(&self) -> Vec<SaveHistoryPayload> {
        self.state.lock().unwrap().upserts.clone()
    }

    pub fn removes(&self) -> Vec<String> {
        self.state.lock().unwrap().removes.clone()
    }

    pub fn devices(&self) -> Vec<String> {
        self.state.lock().unwrap().devices.clone()
    }

    pub fn stored(&self) -> Vec<HistoryEntry> {
        self.state.lock().unwrap().entries.clone()
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.state.lock().unwrap().fail_fetch = fail;
    }

    pub fn fail_upserts(&self, fail: bool) {
        self.state.lock().unwrap().fail_upsert = fail;
    }

    pub fn fail_removes(&self, fail: bool) {
        self.state.lock().unwrap().fail_remove = fail;
    }

    pub fn force_has_more(&self, has_more: bool) {
        self.state.lock().unwrap().forced_has_more = Some(has_more);
    }

    /// Makes the next `fetch_page` wait until the returned gate is notified.
    pub fn hold_fetches(&self) -> Arc<Notify> {
        arm_gate(&self.fetch_gate)
    }
}

#[async_trait]
impl HistoryRepository for MockHistoryRepository {
    async fn fetch_page(
        &self,
        device_id: &DeviceId,
        skip: usize,
        limit: usize,
    ) -> Result<HistoryPage> {
        let page = {
            let mut state = self.state.lock().unwrap();
            state.fetch_calls.push((skip, limit));
            state.devices.push(device_id.to_string());
            if state.fail_fetch {
                return Err(GostaError::request(None, "history unavailable"));
            }
            let items: Vec<HistoryEntry> =
                state.entries.iter().skip(skip).take(limit).cloned().collect();
            let has_more = state
                .forced_has_more
                .unwrap_or(skip + items.len() < state.entries.len());
            HistoryPage { items, has_more }
        };

        pass_gate(&self.fetch_gate).await;
        Ok(page)
    }

    async fn find_by_id(&self, device_id: &DeviceId, id: &str) -> Result<HistoryEntry> {
        let mut state = self.state.lock().unwrap();
        state.devices.push(device_id.to_string());
        state
            .entries
            .iter()
            .find(|entry| entry.id == id)
            .cloned()
            .ok_or_else(|| GostaError::not_found("HistoryEntry", id))
    }

    async fn upsert(
        &self,
        device_id: &DeviceId,
        payload: &SaveHistoryPayload,
    ) -> Result<HistoryEntry> {
        let mut state = self.state.lock().unwrap();
        state.devices.push(device_id.to_string());
        state.upserts.push(payload.clone());
        if state.fail_upsert {
            return Err(GostaError::request(Some(500), "database down"));
        }

        let existing = state
            .entries
            .iter()
            .position(|entry| entry.input_text == payload.input_text);
        let id = match existing {
            Some(index) => state.entries.remove(index).id,
            None => {
                state.next_id += 1;
                format!("h{}", state.next_id)
            }
        };

        let saved = HistoryEntry {
            id,
            title: payload.input_text.lines().next().unwrap_or_default().to_string(),
            input_text: payload.input_text.clone(),
            summary: payload.summary.clone(),
            translated_summary: payload.translated_summary.clone(),
            summary_type: payload.summary_type.clone(),
            style: payload.style.clone(),
            tonality: payload.tonality.clone(),
            language: payload.language.clone(),
            created_at: "2025-03-04T14:05:00Z".to_string(),
        };
        state.entries.insert(0, saved.clone());
        Ok(saved)
    }

    async fn remove(&self, device_id: &DeviceId, id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.devices.push(device_id.to_string());
        state.removes.push(id.to_string());
        if state.fail_remove {
            return Err(GostaError::request(Some(500), "delete failed"));
        }
        let before = state.entries.len();
        state.entries.retain(|entry| entry.id != id);
        if state.entries.len() == before {
            return Err(GostaError::not_found("HistoryEntry", id));
        }
        Ok(())
    }
}

// ── Summarizer ───────────────────────────────────────────────────────

#[derive(Default)]
struct SummarizerState {
    summaries: VecDeque<Result<String>>,
    translations: VecDeque<Result<String>>,
    summarize_calls: Vec<(String, SummaryOptions)>,
    translate_calls: Vec<(String, String)>,
}

/// Scripted summarizer. Unscripted calls answer `summary of <text>` and
/// `[<lang>] <text>`.
#[derive(Default)]
pub struct MockSummarizer {
    state: Mutex<SummarizerState>,
    summarize_gate: Mutex<Option<Arc<Notify>>>,
    translate_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_summary(&self, result: Result<String>) {
        self.state.lock().unwrap().summaries.push_back(result);
    }

    pub fn push_translation(&self, result: Result<String>) {
        self.state.lock().unwrap().translations.push_back(result);
    }

    pub fn summarize_calls(&self) -> Vec<(String, SummaryOptions)> {
        self.state.lock().unwrap().summarize_calls.clone()
    }

    pub fn translate_calls(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().translate_calls.clone()
    }

    /// Makes the next summarize wait until the returned gate is notified.
    pub fn hold_summarize(&self) -> Arc<Notify> {
        arm_gate(&self.summarize_gate)
    }

    /// Makes the next translate wait until the returned gate is notified.
    pub fn hold_translate(&self) -> Arc<Notify> {
        arm_gate(&self.translate_gate)
    }
}

#[async_trait]
impl SummarizerService for MockSummarizer {
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        let result = {
            let mut state = self.state.lock().unwrap();
            state
                .summarize_calls
                .push((text.to_string(), options.clone()));
            state
                .summaries
                .pop_front()
                .unwrap_or_else(|| Ok(format!("summary of {text}")))
        };
        pass_gate(&self.summarize_gate).await;
        result
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let result = {
            let mut state = self.state.lock().unwrap();
            state
                .translate_calls
                .push((text.to_string(), target_language.to_string()));
            state
                .translations
                .pop_front()
                .unwrap_or_else(|| Ok(format!("[{target_language}] {text}")))
        };
        pass_gate(&self.translate_gate).await;
        result
    }
}

// ── Upload ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockExtractor {
    calls: Mutex<Vec<String>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String> {
        self.calls.lock().unwrap().push(file.file_name.clone());
        String::from_utf8(file.bytes.clone())
            .map_err(|e| GostaError::request(Some(400), format!("upload failed: {e}")))
    }
}
