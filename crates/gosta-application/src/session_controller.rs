//! Session controller: the only writer of the active session.
//!
//! Every operation takes `&self`; state sits behind a mutex that is released
//! before any backend call. Each request captures a [`Ticket`] when issued and
//! its completion is applied only if that ticket is still current, so a slow
//! response can never overwrite newer state.

use std::sync::Arc;

use gosta_core::device::DeviceId;
use gosta_core::error::{GostaError, Result};
use gosta_core::history::{HistoryEntry, HistoryRepository, SaveHistoryPayload};
use gosta_core::service::{SummarizerService, TextExtractor, UploadedFile};
use gosta_core::session::{Session, SessionStatus, SummaryOptions, is_translation};
use gosta_core::storage::LocalStorage;
use tokio::sync::Mutex;

use crate::device_identity::ensure_device_id;
use crate::draft_store::DraftStore;
use crate::history_pager::{HistoryPager, LoadOutcome, PagerSnapshot};

/// How a completed backend call affected the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer operation superseded this one; its result was dropped.
    Discarded,
}

/// Counters captured when a request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Ticket {
    /// Session transitions: new, clear, select, delete of the active entry.
    epoch: u64,
    /// Summarize and regenerate issues.
    summary: u64,
    /// Translate issues, plus anything that replaces the summary.
    translation: u64,
}

impl Ticket {
    fn summary_current(&self, current: &Ticket) -> bool {
        self.epoch == current.epoch && self.summary == current.summary
    }

    fn translation_current(&self, current: &Ticket) -> bool {
        self == current
    }
}

/// Everything the UI needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session: Session,
    pub status: SessionStatus,
    pub error: Option<String>,
    pub history: PagerSnapshot,
    pub device_id: Option<DeviceId>,
}

#[derive(Debug, Default)]
struct ControllerState {
    session: Session,
    status: SessionStatus,
    error: Option<String>,
    ticket: Ticket,
    device_id: Option<DeviceId>,
}

impl ControllerState {
    fn fail(&mut self, error: &GostaError) {
        self.status = SessionStatus::Idle;
        self.error = Some(error.user_message());
    }

    /// Starts a fresh session. Pending responses from the old one go stale.
    fn reset_session(&mut self) {
        self.session = Session::default();
        self.status = SessionStatus::Idle;
        self.error = None;
        self.ticket.epoch += 1;
    }

    /// Installs a new backend summary; translations of the old one go stale.
    fn apply_summary(&mut self, summary: String) {
        self.session.set_summary(summary);
        self.ticket.translation += 1;
    }
}

pub struct SessionController {
    summarizer: Arc<dyn SummarizerService>,
    extractor: Arc<dyn TextExtractor>,
    history: Arc<dyn HistoryRepository>,
    storage: Arc<dyn LocalStorage>,
    drafts: DraftStore,
    pager: HistoryPager,
    state: Mutex<ControllerState>,
}

impl SessionController {
    pub fn new(
        summarizer: Arc<dyn SummarizerService>,
        extractor: Arc<dyn TextExtractor>,
        history: Arc<dyn HistoryRepository>,
        storage: Arc<dyn LocalStorage>,
        history_page_size: usize,
    ) -> Self {
        Self {
            summarizer,
            extractor,
            drafts: DraftStore::new(storage.clone()),
            pager: HistoryPager::new(history.clone(), history_page_size),
            history,
            storage,
            state: Mutex::new(ControllerState::default()),
        }
    }

    /// Establishes the device identity, restores the draft and loads the
    /// first history page.
    pub async fn start(&self) {
        let device_id = ensure_device_id(self.storage.as_ref());
        let session = self.drafts.hydrate();

        {
            let mut state = self.state.lock().await;
            state.session = session;
            state.status = SessionStatus::Idle;
            state.error = None;
            state.ticket.epoch += 1;
            state.device_id = Some(device_id.clone());
        }

        tracing::info!("[SessionController] Started for device {}", device_id);
        self.refresh_history(&device_id).await;
    }

    pub async fn device_id(&self) -> Option<DeviceId> {
        self.state.lock().await.device_id.clone()
    }

    pub async fn set_input_text(&self, text: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.session.input_text = text.into();
        self.drafts.persist(&state.session);
    }

    pub async fn set_options(&self, options: SummaryOptions) {
        let mut state = self.state.lock().await;
        state.session.options = options;
        self.drafts.persist(&state.session);
    }

    /// Summarizes `text` with `options`, replacing the current summary.
    ///
    /// On success the translation and the history link are cleared. On
    /// failure the previous summary stays visible.
    pub async fn summarize(
        &self,
        text: impl Into<String>,
        options: SummaryOptions,
    ) -> Result<Completion> {
        let text = text.into();
        let ticket = {
            let mut state = self.state.lock().await;
            if text.trim().is_empty() {
                let error = GostaError::validation("Please enter some text to summarize.");
                state.error = Some(error.user_message());
                return Err(error);
            }

            state.session.input_text = text.clone();
            state.session.options = options.clone();
            self.drafts.persist(&state.session);

            state.ticket.summary += 1;
            state.ticket.translation += 1;
            state.status = SessionStatus::Generating;
            state.error = None;
            state.ticket
        };

        tracing::debug!("[SessionController] summarize issued ({} chars)", text.len());
        let result = self.summarizer.summarize(&text, &options).await;

        let mut state = self.state.lock().await;
        if !ticket.summary_current(&state.ticket) {
            tracing::debug!("[SessionController] Discarding stale summarize response");
            return Ok(Completion::Discarded);
        }

        match result {
            Ok(summary) => {
                state.apply_summary(summary);
                state.session.active_history_id = None;
                state.status = SessionStatus::Idle;
                self.drafts.persist(&state.session);
                Ok(Completion::Applied)
            }
            Err(e) => {
                tracing::debug!("[SessionController] summarize failed: {}", e);
                state.fail(&e);
                Err(e)
            }
        }
    }

    /// Re-summarizes the current input with the current options.
    ///
    /// With no input text the existing summary is used as the source. An
    /// active translation is re-applied to the new summary; if that fails the
    /// untranslated summary is shown and the language is dropped.
    pub async fn regenerate(&self) -> Result<Completion> {
        let (ticket, source, options, language) = {
            let mut state = self.state.lock().await;
            let input = state.session.input_text.trim();
            let source = if !input.is_empty() {
                input.to_string()
            } else if state.session.has_summary() {
                state.session.original_summary.clone()
            } else {
                let error = GostaError::validation("Nothing to regenerate yet.");
                state.error = Some(error.user_message());
                return Err(error);
            };

            let language = state
                .session
                .has_translation()
                .then(|| state.session.selected_language.clone());

            state.ticket.summary += 1;
            state.ticket.translation += 1;
            state.status = SessionStatus::Regenerating;
            state.error = None;
            (state.ticket, source, state.session.options.clone(), language)
        };

        tracing::debug!("[SessionController] regenerate issued");
        let result = self.summarizer.summarize(&source, &options).await;

        let (ticket, summary) = {
            let mut state = self.state.lock().await;
            if !ticket.summary_current(&state.ticket) {
                tracing::debug!("[SessionController] Discarding stale regenerate response");
                return Ok(Completion::Discarded);
            }

            let summary = match result {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::debug!("[SessionController] regenerate failed: {}", e);
                    state.fail(&e);
                    return Err(e);
                }
            };

            state.apply_summary(summary.clone());
            state.status = if language.is_some() {
                SessionStatus::Translating
            } else {
                SessionStatus::Idle
            };
            self.drafts.persist(&state.session);
            (state.ticket, summary)
        };

        let Some(language) = language else {
            return Ok(Completion::Applied);
        };

        let translated = self.summarizer.translate(&summary, &language).await;

        let mut state = self.state.lock().await;
        if !ticket.translation_current(&state.ticket) {
            tracing::debug!("[SessionController] Discarding stale re-translation");
            return Ok(Completion::Applied);
        }

        state.status = SessionStatus::Idle;
        match translated {
            Ok(text) => {
                state.session.displayed_summary = text;
                state.session.selected_language = language;
                self.drafts.persist(&state.session);
            }
            Err(e) => {
                tracing::warn!(
                    "[SessionController] Re-translation to {} failed, showing original: {}",
                    language,
                    e
                );
                state.error = Some(e.user_message());
            }
        }
        Ok(Completion::Applied)
    }

    /// Changes the summary type and, when a summary exists, regenerates it.
    pub async fn switch_summary_type(&self, summary_type: impl Into<String>) -> Result<Completion> {
        let has_summary = {
            let mut state = self.state.lock().await;
            state.session.options.summary_type = summary_type.into();
            self.drafts.persist(&state.session);
            state.session.has_summary()
        };

        if has_summary {
            self.regenerate().await
        } else {
            Ok(Completion::Applied)
        }
    }

    /// Shows the summary in `language`.
    ///
    /// An empty language or `"original"` switches back to the untranslated
    /// summary without a backend call. A successful translation is saved to
    /// history and the session becomes linked to the saved entry.
    pub async fn translate(&self, language: &str) -> Result<Completion> {
        let language = language.trim();

        if !is_translation(language) {
            let mut state = self.state.lock().await;
            state.ticket.translation += 1;
            if state.status == SessionStatus::Translating {
                state.status = SessionStatus::Idle;
            }
            state.session.show_original();
            self.drafts.persist(&state.session);
            return Ok(Completion::Applied);
        }

        let (ticket, source) = {
            let mut state = self.state.lock().await;
            if !state.session.has_summary() {
                let error = GostaError::validation("Generate a summary before translating.");
                state.error = Some(error.user_message());
                return Err(error);
            }

            state.ticket.translation += 1;
            state.status = SessionStatus::Translating;
            state.error = None;
            (state.ticket, state.session.original_summary.clone())
        };

        tracing::debug!("[SessionController] translate to {} issued", language);
        let result = self.summarizer.translate(&source, language).await;

        let (payload, device_id) = {
            let mut state = self.state.lock().await;
            if !ticket.translation_current(&state.ticket) {
                tracing::debug!("[SessionController] Discarding stale translation to {}", language);
                return Ok(Completion::Discarded);
            }

            match result {
                Ok(text) => {
                    state.session.displayed_summary = text;
                    state.session.selected_language = language.to_string();
                    state.status = SessionStatus::Idle;
                    self.drafts.persist(&state.session);
                    (
                        SaveHistoryPayload::from_session(&state.session),
                        state.device_id.clone(),
                    )
                }
                Err(e) => {
                    tracing::debug!("[SessionController] translate failed: {}", e);
                    state.fail(&e);
                    return Err(e);
                }
            }
        };

        if let Some(device_id) = device_id {
            if let Some(saved) = self.save_history(&device_id, &payload).await {
                let mut state = self.state.lock().await;
                if state.ticket.epoch == ticket.epoch {
                    state.session.active_history_id = Some(saved.id);
                }
            }
        }

        Ok(Completion::Applied)
    }

    /// Replaces the input text with the contents of a `.txt` file.
    ///
    /// Never summarizes on its own.
    pub async fn upload_file(&self, file: UploadedFile) -> Result<Completion> {
        let epoch = {
            let mut state = self.state.lock().await;
            if !file.is_plain_text() {
                let error = GostaError::validation("Only .txt files are supported.");
                state.error = Some(error.user_message());
                return Err(error);
            }
            state.error = None;
            state.ticket.epoch
        };

        tracing::debug!("[SessionController] Uploading {}", file.file_name);
        let result = self.extractor.extract_text(&file).await;

        let mut state = self.state.lock().await;
        if state.ticket.epoch != epoch {
            tracing::debug!("[SessionController] Discarding upload of {}", file.file_name);
            return Ok(Completion::Discarded);
        }

        match result {
            Ok(text) => {
                state.session.input_text = text;
                self.drafts.persist(&state.session);
                Ok(Completion::Applied)
            }
            Err(e) => {
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Saves the current work, then starts over with defaults.
    pub async fn new_session(&self) {
        self.flush_if_dirty().await;

        let mut state = self.state.lock().await;
        state.reset_session();
        self.drafts.clear();
        tracing::debug!("[SessionController] New session");
    }

    /// Saves the current work, then loads `entry` as the active session.
    pub async fn select_history_entry(&self, entry: &HistoryEntry) {
        self.flush_if_dirty().await;

        let mut state = self.state.lock().await;
        state.reset_session();
        state.session = entry.to_session();
        self.drafts.persist(&state.session);
        tracing::debug!("[SessionController] Selected history entry {}", entry.id);
    }

    /// Fetches one entry from the backend and selects it.
    ///
    /// Returns `false` when there is no device identity or the entry could
    /// not be fetched.
    pub async fn select_history_by_id(&self, id: &str) -> bool {
        let Some(device_id) = self.device_id().await else {
            return false;
        };

        match self.history.find_by_id(&device_id, id).await {
            Ok(entry) => {
                self.select_history_entry(&entry).await;
                true
            }
            Err(e) => {
                tracing::warn!("[SessionController] Failed to load history entry {}: {}", id, e);
                false
            }
        }
    }

    /// Deletes a saved entry and resynchronizes the list.
    ///
    /// Deleting the entry the session came from starts a new session without
    /// saving. Returns whether the backend confirmed the removal.
    pub async fn delete_history_entry(&self, id: &str) -> bool {
        let Some(device_id) = self.device_id().await else {
            return false;
        };

        let removed = match self.history.remove(&device_id, id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("[SessionController] Failed to delete history entry {}: {}", id, e);
                false
            }
        };

        if removed {
            self.pager.remove_local(id).await;

            let mut state = self.state.lock().await;
            if state.session.active_history_id.as_deref() == Some(id) {
                state.reset_session();
                self.drafts.clear();
                tracing::debug!("[SessionController] Active entry deleted, session reset");
            }
        }

        self.refresh_history(&device_id).await;
        removed
    }

    /// Discards the current session without saving it.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.reset_session();
        self.drafts.clear();
        tracing::debug!("[SessionController] Session cleared");
    }

    pub async fn load_more_history(&self) -> LoadOutcome {
        let Some(device_id) = self.device_id().await else {
            return LoadOutcome::Skipped;
        };

        match self.pager.load_more(&device_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("[SessionController] Failed to load more history: {}", e);
                LoadOutcome::Skipped
            }
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let history = self.pager.snapshot().await;
        let state = self.state.lock().await;
        SessionSnapshot {
            session: state.session.clone(),
            status: state.status,
            error: state.error.clone(),
            history,
            device_id: state.device_id.clone(),
        }
    }

    /// Upserts the current session if it holds a summary.
    async fn flush_if_dirty(&self) {
        let (payload, device_id) = {
            let state = self.state.lock().await;
            if !state.session.has_summary() {
                return;
            }
            let Some(device_id) = state.device_id.clone() else {
                return;
            };
            (SaveHistoryPayload::from_session(&state.session), device_id)
        };

        self.save_history(&device_id, &payload).await;
    }

    /// Upserts and refreshes the list. Failures are logged only.
    async fn save_history(
        &self,
        device_id: &DeviceId,
        payload: &SaveHistoryPayload,
    ) -> Option<HistoryEntry> {
        match self.history.upsert(device_id, payload).await {
            Ok(saved) => {
                tracing::debug!("[SessionController] Saved history entry {}", saved.id);
                self.refresh_history(device_id).await;
                Some(saved)
            }
            Err(e) => {
                tracing::warn!("[SessionController] Failed to save history: {}", e);
                None
            }
        }
    }

    async fn refresh_history(&self, device_id: &DeviceId) {
        if let Err(e) = self.pager.reset(device_id).await {
            tracing::warn!("[SessionController] Failed to refresh history: {}", e);
        }
    }
}
