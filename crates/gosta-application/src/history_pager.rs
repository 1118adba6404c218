//! Infinite-scroll pager over the device's history.
//!
//! The pager knows nothing about scrolling; the UI calls [`HistoryPager::load_more`]
//! when the end of the list comes into view.

use std::sync::Arc;

use gosta_core::device::DeviceId;
use gosta_core::error::Result;
use gosta_core::history::{HistoryEntry, HistoryRepository};
use tokio::sync::Mutex;

/// Result of a pager operation that completed without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was applied; carries the number of entries it contained.
    Loaded(usize),
    /// Nothing was requested (end of list, or a load already in flight).
    Skipped,
    /// The response arrived after a reset and was dropped.
    Stale,
}

/// Point-in-time copy of the pager for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerSnapshot {
    pub items: Vec<HistoryEntry>,
    pub skip: usize,
    pub has_more: bool,
    pub is_loading: bool,
}

#[derive(Debug, Default)]
struct PagerState {
    items: Vec<HistoryEntry>,
    /// Entries fetched in the current listing generation.
    skip: usize,
    has_more: bool,
    /// Bumped by every reset; responses from older generations are dropped.
    generation: u64,
    loading: bool,
}

pub struct HistoryPager {
    repository: Arc<dyn HistoryRepository>,
    page_size: usize,
    state: Mutex<PagerState>,
}

impl HistoryPager {
    /// Creates an empty pager. `page_size` of zero is raised to one.
    pub fn new(repository: Arc<dyn HistoryRepository>, page_size: usize) -> Self {
        Self {
            repository,
            page_size: page_size.max(1),
            state: Mutex::new(PagerState::default()),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replaces the list with a fresh first page.
    ///
    /// On failure the current list is left untouched.
    pub async fn reset(&self, device_id: &DeviceId) -> Result<LoadOutcome> {
        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.generation
        };

        tracing::debug!("[HistoryPager] reset (generation {})", generation);
        let page = self
            .repository
            .fetch_page(device_id, 0, self.page_size)
            .await?;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::debug!("[HistoryPager] Dropping stale reset response");
            return Ok(LoadOutcome::Stale);
        }

        let fetched = page.items.len();
        state.has_more = self.more_after(page.has_more, fetched);
        state.items = page.items;
        state.skip = fetched;

        Ok(LoadOutcome::Loaded(fetched))
    }

    /// Appends the next page.
    ///
    /// No-op when the list is exhausted or another load is still in flight,
    /// so the same cursor is never requested twice.
    pub async fn load_more(&self, device_id: &DeviceId) -> Result<LoadOutcome> {
        let (generation, skip) = {
            let mut state = self.state.lock().await;
            if !state.has_more || state.loading {
                return Ok(LoadOutcome::Skipped);
            }
            state.loading = true;
            (state.generation, state.skip)
        };

        tracing::debug!("[HistoryPager] load_more at skip={}", skip);
        let result = self
            .repository
            .fetch_page(device_id, skip, self.page_size)
            .await;

        let mut state = self.state.lock().await;
        state.loading = false;
        let page = result?;

        if state.generation != generation {
            tracing::debug!("[HistoryPager] Dropping stale page at skip={}", skip);
            return Ok(LoadOutcome::Stale);
        }

        let fetched = page.items.len();
        state.items.extend(page.items);
        state.skip += fetched;
        state.has_more = self.more_after(page.has_more, fetched);

        Ok(LoadOutcome::Loaded(fetched))
    }

    /// Drops an entry whose deletion the backend confirmed.
    ///
    /// The cursor moves back with it, since the server's list shifted too.
    pub async fn remove_local(&self, id: &str) -> bool {
        let mut state = self.state.lock().await;
        let before = state.items.len();
        state.items.retain(|entry| entry.id != id);
        let removed = state.items.len() != before;
        if removed {
            state.skip = state.skip.saturating_sub(1);
        }
        removed
    }

    pub async fn items(&self) -> Vec<HistoryEntry> {
        self.state.lock().await.items.clone()
    }

    pub async fn has_more(&self) -> bool {
        self.state.lock().await.has_more
    }

    pub async fn skip(&self) -> usize {
        self.state.lock().await.skip
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.loading
    }

    pub async fn snapshot(&self) -> PagerSnapshot {
        let state = self.state.lock().await;
        PagerSnapshot {
            items: state.items.clone(),
            skip: state.skip,
            has_more: state.has_more,
            is_loading: state.loading,
        }
    }

    /// A short page ends the list whatever the server claims.
    fn more_after(&self, server_has_more: bool, fetched: usize) -> bool {
        server_has_more && fetched >= self.page_size
    }
}
