//! History repository trait.

use async_trait::async_trait;

use super::model::{HistoryEntry, HistoryPage, SaveHistoryPayload};
use crate::device::DeviceId;
use crate::error::Result;

/// Backend-held history of saved summaries, scoped by device identity.
///
/// Implementations perform no retries; any transport or parse failure is
/// returned as an error and the caller decides how loud to be about it.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Fetches one page, newest first.
    ///
    /// `has_more` is taken from the server response as-is.
    async fn fetch_page(&self, device_id: &DeviceId, skip: usize, limit: usize)
    -> Result<HistoryPage>;

    /// Fetches a single entry by id.
    ///
    /// # Returns
    ///
    /// - `Ok(HistoryEntry)`: Entry found
    /// - `Err(GostaError::NotFound)`: No such entry for this device
    async fn find_by_id(&self, device_id: &DeviceId, id: &str) -> Result<HistoryEntry>;

    /// Saves the snapshot; the backend decides whether this inserts or
    /// updates an existing entry.
    async fn upsert(&self, device_id: &DeviceId, payload: &SaveHistoryPayload)
    -> Result<HistoryEntry>;

    /// Deletes an entry. An error means the entry was not removed.
    async fn remove(&self, device_id: &DeviceId, id: &str) -> Result<()>;
}
