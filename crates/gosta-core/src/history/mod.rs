//! History domain module.
//!
//! Saved summaries live on the backend; this module holds the client-side
//! projections and the repository seam used to reach them.

mod model;
mod repository;

pub use model::{HistoryEntry, HistoryPage, SaveHistoryPayload};
pub use repository::HistoryRepository;
