//! Application layer for Gosta.
//!
//! Coordinates the active session, its local draft and the device's saved
//! history on top of the seams defined in `gosta-core`.

pub mod device_identity;
pub mod draft_store;
pub mod history_pager;
pub mod session_controller;

pub use device_identity::ensure_device_id;
pub use draft_store::DraftStore;
pub use history_pager::{HistoryPager, LoadOutcome, PagerSnapshot};
pub use session_controller::{Completion, SessionController, SessionSnapshot};
