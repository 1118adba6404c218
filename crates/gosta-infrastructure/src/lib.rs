//! Infrastructure adapters for the Gosta client: HTTP clients for the
//! summarizer backend, local storage, platform paths and configuration.

pub mod config_service;
pub mod http;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::http::{ApiClient, HttpHistoryRepository, HttpSummarizerClient};
pub use crate::storage::{FileLocalStorage, MemoryLocalStorage};
