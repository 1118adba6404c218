//! Domain layer of the Gosta summarizer client.
//!
//! Holds the session and history models, the shared error type, and the
//! traits through which the application layer reaches the backend and local
//! storage.

pub mod config;
pub mod device;
pub mod error;
pub mod history;
pub mod service;
pub mod session;
pub mod storage;

// Re-export common error type
pub use error::{GostaError, Result};
