//! Local storage adapters.

mod file_storage;
mod memory_storage;

pub use file_storage::FileLocalStorage;
pub use memory_storage::MemoryLocalStorage;
