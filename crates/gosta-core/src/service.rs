//! Backend collaborators consumed by the session controller.

use async_trait::async_trait;

use crate::error::Result;
use crate::session::SummaryOptions;

/// Summarization and translation backend.
#[async_trait]
pub trait SummarizerService: Send + Sync {
    /// Produces a summary of `text` in the requested format and tone.
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String>;

    /// Translates `text` into `target_language` (source is auto-detected).
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;
}

/// A file picked by the user for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Only plain-text transcripts are accepted.
    pub fn is_plain_text(&self) -> bool {
        self.file_name.to_ascii_lowercase().ends_with(".txt")
    }
}

/// Turns an uploaded file into transcript text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String>;
}
