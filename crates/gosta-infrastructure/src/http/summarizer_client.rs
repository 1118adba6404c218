//! Summarize, translate and upload endpoints.

use async_trait::async_trait;
use gosta_core::error::{GostaError, Result};
use gosta_core::service::{SummarizerService, TextExtractor, UploadedFile};
use gosta_core::session::SummaryOptions;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::{ApiClient, read_json, transport_error};

/// Client for `POST /summarize`, `POST /translate` and `POST /upload`.
#[derive(Debug, Clone)]
pub struct HttpSummarizerClient {
    api: ApiClient,
}

impl HttpSummarizerClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    text: &'a str,
    style: &'a str,
    tonality: &'a str,
    summary_type: &'a str,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    target_language: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    text: String,
}

#[async_trait]
impl SummarizerService for HttpSummarizerClient {
    async fn summarize(&self, text: &str, options: &SummaryOptions) -> Result<String> {
        let body = SummarizeRequest {
            text,
            style: &options.style,
            tonality: &options.tonality,
            summary_type: &options.summary_type,
        };

        tracing::debug!(
            "[HttpSummarizerClient] summarize: {} chars, type={}, style={}, tonality={}",
            text.len(),
            options.summary_type,
            options.style,
            options.tonality
        );

        let response = self
            .api
            .http()
            .post(self.api.url("summarize"))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("summarize", e))?;

        let parsed: SummarizeResponse = read_json("summarize", response).await?;
        Ok(parsed.summary)
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let body = TranslateRequest {
            text,
            target_language,
        };

        tracing::debug!(
            "[HttpSummarizerClient] translate: {} chars -> {}",
            text.len(),
            target_language
        );

        let response = self
            .api
            .http()
            .post(self.api.url("translate"))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("translate", e))?;

        let parsed: TranslateResponse = read_json("translate", response).await?;
        Ok(parsed.translated_text)
    }
}

#[async_trait]
impl TextExtractor for HttpSummarizerClient {
    async fn extract_text(&self, file: &UploadedFile) -> Result<String> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str("text/plain")
            .map_err(|e| GostaError::internal(format!("Invalid upload mime type: {e}")))?;
        let form = Form::new().part("file", part);

        let response = self
            .api
            .http()
            .post(self.api.url("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport_error("upload", e))?;

        let parsed: UploadResponse = read_json("upload", response).await?;
        Ok(parsed.text)
    }
}
