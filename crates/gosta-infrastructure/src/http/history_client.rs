//! History endpoints, scoped by the `X-Device-Id` header.

use async_trait::async_trait;
use gosta_core::device::DeviceId;
use gosta_core::error::{GostaError, Result};
use gosta_core::history::{HistoryEntry, HistoryPage, HistoryRepository, SaveHistoryPayload};
use reqwest::{RequestBuilder, StatusCode};

use super::{ApiClient, ensure_success, read_json, transport_error};

/// Header carrying the device identity on every history call.
pub const DEVICE_ID_HEADER: &str = "X-Device-Id";

/// `HistoryRepository` backed by the summarizer API.
#[derive(Debug, Clone)]
pub struct HttpHistoryRepository {
    api: ApiClient,
}

impl HttpHistoryRepository {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn scoped(&self, builder: RequestBuilder, device_id: &DeviceId) -> RequestBuilder {
        builder.header(DEVICE_ID_HEADER, device_id.as_str())
    }
}

#[async_trait]
impl HistoryRepository for HttpHistoryRepository {
    async fn fetch_page(
        &self,
        device_id: &DeviceId,
        skip: usize,
        limit: usize,
    ) -> Result<HistoryPage> {
        let request = self
            .api
            .http()
            .get(self.api.url("history"))
            .query(&[("skip", skip), ("limit", limit)]);

        let response = self
            .scoped(request, device_id)
            .send()
            .await
            .map_err(|e| transport_error("history fetch", e))?;

        read_json("history fetch", response).await
    }

    async fn find_by_id(&self, device_id: &DeviceId, id: &str) -> Result<HistoryEntry> {
        let request = self.api.http().get(self.api.url(&format!("history/{id}")));

        let response = self
            .scoped(request, device_id)
            .send()
            .await
            .map_err(|e| transport_error("history load", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GostaError::not_found("HistoryEntry", id));
        }

        read_json("history load", response).await
    }

    async fn upsert(
        &self,
        device_id: &DeviceId,
        payload: &SaveHistoryPayload,
    ) -> Result<HistoryEntry> {
        let request = self.api.http().post(self.api.url("history")).json(payload);

        let response = self
            .scoped(request, device_id)
            .send()
            .await
            .map_err(|e| transport_error("history save", e))?;

        read_json("history save", response).await
    }

    async fn remove(&self, device_id: &DeviceId, id: &str) -> Result<()> {
        let request = self
            .api
            .http()
            .delete(self.api.url(&format!("history/{id}")));

        let response = self
            .scoped(request, device_id)
            .send()
            .await
            .map_err(|e| transport_error("history delete", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GostaError::not_found("HistoryEntry", id));
        }

        ensure_success("history delete", response).await?;
        Ok(())
    }
}
