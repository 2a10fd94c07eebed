use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::api::{ApiError, ApiResult, DataApi};
use crate::models::{Budget, NewRecord, Record, RecordPatch};

use async_trait::async_trait;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// `DataApi` implementation over the HTTP data-access service.
#[derive(Debug, Clone)]
pub struct HttpDataApi {
    client: Client,
    base_url: String,
}

impl HttpDataApi {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn check_status(response: Response) -> ApiResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl DataApi for HttpDataApi {
    async fn list_records(&self) -> ApiResult<Vec<Record>> {
        self.get_json("/transactions").await
    }

    async fn create_record(&self, record: &NewRecord) -> ApiResult<Record> {
        self.post_json("/transactions", record).await
    }

    async fn update_record(&self, id: i64, patch: &RecordPatch) -> ApiResult<Record> {
        self.put_json(&format!("/transactions/{}", id), patch).await
    }

    async fn delete_record(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("/transactions/{}", id)).await
    }

    async fn list_budgets(&self) -> ApiResult<Vec<Budget>> {
        self.get_json("/budgets").await
    }

    async fn create_budget(&self, budget: &Budget) -> ApiResult<Budget> {
        self.post_json("/budgets", budget).await
    }

    async fn update_budget(&self, category: &str, budget: &Budget) -> ApiResult<Budget> {
        self.put_json(&format!("/budgets/{}", urlencoding::encode(category)), budget)
            .await
    }

    async fn delete_budget(&self, category: &str) -> ApiResult<()> {
        self.delete(&format!("/budgets/{}", urlencoding::encode(category)))
            .await
    }
}
