pub mod http;

pub use http::HttpDataApi;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Budget, NewRecord, Record, RecordPatch};

/// Failures at the data-access boundary. Store actions map these into their
/// own operation-specific error variants.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The external data-access API behind the stores. Implemented over HTTP in
/// production and by an in-memory mock in tests.
#[async_trait]
pub trait DataApi: Send + Sync {
    async fn list_records(&self) -> ApiResult<Vec<Record>>;
    async fn create_record(&self, record: &NewRecord) -> ApiResult<Record>;
    async fn update_record(&self, id: i64, patch: &RecordPatch) -> ApiResult<Record>;
    async fn delete_record(&self, id: i64) -> ApiResult<()>;

    async fn list_budgets(&self) -> ApiResult<Vec<Budget>>;
    async fn create_budget(&self, budget: &Budget) -> ApiResult<Budget>;
    async fn update_budget(&self, category: &str, budget: &Budget) -> ApiResult<Budget>;
    async fn delete_budget(&self, category: &str) -> ApiResult<()>;
}
