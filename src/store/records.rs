use std::sync::Arc;

use crate::api::DataApi;
use crate::date_utils::normalize_date;
use crate::error::{AppError, AppResult};
use crate::models::{NewRecord, Record, RecordPatch};
use crate::services::analytics;

/// Session-scoped store for income/expense records, backed by the external
/// data-access API. One instance per session; call `reset` at teardown.
///
/// Every action performs exactly one remote call and leaves local state
/// untouched when that call fails. Failures are recorded in `error`, logged,
/// and returned to the caller. Mutations are not internally serialized;
/// overlapping calls are the caller's concern.
pub struct RecordStore {
    api: Arc<dyn DataApi>,
    records: Vec<Record>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl RecordStore {
    pub fn new(api: Arc<dyn DataApi>) -> Self {
        Self {
            api,
            records: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Replace the local collection with the full remote record set.
    pub async fn fetch_all(&mut self) -> AppResult<()> {
        self.is_loading = true;
        self.error = None;

        let result = self.api.list_records().await;
        self.is_loading = false;

        match result {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => Err(self.fail(AppError::Fetch(e.to_string()))),
        }
    }

    /// Create a record remotely and append the server-confirmed copy.
    /// The date is normalized to `YYYY-MM-DD`, defaulting to today.
    pub async fn add(&mut self, record: NewRecord) -> AppResult<Record> {
        self.is_loading = true;
        self.error = None;

        let result = self.submit_new(record).await;
        self.is_loading = false;

        match result {
            Ok(created) => {
                self.records.push(created.clone());
                Ok(created)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn submit_new(&self, mut record: NewRecord) -> AppResult<Record> {
        validate_amount(record.amount)?;
        record.date = Some(normalize_date(record.date.as_deref())?);
        self.api
            .create_record(&record)
            .await
            .map_err(|e| AppError::Create(e.to_string()))
    }

    /// Submit the mutable fields for `id` and replace the matching local
    /// record with the server's copy. If the id is no longer present locally
    /// after a successful remote call, the local collection is left as is.
    pub async fn update(&mut self, id: i64, patch: RecordPatch) -> AppResult<Record> {
        self.is_loading = true;
        self.error = None;

        let result = self.submit_patch(id, patch).await;
        self.is_loading = false;

        match result {
            Ok(updated) => {
                if let Some(existing) = self.records.iter_mut().find(|r| r.id == id) {
                    *existing = updated.clone();
                }
                Ok(updated)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    async fn submit_patch(&self, id: i64, mut patch: RecordPatch) -> AppResult<Record> {
        validate_amount(patch.amount)?;
        patch.date = Some(normalize_date(patch.date.as_deref())?);
        self.api
            .update_record(id, &patch)
            .await
            .map_err(|e| AppError::Update(e.to_string()))
    }

    /// Delete remotely first, then drop the record from local state.
    pub async fn remove(&mut self, id: i64) -> AppResult<()> {
        self.is_loading = true;
        self.error = None;

        let result = self.api.delete_record(id).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.records.retain(|r| r.id != id);
                Ok(())
            }
            Err(e) => Err(self.fail(AppError::Delete(e.to_string()))),
        }
    }

    /// Clear all local state. Used at session teardown; no remote effect.
    pub fn reset(&mut self) {
        self.records.clear();
        self.is_loading = false;
        self.error = None;
    }

    fn fail(&mut self, err: AppError) -> AppError {
        tracing::error!("{}", err);
        self.error = Some(err.to_string());
        err
    }

    // Derived views, recomputed from the current collection on every call.

    pub fn total_income(&self) -> f64 {
        analytics::total_income(&self.records)
    }

    pub fn total_expense(&self) -> f64 {
        analytics::total_expense(&self.records)
    }

    pub fn net_balance(&self) -> f64 {
        analytics::net_balance(&self.records)
    }

    pub fn records_in_month(&self, year: i32, month: u32) -> Vec<&Record> {
        analytics::records_in_month(&self.records, year, month)
    }

    pub fn records_in_category(&self, category: &str) -> Vec<&Record> {
        analytics::records_in_category(&self.records, category)
    }
}

fn validate_amount(amount: f64) -> AppResult<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::Validation(format!(
            "Amount must be a non-negative number, got {}",
            amount
        )));
    }
    Ok(())
}
