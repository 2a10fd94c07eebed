use std::sync::Arc;

use crate::api::DataApi;
use crate::date_utils;
use crate::error::{AppError, AppResult};
use crate::models::{Budget, BudgetProgress, Record};
use crate::services::analytics;

/// Session-scoped store for per-category budgets. The category is the
/// natural key; the collection never holds two budgets for one category.
///
/// Progress views take the current record collection as an explicit
/// argument rather than reaching into the record store.
pub struct BudgetStore {
    api: Arc<dyn DataApi>,
    budgets: Vec<Budget>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl BudgetStore {
    pub fn new(api: Arc<dyn DataApi>) -> Self {
        Self {
            api,
            budgets: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    pub fn budget_for(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }

    /// Replace the local collection with the full remote budget set.
    pub async fn fetch_all(&mut self) -> AppResult<()> {
        self.is_loading = true;
        self.error = None;

        let result = self.api.list_budgets().await;
        self.is_loading = false;

        match result {
            Ok(budgets) => {
                self.budgets = budgets;
                Ok(())
            }
            Err(e) => Err(self.fail(AppError::Fetch(e.to_string()))),
        }
    }

    /// Update the budget for the category if one exists, create it
    /// otherwise. Local state takes the server's return value either way.
    pub async fn upsert(&mut self, budget: Budget) -> AppResult<Budget> {
        self.is_loading = true;
        self.error = None;

        let exists = self.budgets.iter().any(|b| b.category == budget.category);
        let result = if exists {
            self.api.update_budget(&budget.category, &budget).await
        } else {
            self.api.create_budget(&budget).await
        };
        self.is_loading = false;

        match result {
            Ok(saved) => {
                if exists {
                    if let Some(entry) = self
                        .budgets
                        .iter_mut()
                        .find(|b| b.category == budget.category)
                    {
                        *entry = saved.clone();
                    }
                } else {
                    self.budgets.push(saved.clone());
                }
                Ok(saved)
            }
            Err(e) => Err(self.fail(AppError::Save(e.to_string()))),
        }
    }

    /// Delete remotely first, then drop the category from local state.
    pub async fn remove(&mut self, category: &str) -> AppResult<()> {
        self.is_loading = true;
        self.error = None;

        let result = self.api.delete_budget(category).await;
        self.is_loading = false;

        match result {
            Ok(()) => {
                self.budgets.retain(|b| b.category != category);
                Ok(())
            }
            Err(e) => Err(self.fail(AppError::Delete(e.to_string()))),
        }
    }

    /// Clear all local state. Used at session teardown; no remote effect.
    pub fn reset(&mut self) {
        self.budgets.clear();
        self.is_loading = false;
        self.error = None;
    }

    fn fail(&mut self, err: AppError) -> AppError {
        tracing::error!("{}", err);
        self.error = Some(err.to_string());
        err
    }

    /// Current-month progress for one category, or `None` without a budget.
    pub fn progress(&self, category: &str, records: &[Record]) -> Option<BudgetProgress> {
        let budget = self.budget_for(category)?;
        Some(analytics::budget_progress(
            budget,
            records,
            date_utils::today(),
        ))
    }

    /// Current-month progress for every budget, in collection order.
    pub fn progress_all(&self, records: &[Record]) -> Vec<BudgetProgress> {
        analytics::all_budget_progress(&self.budgets, records, date_utils::today())
    }
}
