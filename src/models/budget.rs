use serde::{Deserialize, Serialize};

use crate::models::amount_from_number_or_string;

/// A per-category monthly spending limit. The category is the natural key;
/// the store keeps at most one budget per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category: String,
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub amount: f64,
}

/// Spend-vs-limit summary for one category in the current calendar month.
/// Always recomputed from the current collections, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    pub is_over_budget: bool,
}
