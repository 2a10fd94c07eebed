use serde::{Deserialize, Serialize};

use crate::models::amount_from_number_or_string;

/// Default category lists offered to clients when entering records.
pub const INCOME_CATEGORIES: &[&str] = &["工资", "奖金", "投资", "其他收入"];
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "餐饮", "交通", "住房", "购物", "娱乐", "医疗", "教育", "其他支出",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Income,
    Expense,
}

impl RecordType {
    pub fn default_categories(&self) -> &'static [&'static str] {
        match self {
            RecordType::Income => INCOME_CATEGORIES,
            RecordType::Expense => EXPENSE_CATEGORIES,
        }
    }
}

/// A single income or expense entry. The amount is always non-negative;
/// the sign is implied by `record_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub category: String,
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub amount: f64,
    /// Canonical `YYYY-MM-DD` calendar date.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payload for creating a record. The id is assigned by the data-access API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub category: String,
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The mutable fields of a record, submitted in full on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPatch {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub category: String,
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
