//! Derived views over record and budget collections.
//!
//! Everything here is a pure function over the slices it is given; the
//! stores pass in their current collections on every call, so results are
//! never stale across mutations.

use chrono::NaiveDate;

use crate::date_utils::{month_end, month_start, month_window, parse_date};
use crate::models::{Budget, BudgetProgress, Record, RecordType};

pub fn total_income(records: &[Record]) -> f64 {
    records
        .iter()
        .filter(|r| r.record_type == RecordType::Income)
        .map(|r| r.amount)
        .sum()
}

pub fn total_expense(records: &[Record]) -> f64 {
    records
        .iter()
        .filter(|r| r.record_type == RecordType::Expense)
        .map(|r| r.amount)
        .sum()
}

pub fn net_balance(records: &[Record]) -> f64 {
    total_income(records) - total_expense(records)
}

/// Records whose date falls within the inclusive calendar-month window for
/// `(year, month)`. Month is 1-based; an out-of-range month yields nothing.
pub fn records_in_month(records: &[Record], year: i32, month: u32) -> Vec<&Record> {
    let Some((start, end)) = month_window(year, month) else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|r| in_window(r, start, end))
        .collect()
}

pub fn records_in_category<'a>(records: &'a [Record], category: &str) -> Vec<&'a Record> {
    records.iter().filter(|r| r.category == category).collect()
}

fn in_window(record: &Record, start: NaiveDate, end: NaiveDate) -> bool {
    match parse_date(&record.date) {
        Some(date) => date >= start && date <= end,
        None => false,
    }
}

fn category_expense(records: &[&Record], category: &str) -> f64 {
    records
        .iter()
        .filter(|r| r.record_type == RecordType::Expense && r.category == category)
        .map(|r| r.amount)
        .sum()
}

/// Spend-vs-limit progress for one budget in the month containing `today`.
///
/// With no records at all this month the result short-circuits to a zero
/// spend. Zero-limit budgets are deliberately not guarded: the division
/// yields `+inf` when spent > 0 and `NaN` when spent is 0, and
/// `is_over_budget` follows `percentage > 100.0` either way.
pub fn budget_progress(budget: &Budget, records: &[Record], today: NaiveDate) -> BudgetProgress {
    let (start, end) = (month_start(today), month_end(today));
    let monthly: Vec<&Record> = records.iter().filter(|r| in_window(r, start, end)).collect();

    if monthly.is_empty() {
        return BudgetProgress {
            category: budget.category.clone(),
            spent: 0.0,
            limit: budget.amount,
            percentage: 0.0,
            is_over_budget: false,
        };
    }

    let spent = category_expense(&monthly, &budget.category);
    let percentage = spent / budget.amount * 100.0;

    BudgetProgress {
        category: budget.category.clone(),
        spent,
        limit: budget.amount,
        percentage,
        is_over_budget: percentage > 100.0,
    }
}

/// Progress for every budget, in the budget collection's order. Unlike the
/// single-category view there is no empty-month fast path; each entry is
/// computed from whatever records the month holds.
pub fn all_budget_progress(
    budgets: &[Budget],
    records: &[Record],
    today: NaiveDate,
) -> Vec<BudgetProgress> {
    let (start, end) = (month_start(today), month_end(today));
    let monthly: Vec<&Record> = records.iter().filter(|r| in_window(r, start, end)).collect();

    budgets
        .iter()
        .map(|budget| {
            let spent = category_expense(&monthly, &budget.category);
            let percentage = spent / budget.amount * 100.0;
            BudgetProgress {
                category: budget.category.clone(),
                spent,
                limit: budget.amount,
                percentage,
                is_over_budget: percentage > 100.0,
            }
        })
        .collect()
}
