pub mod budgets;
pub mod records;

pub use budgets::BudgetStore;
pub use records::RecordStore;
