pub mod budget_service;
pub mod category_service;
pub mod export_service;
pub mod summary_service;
pub mod transaction_service;

pub use budget_service::{BudgetService, BudgetStatus, CategoryBudgetStatus};
pub use category_service::CategoryService;
pub use export_service::{CsvQuoting, ExportService, ImportReport, RejectedRow};
pub use summary_service::SummaryService;
pub use transaction_service::TransactionService;

use crate::core::errors::{ExpenseError, ValidationError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] ExpenseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests;
