use thiserror::Error;

/// Errors raised by budget operations.
///
/// Services return `anyhow::Result`; callers that need to branch on the
/// failure downcast to this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BudgetError {
    #[error("Budget data is still loading")]
    NotReady,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Storage failure for key '{key}': {message}")]
    Storage { key: String, message: String },
}
