use thiserror::Error;

use crate::models::{read::Expense, write::CreateExpenseCommand};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("store lock poisoned")]
    LockPoisoned,
}

pub trait ExpenseStore: Send + Sync {
    /// Assigns an id and creation time, appends, and returns the stored record.
    fn create_expense(&self, command: &CreateExpenseCommand) -> Result<Expense, StorageError>;
    /// All records in insertion order.
    fn list_expenses(&self) -> Result<Vec<Expense>, StorageError>;
    fn count(&self) -> Result<usize, StorageError>;
}
