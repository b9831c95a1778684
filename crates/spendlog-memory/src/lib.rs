//! In-memory storage backend for spendlog.
//!
//! Everything lives in a single lock-guarded `Vec`; dropping the store drops
//! every record.

mod ids;

use std::sync::RwLock;

use spendlog_core::{CreateExpenseCommand, Expense, ExpenseStore, IdGenerator, StorageError};

pub use ids::{MonotonicMillis, Sequential};

pub struct InMemoryExpenseStore {
    expenses: RwLock<Vec<Expense>>,
    ids: Box<dyn IdGenerator>,
}

impl Default for InMemoryExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryExpenseStore {
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(MonotonicMillis::new()))
    }

    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            expenses: RwLock::new(Vec::new()),
            ids,
        }
    }
}

impl ExpenseStore for InMemoryExpenseStore {
    fn create_expense(&self, command: &CreateExpenseCommand) -> Result<Expense, StorageError> {
        let mut expenses = self.expenses.write().map_err(|_| StorageError::LockPoisoned)?;
        // id assignment stays under the write lock so ids follow insertion order
        let expense = Expense::from_command(self.ids.next_id(), command, time::OffsetDateTime::now_utc());
        expenses.push(expense.clone());
        tracing::debug!(id = expense.id, count = expenses.len(), "Expense stored");
        Ok(expense)
    }

    fn list_expenses(&self) -> Result<Vec<Expense>, StorageError> {
        let expenses = self.expenses.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(expenses.clone())
    }

    fn count(&self) -> Result<usize, StorageError> {
        let expenses = self.expenses.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(expenses.len())
    }
}
