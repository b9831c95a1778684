//! Core types and traits for spendlog storage backends.
//!
//! This crate provides the `ExpenseStore` trait and all associated types,
//! enabling pluggable storage implementations in separate crates.

pub mod ids;
pub mod models;
pub mod storage;

// Re-export key types at crate root for convenience
pub use ids::IdGenerator;
pub use models::read::Expense;
pub use models::write::CreateExpenseCommand;
pub use storage::{ExpenseStore, StorageError};
