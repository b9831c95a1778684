use std::sync::Arc;

/// A validated request to record a new expense.
///
/// Holding one of these means the amount is positive and every text field
/// is non-empty; the service's validation layer is the only producer.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateExpenseCommand {
    pub amount: f64,
    pub description: Arc<str>,
    pub category: Arc<str>,
    pub date: Arc<str>,
}
