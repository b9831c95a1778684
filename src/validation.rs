use std::sync::Arc;

use serde_json::Value;
use spendlog_core::CreateExpenseCommand;
use thiserror::Error;

/// Checked in this order; the first missing one is reported.
pub const REQUIRED_FIELDS: [&str; 4] = ["amount", "description", "category", "date"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Missing required field: '{0}'")]
    MissingField(&'static str),
    #[error("Amount must be a positive number.")]
    InvalidAmount,
    #[error("Field '{0}' must be a string.")]
    NotAString(&'static str),
}

impl ValidationError {
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::InvalidAmount => "invalid_amount",
            ValidationError::NotAString(_) => "invalid_type",
        }
    }
}

/// Turns a decoded request body into a command.
///
/// Presence is checked for every field before any type check, so a body
/// with a bad amount and no date reports the missing date.
pub fn validate_expense(body: &Value) -> Result<CreateExpenseCommand, ValidationError> {
    for field in REQUIRED_FIELDS {
        if !body.get(field).map_or(false, is_truthy) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let amount = match body["amount"].as_f64() {
        Some(amount) if amount > 0.0 => amount,
        _ => return Err(ValidationError::InvalidAmount),
    };

    Ok(CreateExpenseCommand {
        amount,
        description: text_field(body, "description")?,
        category: text_field(body, "category")?,
        date: text_field(body, "date")?,
    })
}

fn text_field(body: &Value, field: &'static str) -> Result<Arc<str>, ValidationError> {
    body[field]
        .as_str()
        .map(Arc::from)
        .ok_or(ValidationError::NotAString(field))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid() -> Value {
        json!({"amount": 42.5, "description": "Lunch", "category": "Food", "date": "2024-01-01"})
    }

    #[test]
    fn test_valid_body() {
        let command = validate_expense(&valid()).unwrap();
        assert_eq!(command.amount, 42.5);
        assert_eq!(&*command.description, "Lunch");
        assert_eq!(&*command.category, "Food");
        assert_eq!(&*command.date, "2024-01-01");
    }

    #[test]
    fn test_integer_amount_accepted() {
        let mut body = valid();
        body["amount"] = json!(12);
        assert_eq!(validate_expense(&body).unwrap().amount, 12.0);
    }

    #[test]
    fn test_each_missing_field_is_named() {
        for field in REQUIRED_FIELDS {
            let mut body = valid();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(validate_expense(&body), Err(ValidationError::MissingField(field)));
        }
    }

    #[test]
    fn test_first_missing_field_wins() {
        let body = json!({"description": "Lunch"});
        assert_eq!(validate_expense(&body), Err(ValidationError::MissingField("amount")));

        let body = json!({"amount": 5, "date": "2024-01-01"});
        assert_eq!(validate_expense(&body), Err(ValidationError::MissingField("description")));
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            let mut body = valid();
            body["category"] = falsy.clone();
            assert_eq!(validate_expense(&body), Err(ValidationError::MissingField("category")), "{}", falsy);
        }

        let mut body = valid();
        body["amount"] = json!(0);
        assert_eq!(validate_expense(&body), Err(ValidationError::MissingField("amount")));
    }

    #[test]
    fn test_presence_checked_before_amount() {
        let body = json!({"amount": -3, "description": "Lunch", "category": "Food"});
        assert_eq!(validate_expense(&body), Err(ValidationError::MissingField("date")));
    }

    #[test]
    fn test_bad_amounts() {
        for amount in [json!(-1), json!(-0.01), json!("42.5"), json!(true), json!([1]), json!({"v": 1})] {
            let mut body = valid();
            body["amount"] = amount.clone();
            assert_eq!(validate_expense(&body), Err(ValidationError::InvalidAmount), "{}", amount);
        }
    }

    #[test]
    fn test_non_string_text_fields() {
        let mut body = valid();
        body["description"] = json!(123);
        body["date"] = json!(20240101);
        assert_eq!(validate_expense(&body), Err(ValidationError::NotAString("description")));
    }

    #[test]
    fn test_non_object_bodies() {
        for body in [json!([1, 2]), json!("text"), json!(7), json!(null), json!({})] {
            assert_eq!(validate_expense(&body), Err(ValidationError::MissingField("amount")), "{}", body);
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::MissingField("date").to_string(), "Missing required field: 'date'");
        assert_eq!(ValidationError::InvalidAmount.to_string(), "Amount must be a positive number.");
        assert_eq!(ValidationError::NotAString("category").to_string(), "Field 'category' must be a string.");
    }
}
