use std::sync::Arc;

use serde::{Serialize, Serializer};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, UtcOffset};

use super::write::CreateExpenseCommand;

const CREATED_AT_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// A stored expense. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: u64,
    pub amount: f64,
    pub description: Arc<str>,
    pub category: Arc<str>,
    pub date: Arc<str>,
    #[serde(serialize_with = "serialize_created_at")]
    pub created_at: OffsetDateTime,
}

impl Expense {
    pub fn from_command(id: u64, command: &CreateExpenseCommand, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            amount: command.amount,
            description: command.description.clone(),
            category: command.category.clone(),
            date: command.date.clone(),
            created_at,
        }
    }
}

/// `createdAt` as it appears on the wire, e.g. `2024-01-01T12:00:00.000Z`.
fn format_created_at(value: &OffsetDateTime) -> Result<String, time::error::Format> {
    value.to_offset(UtcOffset::UTC).format(CREATED_AT_FORMAT)
}

fn serialize_created_at<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let formatted = format_created_at(value).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}
