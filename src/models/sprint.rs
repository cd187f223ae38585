use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A time-boxed iteration that tasks are planned into.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprint {
    /// Opaque identifier.
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Last day of the sprint.
    pub end: NaiveDate,
}

impl Sprint {
    /// Whether the sprint ended before `today`.
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        self.end < today
    }
}

/// Inbound payload for creating or updating a sprint.
///
/// Every field is optional so the same type serves partial updates; whether a
/// missing field is an error is decided by the representer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct SprintInput {
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub name: Option<String>,

    pub description: Option<String>,

    pub end: Option<NaiveDate>,
}
