use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use super::nullable;

/// Represents the status of a task.
/// Travels on the wire as its integer code.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    NotStarted = 1,
    /// Task is currently being worked on.
    InProgress = 2,
    /// Task is implemented and being verified.
    Testing = 3,
    /// Task is completed.
    Done = 4,
}

impl TaskStatus {
    /// Human readable label, as shown in `status_display`.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Testing => "Testing",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<TaskStatus> for u8 {
    fn from(status: TaskStatus) -> u8 {
        status as u8
    }
}

impl TryFrom<u8> for TaskStatus {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(TaskStatus::NotStarted),
            2 => Ok(TaskStatus::InProgress),
            3 => Ok(TaskStatus::Testing),
            4 => Ok(TaskStatus::Done),
            other => Err(format!("\"{}\" is not a valid choice.", other)),
        }
    }
}

/// Represents a task as handed over by the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Sprint the task is planned into; `None` for backlog tasks.
    pub sprint: Option<Uuid>,
    pub status: TaskStatus,
    /// Position within its sprint or the backlog.
    pub order: i16,
    /// Username of the assignee.
    pub assigned: Option<String>,
    pub started: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
    pub completed: Option<NaiveDate>,
}

/// Inbound payload for creating or updating a task.
///
/// The outer `Option` of each wrapped field records whether the key was
/// present at all, the inner one whether it was `null`. `name`, `status` and
/// `order` are not nullable; a `null` there is kept so the representer can
/// reject it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct TaskInput {
    /// Must be between 1 and 100 characters when provided.
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters."))]
    pub name: Option<Option<String>>,

    pub description: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub sprint: Option<Option<Uuid>>,

    #[serde(default, deserialize_with = "nullable")]
    pub status: Option<Option<TaskStatus>>,

    #[serde(default, deserialize_with = "nullable")]
    pub order: Option<Option<i16>>,

    #[serde(default, deserialize_with = "nullable")]
    pub assigned: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub started: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "nullable")]
    pub due: Option<Option<NaiveDate>>,

    #[serde(default, deserialize_with = "nullable")]
    pub completed: Option<Option<NaiveDate>>,
}
