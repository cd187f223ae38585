use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::{Directory, TaskWrite};
use crate::error::ValidationError;
use crate::links::{LinkBuilder, Route};
use crate::models::{Sprint, Task, TaskInput, TaskStatus};

lazy_static! {
    // Letters, digits and @/./+/-/_ only.
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_.@+-]+$").unwrap();
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub sprint: Option<String>,
    pub assigned: Option<String>,
}

/// Wire shape of a task.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskRepresentation {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub sprint: Option<Uuid>,
    pub status: TaskStatus,
    pub order: i16,
    pub assigned: Option<String>,
    pub started: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
    pub completed: Option<NaiveDate>,
    pub links: TaskLinks,
    pub status_display: String,
}

/// Validated attributes of a task write, ready to be persisted.
///
/// `None` means the attribute was not part of the payload; the inner `Option`
/// of nullable attributes is the value itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskAttrs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sprint: Option<Option<Sprint>>,
    pub status: Option<TaskStatus>,
    pub order: Option<i16>,
    pub assigned: Option<Option<String>>,
    pub started: Option<Option<NaiveDate>>,
    pub due: Option<Option<NaiveDate>>,
    pub completed: Option<Option<NaiveDate>>,
}

pub struct TaskRepresenter;

impl TaskRepresenter {
    pub fn render(task: &Task, links: &LinkBuilder) -> TaskRepresentation {
        TaskRepresentation {
            id: task.id,
            name: task.name.clone(),
            description: task.description.clone(),
            sprint: task.sprint,
            status: task.status,
            order: task.order,
            assigned: task.assigned.clone(),
            started: task.started,
            due: task.due,
            completed: task.completed,
            links: TaskLinks {
                self_link: links.reverse(Route::TaskDetail { id: task.id }),
                sprint: task
                    .sprint
                    .map(|id| links.reverse(Route::SprintDetail { id })),
                assigned: task
                    .assigned
                    .as_deref()
                    .map(|username| links.reverse(Route::UserDetail { username })),
            },
            status_display: task.status.label().to_string(),
        }
    }

    /// Checks the sprint a persisted task is being saved with.
    ///
    /// Moving a DONE task to another sprint (or to the backlog) is refused
    /// outright. Otherwise the sprint must not have ended yet, whether it is
    /// new or unchanged. The DONE check only applies when the sprint changes:
    /// a DONE task kept in an ended sprint still hits the past-sprint error.
    /// Creates are not checked here.
    pub fn validate_sprint<'a>(
        sprint: Option<&'a Sprint>,
        existing: Option<&Task>,
        today: NaiveDate,
    ) -> Result<Option<&'a Sprint>, ValidationError> {
        let Some(task) = existing else {
            return Ok(sprint);
        };

        let is_changed = sprint.map(|s| s.id) != task.sprint;
        if is_changed && task.status == TaskStatus::Done {
            return Err(ValidationError::new(
                "sprint",
                "Cannot change the sprint of completed Task",
            ));
        }
        if sprint.map_or(false, |s| s.has_ended(today)) {
            return Err(ValidationError::new(
                "sprint",
                "Cannot assign Task to past Sprints",
            ));
        }
        Ok(sprint)
    }

    /// Rules spanning sprint, status and dates. Attributes absent from the
    /// payload count as unset; a missing status counts as NOT_STARTED.
    pub fn validate_cross_fields(attrs: TaskAttrs) -> Result<TaskAttrs, ValidationError> {
        let in_sprint = matches!(attrs.sprint, Some(Some(_)));
        let status = attrs.status.unwrap_or_default();
        let started = attrs.started.flatten();
        let completed = attrs.completed.flatten();

        if !in_sprint && status != TaskStatus::NotStarted {
            return Err(ValidationError::non_field(
                "Backlog tasks must have not started status",
            ));
        }
        if started.is_some() && status == TaskStatus::NotStarted {
            return Err(ValidationError::non_field(
                "Start date can't be set for Not Started task",
            ));
        }
        if completed.is_some() && status != TaskStatus::Done {
            return Err(ValidationError::non_field(
                "Completed date can't be set for incomplete task",
            ));
        }
        Ok(attrs)
    }

    /// Turns an inbound payload into validated attributes.
    ///
    /// Field rules run first, then related records are resolved through
    /// `directory`, then the sprint and cross-field rules apply. The first
    /// failure is returned and nothing should be persisted.
    pub fn deserialize<D: Directory>(
        input: TaskInput,
        mode: TaskWrite<'_>,
        directory: &D,
        today: NaiveDate,
    ) -> Result<TaskAttrs, ValidationError> {
        input.validate()?;

        let name = non_null("name", input.name)?;
        let status = non_null("status", input.status)?;
        let order = non_null("order", input.order)?;

        if name.is_none() && !mode.is_partial() {
            return Err(ValidationError::required("name"));
        }

        if let Some(Some(username)) = &input.assigned {
            if !USERNAME_REGEX.is_match(username) || !directory.user_exists(username) {
                return Err(ValidationError::new(
                    "assigned",
                    format!("Object with username={} does not exist.", username),
                ));
            }
        }

        let sprint = match input.sprint {
            Some(Some(id)) => {
                let sprint = directory.sprint(id).ok_or_else(|| {
                    ValidationError::new(
                        "sprint",
                        format!("Invalid pk \"{}\" - object does not exist.", id),
                    )
                })?;
                Some(Some(sprint))
            }
            Some(None) => Some(None),
            None => None,
        };

        if let Some(candidate) = &sprint {
            Self::validate_sprint(candidate.as_ref(), mode.existing(), today)?;
        }

        Self::validate_cross_fields(TaskAttrs {
            name,
            description: input.description,
            sprint,
            status,
            order,
            assigned: input.assigned,
            started: input.started,
            due: input.due,
            completed: input.completed,
        })
    }
}

/// Rejects an explicit `null` for an attribute that has no null value.
fn non_null<T>(field: &str, value: Option<Option<T>>) -> Result<Option<T>, ValidationError> {
    match value {
        Some(None) => Err(ValidationError::new(field, "This field may not be null.")),
        other => Ok(other.flatten()),
    }
}
