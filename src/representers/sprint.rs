use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use super::SprintWrite;
use crate::error::ValidationError;
use crate::links::{LinkBuilder, Route};
use crate::models::{Sprint, SprintInput};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SprintLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    /// Task collection filtered to this sprint.
    pub tasks: String,
    /// Websocket endpoint of the sprint's real-time channel.
    pub channel: String,
}

/// Wire shape of a sprint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SprintRepresentation {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub end: NaiveDate,
    pub links: SprintLinks,
}

pub struct SprintRepresenter;

impl SprintRepresenter {
    pub fn render(sprint: &Sprint, links: &LinkBuilder) -> SprintRepresentation {
        SprintRepresentation {
            id: sprint.id,
            name: sprint.name.clone(),
            description: sprint.description.clone(),
            end: sprint.end,
            links: SprintLinks {
                self_link: links.reverse(Route::SprintDetail { id: sprint.id }),
                tasks: format!("{}?sprint={}", links.reverse(Route::TaskList), sprint.id),
                channel: links.channel(sprint.id),
            },
        }
    }

    /// Rejects an `end` date in the past when the sprint is new or its end
    /// date is being moved. An unchanged end date always passes, so sprints
    /// that have already finished can still be edited otherwise.
    pub fn validate_end(
        end: NaiveDate,
        existing: Option<&Sprint>,
        today: NaiveDate,
    ) -> Result<NaiveDate, ValidationError> {
        let is_new = existing.is_none();
        let is_changed = existing.map_or(false, |sprint| sprint.end != end);

        if (is_new || is_changed) && end < today {
            return Err(ValidationError::new(
                "end",
                "End date cannot be in the past",
            ));
        }
        Ok(end)
    }

    /// Validates an inbound sprint payload before it is persisted.
    pub fn deserialize(
        input: SprintInput,
        mode: SprintWrite<'_>,
        today: NaiveDate,
    ) -> Result<SprintInput, ValidationError> {
        input.validate()?;

        match input.end {
            Some(end) => {
                Self::validate_end(end, mode.existing(), today)?;
            }
            None if !mode.is_partial() => return Err(ValidationError::required("end")),
            None => {}
        }

        Ok(input)
    }
}
