//! Conversion between internal records and their wire representations.
//!
//! Each representer renders one record type into a serializable struct that
//! carries hypermedia links, and (for sprints and tasks) turns an inbound
//! payload into validated attributes. Rendering and validation are pure: the
//! current date and a [`LinkBuilder`](crate::links::LinkBuilder) are always
//! passed in by the caller.

pub mod sprint;
pub mod task;
pub mod user;

pub use sprint::{SprintLinks, SprintRepresentation, SprintRepresenter};
pub use task::{TaskAttrs, TaskLinks, TaskRepresentation, TaskRepresenter};
pub use user::{UserLinks, UserRepresentation, UserRepresenter};

use uuid::Uuid;

use crate::models::{Sprint, Task};

/// Resolves related records referenced by an inbound payload.
///
/// Implemented by whatever owns persistence; this crate only reads through it.
pub trait Directory {
    fn sprint(&self, id: Uuid) -> Option<Sprint>;
    fn user_exists(&self, username: &str) -> bool;
}

/// What a write is about to do to a record.
#[derive(Debug)]
pub enum WriteMode<'a, T> {
    Create,
    /// Full replacement: required fields must be supplied again.
    Update { existing: &'a T },
    /// Only the supplied fields change.
    PartialUpdate { existing: &'a T },
}

impl<T> Clone for WriteMode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WriteMode<'_, T> {}

impl<'a, T> WriteMode<'a, T> {
    pub fn existing(&self) -> Option<&'a T> {
        match *self {
            WriteMode::Create => None,
            WriteMode::Update { existing } | WriteMode::PartialUpdate { existing } => {
                Some(existing)
            }
        }
    }

    pub fn is_partial(&self) -> bool {
        matches!(self, WriteMode::PartialUpdate { .. })
    }
}

pub type TaskWrite<'a> = WriteMode<'a, Task>;
pub type SprintWrite<'a> = WriteMode<'a, Sprint>;
