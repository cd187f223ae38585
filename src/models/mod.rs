pub mod sprint;
pub mod task;
pub mod user;

pub use sprint::{Sprint, SprintInput};
pub use task::{Task, TaskInput, TaskStatus};
pub use user::User;

use serde::{Deserialize, Deserializer};

/// Deserializes a field that may be missing, `null`, or set.
///
/// Used with `#[serde(default)]`: a missing key stays `None`, an explicit
/// `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
