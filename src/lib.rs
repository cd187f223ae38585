#![doc = "The `sprintboard` library crate."]
#![doc = ""]
#![doc = "Renders users, sprints and tasks into their JSON representations, complete with"]
#![doc = "hypermedia links, and validates inbound sprint and task payloads against the"]
#![doc = "board's rules before they reach persistence."]

pub mod config;
pub mod error;
pub mod links;
pub mod models;
pub mod representers;

pub use crate::config::Config;
pub use crate::error::{AppError, ValidationError};
pub use crate::links::{LinkBuilder, Route};
