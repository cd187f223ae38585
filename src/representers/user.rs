use serde::Serialize;

use crate::links::{LinkBuilder, Route};
use crate::models::User;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    /// Task collection filtered to this user's assignments.
    pub tasks: String,
}

/// Wire shape of a user.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserRepresentation {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub links: UserLinks,
}

/// Read-only: users are never written through the API.
pub struct UserRepresenter;

impl UserRepresenter {
    pub fn render(user: &User, links: &LinkBuilder) -> UserRepresentation {
        let username = user.username.as_str();
        UserRepresentation {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name(),
            is_active: user.is_active,
            links: UserLinks {
                self_link: links.reverse(Route::UserDetail { username }),
                tasks: format!("{}?assigned={}", links.reverse(Route::TaskList), username),
            },
        }
    }
}
