//! Absolute URL construction for embedded hypermedia links.

use actix_web::HttpRequest;
use uuid::Uuid;

use crate::config::Config;

/// Named API routes and the parameters that identify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    UserDetail { username: &'a str },
    SprintDetail { id: Uuid },
    TaskDetail { id: Uuid },
    TaskList,
}

impl Route<'_> {
    fn path(&self, api_root: &str) -> String {
        match self {
            Route::UserDetail { username } => format!("{}/users/{}/", api_root, username),
            Route::SprintDetail { id } => format!("{}/sprints/{}/", api_root, id),
            Route::TaskDetail { id } => format!("{}/tasks/{}/", api_root, id),
            Route::TaskList => format!("{}/tasks/", api_root),
        }
    }
}

/// Reverses routes into absolute URLs for one request.
///
/// Built once per request, from the request's scheme and host plus the
/// read-only `Config`, then handed to every `render` call.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    base_url: String,
    api_root: String,
    channel_scheme: &'static str,
    channel_server_host: String,
}

impl LinkBuilder {
    /// `base_url` is `scheme://host[:port]`; a trailing slash is ignored.
    pub fn new(base_url: impl Into<String>, config: &Config) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_root: config.api_root.clone(),
            channel_scheme: config.channel_scheme(),
            channel_server_host: config.channel_server_host.clone(),
        }
    }

    /// Takes scheme and host from the connection info of `req`, which honours
    /// `Forwarded`/`X-Forwarded-*` headers.
    pub fn from_request(req: &HttpRequest, config: &Config) -> Self {
        let info = req.connection_info();
        Self::new(format!("{}://{}", info.scheme(), info.host()), config)
    }

    pub fn reverse(&self, route: Route<'_>) -> String {
        format!("{}{}", self.base_url, route.path(&self.api_root))
    }

    /// Websocket endpoint of the real-time channel for a sprint.
    pub fn channel(&self, sprint_id: Uuid) -> String {
        format!(
            "{}://{}/{}",
            self.channel_scheme, self.channel_server_host, sprint_id
        )
    }
}
