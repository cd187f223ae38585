use std::env;

use crate::error::AppError;

pub const DEFAULT_CHANNEL_SERVER: &str = "localhost:8080";
pub const DEFAULT_API_ROOT: &str = "/api";

/// Settings the representers need to build links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host (and optional port) of the websocket server backing sprint channels.
    pub channel_server_host: String,
    /// Use `wss://` rather than `ws://` for channel links.
    pub secure_channel: bool,
    /// Path prefix every API route lives under, without a trailing slash.
    pub api_root: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_server_host: DEFAULT_CHANNEL_SERVER.to_string(),
            secure_channel: false,
            api_root: DEFAULT_API_ROOT.to_string(),
        }
    }
}

impl Config {
    /// Reads `WATERCOOLER_SERVER`, `WATERCOOLER_SECURE` and `API_ROOT`, after
    /// loading a `.env` file if one is present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let channel_server_host = env::var("WATERCOOLER_SERVER").unwrap_or_else(|_| {
            log::warn!(
                "WATERCOOLER_SERVER not set, falling back to {}",
                DEFAULT_CHANNEL_SERVER
            );
            DEFAULT_CHANNEL_SERVER.to_string()
        });

        let secure_channel = match env::var("WATERCOOLER_SECURE") {
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::InternalServerError(format!(
                    "WATERCOOLER_SECURE must be a boolean, got {:?}",
                    raw
                ))
            })?,
            Err(_) => false,
        };

        let api_root = env::var("API_ROOT")
            .map(|root| normalize_api_root(&root))
            .unwrap_or_else(|_| DEFAULT_API_ROOT.to_string());

        Ok(Self {
            channel_server_host,
            secure_channel,
            api_root,
        })
    }

    pub fn channel_scheme(&self) -> &'static str {
        if self.secure_channel {
            "wss"
        } else {
            "ws"
        }
    }
}

/// Leading `/`, no trailing `/`; an empty root stays empty.
fn normalize_api_root(raw: &str) -> String {
    let root = raw.trim().trim_matches('/');
    if root.is_empty() {
        String::new()
    } else {
        format!("/{}", root)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Some(false),
        "1" | "true" | "yes" | "on" => Some(true),
        _ => None,
    }
}
