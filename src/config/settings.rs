//! Settings configuration types

use serde::{Deserialize, Serialize};

/// Connection settings for the LearnIT API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL all endpoint paths are appended to
    /// Default: "http://localhost:5000/api"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Session token sent as `Authorization: Bearer <token>`
    ///
    /// If empty, requests are sent unauthenticated.
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_read_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
        }
    }
}

/// Lifetimes of transient gamification notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// How long the "+N XP" popup stays visible
    #[serde(default = "default_xp_popup_ms")]
    pub xp_popup_ms: u64,

    /// How long each badge-unlock toast stays visible
    #[serde(default = "default_badge_toast_ms")]
    pub badge_toast_ms: u64,

    /// Buffered notices per subscriber before slow receivers start lagging
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_xp_popup_ms() -> u64 {
    2000
}

fn default_badge_toast_ms() -> u64 {
    4000
}

fn default_channel_capacity() -> usize {
    64
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            xp_popup_ms: default_xp_popup_ms(),
            badge_toast_ms: default_badge_toast_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}
