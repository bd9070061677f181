//! HTTP client for the LearnIT gamification endpoints.
//!
//! Uses a blocking `ureq` agent; async callers are moved onto Tokio's
//! blocking pool so the runtime is never stalled by network I/O.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::types::{Envelope, LeaderboardEntry, LessonCompletion, StreakUpdate};
use super::{
    ApiError, GamificationApi, LEADERBOARD_PATH, LESSON_COMPLETE_PATH, STATS_PATH,
    UPDATE_STREAK_PATH,
};
use crate::config::ApiSettings;
use crate::gamification::GamificationStats;

/// REST implementation of [`GamificationApi`]
#[derive(Clone)]
pub struct HttpGamificationApi {
    base_url: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl HttpGamificationApi {
    /// Create a client from the `[api]` settings
    pub fn new(settings: &ApiSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(settings.connect_timeout_secs))
            .timeout_read(Duration::from_secs(settings.read_timeout_secs))
            .build();

        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: Some(settings.token.clone()).filter(|t| !t.trim().is_empty()),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, mut req: ureq::Request) -> ureq::Request {
        if let Some(token) = &self.token {
            req = req.set("Authorization", &format!("Bearer {token}"));
        }
        req
    }

    fn get_blocking<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, ApiError> {
        tracing::debug!("[learnit:api] GET {}", endpoint);
        let resp = self
            .with_auth(self.agent.get(&self.url(endpoint)))
            .call()
            .map_err(|e| map_ureq_error(endpoint, e))?;
        read_envelope(endpoint, resp)
    }

    fn post_blocking<T: DeserializeOwned>(&self, endpoint: &'static str) -> Result<T, ApiError> {
        tracing::debug!("[learnit:api] POST {}", endpoint);
        let resp = self
            .with_auth(self.agent.post(&self.url(endpoint)))
            .set("Content-Type", "application/json")
            .send_string("{}")
            .map_err(|e| map_ureq_error(endpoint, e))?;
        read_envelope(endpoint, resp)
    }

    async fn get<T>(&self, endpoint: &'static str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.get_blocking(endpoint)).await?
    }

    async fn post<T>(&self, endpoint: &'static str) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        tokio::task::spawn_blocking(move || client.post_blocking(endpoint)).await?
    }
}

#[async_trait]
impl GamificationApi for HttpGamificationApi {
    async fn fetch_stats(&self) -> Result<GamificationStats, ApiError> {
        self.get(STATS_PATH).await
    }

    async fn update_streak(&self) -> Result<StreakUpdate, ApiError> {
        self.post(UPDATE_STREAK_PATH).await
    }

    async fn lesson_complete(&self) -> Result<LessonCompletion, ApiError> {
        self.post(LESSON_COMPLETE_PATH).await
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.get(LEADERBOARD_PATH).await
    }
}

fn map_ureq_error(endpoint: &'static str, err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, resp) => {
            let body = resp.into_string().unwrap_or_default();
            ApiError::Status {
                endpoint,
                status,
                message: error_message(&body),
            }
        }
        ureq::Error::Transport(transport) => ApiError::Transport {
            endpoint,
            message: transport.to_string(),
        },
    }
}

fn read_envelope<T: DeserializeOwned>(
    endpoint: &'static str,
    resp: ureq::Response,
) -> Result<T, ApiError> {
    let body = resp.into_string().map_err(|e| ApiError::Transport {
        endpoint,
        message: format!("Failed to read response body: {e}"),
    })?;
    parse_envelope(endpoint, &body)
}

/// Unwrap `{ success, data, message }`, treating `success: false` as an error
fn parse_envelope<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T, ApiError> {
    let envelope: Envelope<T> =
        serde_json::from_str(body).map_err(|source| ApiError::Decode { endpoint, source })?;

    if !envelope.success {
        return Err(ApiError::Rejected {
            endpoint,
            message: envelope
                .message
                .unwrap_or_else(|| "success=false".to_string()),
        });
    }

    envelope.data.ok_or_else(|| ApiError::Rejected {
        endpoint,
        message: "response has no data".to_string(),
    })
}

/// Best-effort human readable message from an error body
fn error_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "empty response".to_string();
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| body.to_string())
}
