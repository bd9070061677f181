//! Shared test utilities for gamification tests
#![allow(dead_code)]

use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use tiny_http::{Header, Response, Server};

use learnit::api::{ApiError, GamificationApi, LeaderboardEntry, LessonCompletion, StreakUpdate};
use learnit::gamification::{Badge, GamificationStats};

/// In-memory backend. `None` responses fail with a transport error.
#[derive(Default)]
pub struct MockApi {
    pub stats: Mutex<Option<GamificationStats>>,
    pub streak: Mutex<Option<StreakUpdate>>,
    pub completion: Mutex<Option<LessonCompletion>>,
    pub leaderboard: Mutex<Option<Vec<LeaderboardEntry>>>,
    /// Artificial latency applied to every call
    pub delay: Duration,
    pub calls: Mutex<Vec<&'static str>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(self, stats: GamificationStats) -> Self {
        *self.stats.lock().unwrap() = Some(stats);
        self
    }

    pub fn with_streak(self, streak: StreakUpdate) -> Self {
        *self.streak.lock().unwrap() = Some(streak);
        self
    }

    pub fn with_completion(self, completion: LessonCompletion) -> Self {
        *self.completion.lock().unwrap() = Some(completion);
        self
    }

    pub fn with_leaderboard(self, entries: Vec<LeaderboardEntry>) -> Self {
        *self.leaderboard.lock().unwrap() = Some(entries);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond<T: Clone>(
        &self,
        endpoint: &'static str,
        slot: &Mutex<Option<T>>,
    ) -> Result<T, ApiError> {
        self.calls.lock().unwrap().push(endpoint);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let value = slot.lock().unwrap().clone();
        value.ok_or(ApiError::Transport {
            endpoint,
            message: "connection refused".to_string(),
        })
    }
}

#[async_trait]
impl GamificationApi for MockApi {
    async fn fetch_stats(&self) -> Result<GamificationStats, ApiError> {
        self.respond("stats", &self.stats).await
    }

    async fn update_streak(&self) -> Result<StreakUpdate, ApiError> {
        self.respond("update-streak", &self.streak).await
    }

    async fn lesson_complete(&self) -> Result<LessonCompletion, ApiError> {
        self.respond("lesson-complete", &self.completion).await
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.respond("leaderboard", &self.leaderboard).await
    }
}

pub fn badge(id: &str) -> Badge {
    Badge::new(id, format!("Badge {id}"), format!("Unlocked {id}"), "🏅")
}

/// A request seen by the fake HTTP backend
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
}

/// Local HTTP backend answering every request with a canned route table.
///
/// Serves `expected_requests` requests and then stops; join the handle to
/// get what it saw.
pub fn spawn_backend(
    routes: Vec<(&'static str, &'static str, u16, String)>,
    expected_requests: usize,
) -> (String, JoinHandle<Vec<SeenRequest>>) {
    let server = Server::http("127.0.0.1:0").expect("Failed to bind test server");
    let addr = server
        .server_addr()
        .to_ip()
        .expect("Test server has no IP address");

    let handle = std::thread::spawn(move || {
        let mut seen = Vec::new();
        for _ in 0..expected_requests {
            let Ok(request) = server.recv() else {
                break;
            };

            let method = request.method().to_string();
            let url = request.url().to_string();
            let authorization = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.to_string());

            let (status, body) = routes
                .iter()
                .find(|(m, path, _, _)| *m == method && url.ends_with(path))
                .map(|(_, _, status, body)| (*status, body.clone()))
                .unwrap_or((404, r#"{"success":false,"message":"not found"}"#.to_string()));

            let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                .expect("valid header");
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);

            seen.push(SeenRequest {
                method,
                url,
                authorization,
            });
        }
        seen
    });

    (format!("http://{addr}/api"), handle)
}
