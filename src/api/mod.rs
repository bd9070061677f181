//! LearnIT REST API access
//!
//! The store only talks to the backend through [`GamificationApi`], so tests
//! and alternative transports can be injected in place of [`HttpGamificationApi`].

mod client;
mod error;
mod types;

pub use client::HttpGamificationApi;
pub use error::ApiError;
pub use types::{Envelope, LeaderboardEntry, LessonCompletion, StreakUpdate};

use async_trait::async_trait;

use crate::gamification::GamificationStats;

pub const STATS_PATH: &str = "/gamification/stats";
pub const UPDATE_STREAK_PATH: &str = "/gamification/update-streak";
pub const LESSON_COMPLETE_PATH: &str = "/gamification/lesson-complete";
pub const LEADERBOARD_PATH: &str = "/gamification/leaderboard";

/// Backend operations the gamification store depends on
#[async_trait]
pub trait GamificationApi: Send + Sync {
    /// `GET /gamification/stats`
    async fn fetch_stats(&self) -> Result<GamificationStats, ApiError>;

    /// `POST /gamification/update-streak`
    async fn update_streak(&self) -> Result<StreakUpdate, ApiError>;

    /// `POST /gamification/lesson-complete`
    async fn lesson_complete(&self) -> Result<LessonCompletion, ApiError>;

    /// `GET /gamification/leaderboard`
    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError>;
}
