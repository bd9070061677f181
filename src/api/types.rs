//! Wire types for the LearnIT gamification endpoints

use serde::{Deserialize, Serialize};

use crate::gamification::Badge;

/// Response envelope used by every LearnIT endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /gamification/update-streak` payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakUpdate {
    pub current_streak: u32,
    pub new_badges: Vec<Badge>,
}

/// `POST /gamification/lesson-complete` payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LessonCompletion {
    pub xp_earned: u64,
    #[serde(rename = "totalXP")]
    pub total_xp: u64,
    pub level: u32,
    pub new_badges: Vec<Badge>,
}

/// One row of `GET /gamification/leaderboard`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaderboardEntry {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub xp: u64,
    pub level: u32,
    pub current_streak: u32,
    pub badge_count: u32,
}
