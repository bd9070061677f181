//! Gamification data models

use serde::{Deserialize, Serialize};

use super::badges::{Badge, dedup_badges};
use super::levels::LevelProgress;

/// Per-user gamification stats as reported by `GET /gamification/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GamificationStats {
    pub xp: u64,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Unlock order
    pub badges: Vec<Badge>,
    pub total_lessons_completed: u32,
    pub total_quizzes_taken: u32,
}

impl Default for GamificationStats {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            current_streak: 0,
            longest_streak: 0,
            badges: Vec::new(),
            total_lessons_completed: 0,
            total_quizzes_taken: 0,
        }
    }
}

impl GamificationStats {
    /// Normalize a server payload before it enters the store
    pub fn normalized(mut self) -> Self {
        self.badges = dedup_badges(std::mem::take(&mut self.badges));
        self.level = self.level.max(1);
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self
    }

    /// Level view computed from XP
    pub fn level_progress(&self) -> LevelProgress {
        LevelProgress::for_xp(self.xp)
    }
}
