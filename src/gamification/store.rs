//! Gamification Store - session-scoped holder of the user's stats
//!
//! The store is the only writer of [`GamificationStats`]. It is created when
//! a user session starts, receives its backend through dependency injection,
//! and is torn down with [`GamificationStore::end_session`].
//!
//! Every network operation returns a `Result` and logs failures; none of them
//! panic or leave the store half-updated.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use super::badges::{Badge, dedup_badges, merge_badges};
use super::events::{EventNotice, TransientEvents};
use super::levels::{LevelProgress, level_for_xp};
use super::models::GamificationStats;
use crate::api::{ApiError, GamificationApi, LeaderboardEntry, LessonCompletion, StreakUpdate};
use crate::config::NotificationSettings;

/// Coarse lifecycle of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// No session, default stats
    Uninitialized,
    /// Session started, first stats fetch in flight
    Loading,
    /// Stats usable (possibly defaults if the fetch failed)
    Ready,
}

struct StoreInner {
    state: StoreState,
    stats: GamificationStats,
    /// Bumped on session end so late responses from an old session are dropped
    generation: u64,
}

/// Main holder of gamification state for one user session
pub struct GamificationStore {
    api: Arc<dyn GamificationApi>,
    inner: Mutex<StoreInner>,
    events: TransientEvents,
}

impl GamificationStore {
    /// Create a store backed by `api`
    pub fn new(api: Arc<dyn GamificationApi>, settings: &NotificationSettings) -> Self {
        Self {
            api,
            inner: Mutex::new(StoreInner {
                state: StoreState::Uninitialized,
                stats: GamificationStats::default(),
                generation: 0,
            }),
            events: TransientEvents::new(settings),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn generation(&self) -> u64 {
        self.lock().generation
    }

    // ========================================
    // SESSION LIFECYCLE
    // ========================================

    /// Rehydrate from the backend after login: fetch stats, then update the streak.
    ///
    /// Failures are logged; the store still ends up `Ready` (with default
    /// stats if the fetch failed). The first error is returned.
    pub async fn start_session(&self) -> Result<(), ApiError> {
        let generation = {
            let mut inner = self.lock();
            inner.state = StoreState::Loading;
            inner.generation
        };
        tracing::info!("[learnit:gamification] Session started, loading stats");

        let stats = self.refresh_stats_in(generation).await;
        if self.generation() != generation {
            tracing::debug!("[learnit:gamification] Session ended during bootstrap, skipping streak update");
            return stats.map(|_| ());
        }
        let streak = self.update_streak_in(generation).await;
        stats.and(streak).map(|_| ())
    }

    /// Tear down: cancel pending notifications and reset to defaults
    pub fn end_session(&self) {
        {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.stats = GamificationStats::default();
            inner.state = StoreState::Uninitialized;
        }
        let cancelled = self.events.cancel_all();
        tracing::info!(
            "[learnit:gamification] Session ended ({} pending notifications cancelled)",
            cancelled
        );
    }

    // ========================================
    // OPERATIONS
    // ========================================

    /// Optimistically award XP and announce it (and any new badges).
    ///
    /// The level is estimated locally; the next server round trip overrides it.
    pub fn add_xp(&self, amount: u64, new_badges: Vec<Badge>) -> LevelProgress {
        let badges = dedup_badges(new_badges);
        let progress = {
            let mut inner = self.lock();
            inner.stats.xp = inner.stats.xp.saturating_add(amount);
            inner.stats.level = level_for_xp(inner.stats.xp);
            merge_badges(&mut inner.stats.badges, badges.clone());
            inner.stats.level_progress()
        };

        tracing::debug!(
            "[learnit:gamification] +{} XP (now {} XP, level {})",
            amount,
            progress.xp,
            progress.level
        );
        self.announce(amount, badges);
        progress
    }

    /// Report a finished lesson and merge the server's authoritative totals.
    ///
    /// On failure nothing is changed locally.
    pub async fn record_lesson_complete(&self) -> Result<LessonCompletion, ApiError> {
        let generation = self.generation();
        let completion = self.api.lesson_complete().await.inspect_err(|e| {
            tracing::warn!("[learnit:gamification] Failed to record lesson completion: {}", e);
        })?;

        let badges = dedup_badges(completion.new_badges.clone());
        {
            let mut inner = self.lock();
            if inner.generation != generation {
                tracing::debug!("[learnit:gamification] Dropping lesson completion from ended session");
                return Ok(completion);
            }
            inner.stats.xp = completion.total_xp;
            inner.stats.level = if completion.level == 0 {
                level_for_xp(completion.total_xp)
            } else {
                completion.level
            };
            inner.stats.total_lessons_completed =
                inner.stats.total_lessons_completed.saturating_add(1);
            merge_badges(&mut inner.stats.badges, badges.clone());
        }

        self.announce(completion.xp_earned, badges);
        Ok(completion)
    }

    /// Ask the backend to count today's activity and merge the new streak
    pub async fn update_streak(&self) -> Result<StreakUpdate, ApiError> {
        self.update_streak_in(self.generation()).await
    }

    /// Streak update whose result only applies while `generation` is current
    async fn update_streak_in(&self, generation: u64) -> Result<StreakUpdate, ApiError> {
        let update = self.api.update_streak().await.inspect_err(|e| {
            tracing::warn!("[learnit:gamification] Failed to update streak: {}", e);
        })?;

        let badges = dedup_badges(update.new_badges.clone());
        {
            let mut inner = self.lock();
            if inner.generation != generation {
                tracing::debug!("[learnit:gamification] Dropping streak update from ended session");
                return Ok(update);
            }
            inner.stats.current_streak = update.current_streak;
            inner.stats.longest_streak = inner.stats.longest_streak.max(update.current_streak);
            merge_badges(&mut inner.stats.badges, badges.clone());
        }

        self.announce(0, badges);
        Ok(update)
    }

    /// Re-fetch stats from the backend, replacing local state on success
    pub async fn refresh_stats(&self) -> Result<GamificationStats, ApiError> {
        self.refresh_stats_in(self.generation()).await
    }

    async fn refresh_stats_in(&self, generation: u64) -> Result<GamificationStats, ApiError> {
        let result = self.api.fetch_stats().await;

        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!("[learnit:gamification] Dropping stats from ended session");
            return result;
        }

        match result {
            Ok(stats) => {
                let stats = stats.normalized();
                inner.stats = stats.clone();
                inner.state = StoreState::Ready;
                tracing::debug!(
                    "[learnit:gamification] Stats loaded: {} XP, level {}, {} badges",
                    stats.xp,
                    stats.level,
                    stats.badges.len()
                );
                Ok(stats)
            }
            Err(e) => {
                tracing::warn!("[learnit:gamification] Failed to fetch stats: {}", e);
                if inner.state == StoreState::Loading {
                    inner.state = StoreState::Ready;
                }
                Err(e)
            }
        }
    }

    /// Ranked public stats of other users. Not stored.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ApiError> {
        self.api.leaderboard().await.inspect_err(|e| {
            tracing::warn!("[learnit:gamification] Failed to fetch leaderboard: {}", e);
        })
    }

    fn announce(&self, xp: u64, badges: Vec<Badge>) {
        if xp > 0 {
            self.events.show_xp_gain(xp);
        }
        for badge in badges {
            tracing::info!("[learnit:gamification] Badge unlocked: {} ({})", badge.name, badge.id);
            self.events.show_badge_unlock(badge);
        }
    }

    // ========================================
    // READ ACCESS
    // ========================================

    /// Snapshot of the current stats
    pub fn stats(&self) -> GamificationStats {
        self.lock().stats.clone()
    }

    pub fn state(&self) -> StoreState {
        self.lock().state
    }

    /// XP bar view derived from current XP
    pub fn level_progress(&self) -> LevelProgress {
        self.lock().stats.level_progress()
    }

    /// Amount on the XP popup, if visible
    pub fn xp_popup(&self) -> Option<u64> {
        self.events.xp_popup()
    }

    /// Badges currently shown as unlock toasts
    pub fn badge_toasts(&self) -> Vec<Badge> {
        self.events.badge_toasts()
    }

    /// Number of notification timers still pending
    pub fn pending_notifications(&self) -> usize {
        self.events.pending_timers()
    }

    /// Subscribe to transient event notices
    pub fn subscribe(&self) -> broadcast::Receiver<EventNotice> {
        self.events.subscribe()
    }
}
