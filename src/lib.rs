//! LearnIT - gamification client
//!
//! Keeps a learner's XP, level, streak and badges in sync with the LearnIT
//! backend and turns server-reported awards into short-lived notifications
//! (XP popups and badge-unlock toasts).
//!
//! ## Layers
//!
//! 1. **`api`**: the `GamificationApi` seam and its REST implementation.
//! 2. **`gamification`**: pure level/badge helpers and the session-scoped
//!    `GamificationStore`.
//! 3. **`config`**: `~/.learnit/config.toml` loading.

pub mod api;
pub mod config;
pub mod gamification;

pub use gamification::{Badge, GamificationStats, GamificationStore, StoreState};
