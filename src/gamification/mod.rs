//! Gamification system: XP, Levels, Streaks and Badges
//!
//! Mirrors the LearnIT backend's gamification state on the client side.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐   inject   ┌───────────────────┐
//! │ GamificationApi  │ ─────────▶ │ GamificationStore │ ──▶ stats snapshots
//! │ (REST / mock)    │            │  levels · badges  │
//! └──────────────────┘            └─────────┬─────────┘
//!                                           ▼
//!                                  TransientEvents ──▶ subscribers
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let api = Arc::new(HttpGamificationApi::new(&config.api));
//! let store = GamificationStore::new(api, &config.notifications);
//! store.start_session().await?;
//!
//! let completion = store.record_lesson_complete().await?;
//! println!("level {}", store.stats().level);
//! ```

mod badges;
mod events;
mod levels;
mod models;
mod store;

pub use badges::{Badge, dedup_badges, merge_badges};
pub use events::{EventId, EventNotice, TransientEvent, TransientEvents};
pub use levels::{LevelProgress, level_for_xp, progress_to_next_level, xp_for_level};
pub use models::GamificationStats;
pub use store::{GamificationStore, StoreState};
