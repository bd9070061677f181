//! CLI command implementations

pub mod init;
pub mod leaderboard;
pub mod lesson;
pub mod level;
pub mod session;
pub mod stats;
pub mod streak;
