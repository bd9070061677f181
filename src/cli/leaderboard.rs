//! Leaderboard command implementation

use anyhow::{Context, Result};

use learnit::config::Config;

use super::session::open_store;

/// Print the top `limit` entries of the leaderboard
pub async fn leaderboard_command(config: &Config, limit: usize) -> Result<()> {
    let store = open_store(config);
    let entries = store
        .leaderboard()
        .await
        .context("Failed to fetch leaderboard")?;

    if entries.is_empty() {
        println!("Leaderboard is empty.");
        return Ok(());
    }

    println!("Leaderboard:\n");
    for (rank, entry) in entries.iter().take(limit).enumerate() {
        println!(
            "  {:>3}. {:<24} level {:>3}  {:>7} XP  🔥 {}  🏅 {}",
            rank + 1,
            entry.name,
            entry.level,
            entry.xp,
            entry.current_streak,
            entry.badge_count
        );
    }

    Ok(())
}
