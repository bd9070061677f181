//! Streak command implementation

use anyhow::{Context, Result};

use learnit::config::Config;

use super::session::{open_store, print_notices};

pub async fn streak_command(config: &Config) -> Result<()> {
    let store = open_store(config);
    let mut rx = store.subscribe();

    let update = store
        .update_streak()
        .await
        .context("Failed to update streak")?;

    println!("🔥 Current streak: {} day(s)", update.current_streak);
    print_notices(&mut rx);

    store.end_session();
    Ok(())
}
