//! Lesson-complete command implementation

use anyhow::{Context, Result};

use learnit::config::Config;

use super::session::{open_store, print_notices};

/// Record a completed lesson and print the award
pub async fn lesson_complete_command(config: &Config) -> Result<()> {
    let store = open_store(config);
    let mut rx = store.subscribe();

    // stats are best effort, the completion call is what matters here
    let _ = store.refresh_stats().await;

    let completion = store
        .record_lesson_complete()
        .await
        .context("Failed to record lesson completion")?;

    println!("Lesson complete!");
    print_notices(&mut rx);

    let stats = store.stats();
    println!(
        "Total: {} XP, level {} ({} lessons completed)",
        completion.total_xp, stats.level, stats.total_lessons_completed
    );

    store.end_session();
    Ok(())
}
