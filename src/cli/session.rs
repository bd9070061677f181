//! Shared helpers for commands that talk to the LearnIT API

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::broadcast;

use learnit::api::HttpGamificationApi;
use learnit::config::Config;
use learnit::gamification::{EventNotice, GamificationStats, GamificationStore, TransientEvent};

/// Load `--config` if given, otherwise the global config
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::load(),
    }
}

/// Build a store on top of the REST client
pub fn open_store(config: &Config) -> GamificationStore {
    let api = Arc::new(HttpGamificationApi::new(&config.api));
    GamificationStore::new(api, &config.notifications)
}

/// Print every notification shown so far
pub fn print_notices(rx: &mut broadcast::Receiver<EventNotice>) {
    while let Ok(notice) = rx.try_recv() {
        let EventNotice::Shown(event) = notice else {
            continue;
        };
        match event {
            TransientEvent::XpGain { amount, .. } => println!("  ✨ +{} XP", amount),
            TransientEvent::BadgeUnlocked { badge, .. } => {
                println!("  {} Badge unlocked: {}", badge.icon, badge.name);
                if !badge.description.is_empty() {
                    println!("     {}", badge.description);
                }
            }
        }
    }
}

/// Print the stats block shared by several commands
pub fn print_stats(stats: &GamificationStats) {
    let progress = stats.level_progress();
    println!("Level {} ({} XP)", stats.level, stats.xp);
    println!(
        "  Progress: {:.0}% ({} XP to level {})",
        progress.progress_percent,
        progress.xp_to_next(),
        progress.level + 1
    );
    println!(
        "  Streak: {} day(s) (longest {})",
        stats.current_streak, stats.longest_streak
    );
    println!(
        "  Lessons completed: {}, quizzes taken: {}",
        stats.total_lessons_completed, stats.total_quizzes_taken
    );

    if stats.badges.is_empty() {
        println!("  Badges: none yet");
    } else {
        println!("  Badges ({}):", stats.badges.len());
        for badge in &stats.badges {
            println!("    {} {} - {}", badge.icon, badge.name, badge.description);
        }
    }
}
