//! Level command implementation

use learnit::gamification::LevelProgress;

/// Print the level view for an XP amount
pub fn level_command(xp: u64) {
    let progress = LevelProgress::for_xp(xp);
    println!("{} XP = level {}", progress.xp, progress.level);
    println!(
        "  Level {} starts at {} XP, level {} at {} XP",
        progress.level,
        progress.current_level_xp,
        progress.level + 1,
        progress.next_level_xp
    );
    println!(
        "  Progress: {:.1}% ({} XP to go)",
        progress.progress_percent,
        progress.xp_to_next()
    );
}
