//! XP and Level system
//!
//! Levels follow a square-root curve: `level = floor(sqrt(xp / 100)) + 1`,
//! so level `L` starts at `(L - 1)^2 * 100` XP.

use serde::{Deserialize, Serialize};

/// XP per curve unit
const XP_PER_UNIT: u64 = 100;

/// Calculate the level for the given XP
pub fn level_for_xp(xp: u64) -> u32 {
    // floor(sqrt(xp / 100)) == isqrt(floor(xp / 100)) for integers
    let level = (xp / XP_PER_UNIT).isqrt() + 1;
    u32::try_from(level).unwrap_or(u32::MAX)
}

/// XP at which the given level starts (level 0 is treated as level 1)
pub fn xp_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    steps.saturating_mul(steps).saturating_mul(XP_PER_UNIT)
}

/// Percentage (0.0 - 100.0) of the way from the current level to the next
pub fn progress_to_next_level(xp: u64) -> f64 {
    let level = level_for_xp(xp);
    let current = xp_for_level(level);
    let next = xp_for_level(level.saturating_add(1));

    if next <= current {
        return 100.0;
    }

    let percent = 100.0 * (xp.saturating_sub(current)) as f64 / (next - current) as f64;
    percent.clamp(0.0, 100.0)
}

/// Level view for an XP bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    pub xp: u64,
    pub level: u32,
    /// XP at which the current level started
    pub current_level_xp: u64,
    /// XP at which the next level starts
    pub next_level_xp: u64,
    pub progress_percent: f64,
}

impl LevelProgress {
    /// Derive the full level view from XP alone
    pub fn for_xp(xp: u64) -> Self {
        let level = level_for_xp(xp);
        Self {
            xp,
            level,
            current_level_xp: xp_for_level(level),
            next_level_xp: xp_for_level(level.saturating_add(1)),
            progress_percent: progress_to_next_level(xp),
        }
    }

    /// XP still missing until the next level
    pub fn xp_to_next(&self) -> u64 {
        self.next_level_xp.saturating_sub(self.xp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(399), 2);
        assert_eq!(level_for_xp(400), 3);
        assert_eq!(level_for_xp(900), 4);
        assert_eq!(level_for_xp(140), 2);
    }

    #[test]
    fn test_xp_for_level() {
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(2), 100);
        assert_eq!(xp_for_level(3), 400);
        assert_eq!(xp_for_level(4), 900);
        assert_eq!(xp_for_level(0), 0);
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut previous = level_for_xp(0);
        for xp in (0..50_000).step_by(7) {
            let level = level_for_xp(xp);
            assert!(level >= previous, "level dropped at xp={xp}");
            previous = level;
        }
    }

    #[test]
    fn test_level_matches_threshold() {
        for level in 1..200u32 {
            assert_eq!(level_for_xp(xp_for_level(level)), level);
            assert_eq!(level_for_xp(xp_for_level(level + 1) - 1), level);
        }
    }

    #[test]
    fn test_progress_bounds() {
        for xp in (0..20_000).step_by(13) {
            let progress = progress_to_next_level(xp);
            assert!((0.0..=100.0).contains(&progress), "xp={xp} progress={progress}");
        }
        assert!((0.0..=100.0).contains(&progress_to_next_level(u64::MAX)));
    }

    #[test]
    fn test_level_progress() {
        // Level 2 spans 100..400
        let progress = LevelProgress::for_xp(250);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.current_level_xp, 100);
        assert_eq!(progress.next_level_xp, 400);
        assert!((progress.progress_percent - 50.0).abs() < 0.001);
        assert_eq!(progress.xp_to_next(), 150);

        assert_eq!(LevelProgress::for_xp(0).progress_percent, 0.0);
    }
}
