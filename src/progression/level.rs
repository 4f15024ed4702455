//! Level curve
//!
//! Levels follow an exponential XP cost curve: 100 XP for the first level-up,
//! scaling by 1.15x per level, capped at level 100.

/// XP required to go from level 1 to level 2
pub const BASE_XP: u32 = 100;

/// Cost multiplier per level
pub const SCALING_FACTOR: f64 = 1.15;

/// Level cap; XP keeps accumulating but levels stop here
pub const MAX_LEVEL: u32 = 100;

/// XP needed to advance from `level` to `level + 1`. Strictly increasing.
pub fn xp_for_level_up(level: u32) -> u64 {
    let exp = level.saturating_sub(1) as i32;
    // The epsilon keeps f64 representation error from flooring exact values
    // down (100 * 1.15^1 computes as 114.999..., must floor to 115).
    (BASE_XP as f64 * SCALING_FACTOR.powi(exp) + 1e-6).floor() as u64
}

/// Cumulative XP floor for reaching `level` from level 1 (0 for level <= 1)
pub fn xp_required_for_level(level: u32) -> u64 {
    if level <= 1 {
        return 0;
    }
    (1..level).map(xp_for_level_up).sum()
}

/// Level for a given lifetime XP total, capped at [`MAX_LEVEL`]
pub fn level_for_xp(xp: u64) -> u32 {
    let mut level = 1;
    let mut accumulated = 0u64;

    while level < MAX_LEVEL {
        let needed = xp_for_level_up(level);
        if accumulated + needed > xp {
            break;
        }
        accumulated += needed;
        level += 1;
    }

    level
}

/// Progress through the current level as a fraction in [0, 1)
pub fn level_progress(xp: u64) -> f64 {
    let level = level_for_xp(xp);
    let floor = xp_required_for_level(level);
    let span = xp_for_level_up(level);

    if span == 0 {
        return 1.0;
    }
    (xp - floor) as f64 / span as f64
}

/// XP remaining until the next level-up
pub fn xp_to_next_level(xp: u64) -> u64 {
    let level = level_for_xp(xp);
    let floor = xp_required_for_level(level);
    let span = xp_for_level_up(level);
    span.saturating_sub(xp - floor)
}
