//! XP award calculation for a completed workout
//!
//! Pure: the orchestrator supplies the day/streak/goal context and applies
//! the result. The breakdown order is the presentation order, and every
//! positive line item becomes one ledger entry.

use serde::{Deserialize, Serialize};

use crate::domain::XpSource;

/// XP rewards and caps for workout completion
pub struct AwardConfig;

impl AwardConfig {
    /// Base XP for completing any workout
    pub const WORKOUT_BASE_XP: u32 = 50;

    /// XP per 10 minutes of workout duration
    pub const DURATION_BONUS_PER_TEN_MINUTES: u32 = 10;

    /// Maximum duration bonus XP
    pub const DURATION_BONUS_CAP: u32 = 100;

    /// XP for the first workout of the day
    pub const FIRST_OF_DAY_XP: u32 = 20;

    /// XP per streak day
    pub const STREAK_BONUS_PER_DAY: u32 = 25;

    /// Streak days counted toward the bonus
    pub const STREAK_BONUS_CAP: u32 = 7;

    /// XP for hitting the weekly goal
    pub const WEEKLY_GOAL_XP: u32 = 100;

    /// Base + duration bonus for a workout of the given length
    pub fn workout_xp(duration_minutes: u32) -> u32 {
        let bonus = ((duration_minutes / 10) * Self::DURATION_BONUS_PER_TEN_MINUTES)
            .min(Self::DURATION_BONUS_CAP);
        Self::WORKOUT_BASE_XP + bonus
    }

    /// Streak bonus, capped at [`Self::STREAK_BONUS_CAP`] days
    pub fn streak_bonus(streak_days: u32) -> u32 {
        streak_days.min(Self::STREAK_BONUS_CAP) * Self::STREAK_BONUS_PER_DAY
    }
}

/// One line of an XP award
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpBreakdownItem {
    pub label: String,
    pub amount: u32,
    pub source: XpSource,
}

/// The full award for one workout completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpAward {
    pub total: u32,
    pub breakdown: Vec<XpBreakdownItem>,
}

/// Compute the XP award for a completed workout.
///
/// A streak of 1 is just "today" and earns no streak bonus; bonuses start at
/// 2 consecutive days.
pub fn award_for_workout(
    duration_minutes: u32,
    is_first_of_day: bool,
    current_streak: u32,
    weekly_goal_hit: bool,
) -> XpAward {
    let mut breakdown = Vec::new();

    breakdown.push(XpBreakdownItem {
        label: "Workout Complete".to_string(),
        amount: AwardConfig::workout_xp(duration_minutes),
        source: XpSource::WorkoutCompletion,
    });

    if is_first_of_day {
        breakdown.push(XpBreakdownItem {
            label: "First Today".to_string(),
            amount: AwardConfig::FIRST_OF_DAY_XP,
            source: XpSource::FirstWorkoutOfDay,
        });
    }

    if current_streak > 1 {
        let counted = current_streak.min(AwardConfig::STREAK_BONUS_CAP);
        breakdown.push(XpBreakdownItem {
            label: format!("{counted} Day Streak"),
            amount: AwardConfig::streak_bonus(current_streak),
            source: XpSource::DailyStreak,
        });
    }

    if weekly_goal_hit {
        breakdown.push(XpBreakdownItem {
            label: "Weekly Goal".to_string(),
            amount: AwardConfig::WEEKLY_GOAL_XP,
            source: XpSource::WeeklyGoal,
        });
    }

    let total = breakdown.iter().map(|item| item.amount).sum();
    XpAward { total, breakdown }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_xp_duration_scaling() {
        assert_eq!(AwardConfig::workout_xp(0), 50);
        assert_eq!(AwardConfig::workout_xp(9), 50);
        assert_eq!(AwardConfig::workout_xp(10), 60);
        assert_eq!(AwardConfig::workout_xp(30), 80);
        assert_eq!(AwardConfig::workout_xp(100), 150);
        // Bonus caps at +100
        assert_eq!(AwardConfig::workout_xp(240), 150);
    }

    #[test]
    fn test_streak_bonus_caps_at_seven() {
        assert_eq!(AwardConfig::streak_bonus(2), 50);
        assert_eq!(AwardConfig::streak_bonus(7), 175);
        assert_eq!(AwardConfig::streak_bonus(10), 175);
    }

    #[test]
    fn test_award_full_combination() {
        // 30 min base 80, +20 first of day, streak 3 = 75
        let award = award_for_workout(30, true, 3, false);
        assert_eq!(award.total, 175);
        assert_eq!(award.breakdown.len(), 3);
        assert_eq!(award.breakdown[0].amount, 80);
        assert_eq!(award.breakdown[1].amount, 20);
        assert_eq!(award.breakdown[2].amount, 75);
        assert_eq!(award.breakdown[2].label, "3 Day Streak");
    }

    #[test]
    fn test_streak_of_one_earns_nothing() {
        let award = award_for_workout(20, false, 1, false);
        assert_eq!(award.total, 70);
        assert_eq!(award.breakdown.len(), 1);
    }

    #[test]
    fn test_long_streak_label_shows_cap() {
        let award = award_for_workout(20, false, 10, false);
        assert_eq!(award.breakdown[1].label, "7 Day Streak");
        assert_eq!(award.breakdown[1].amount, 175);
    }

    #[test]
    fn test_weekly_goal_line() {
        let award = award_for_workout(45, false, 0, true);
        assert_eq!(award.total, 50 + 40 + 100);
        assert_eq!(award.breakdown.last().unwrap().source, XpSource::WeeklyGoal);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        for (duration, first, streak, goal) in [
            (15, true, 0, false),
            (60, false, 5, true),
            (5, true, 1, true),
            (120, true, 30, true),
        ] {
            let award = award_for_workout(duration, first, streak, goal);
            let sum: u32 = award.breakdown.iter().map(|i| i.amount).sum();
            assert_eq!(sum, award.total);
        }
    }
}
