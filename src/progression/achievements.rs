//! Achievement catalog and unlock evaluation
//!
//! All achievements are defined here with their unlock rules and tiers. The
//! catalog is seeded into the store once; afterwards only progress and the
//! unlocked flag are mutated, in place, forever.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    Achievement, AchievementCategory, AchievementTier, CompletedWorkout, HunterRank,
    PlayerProfile, WorkoutCategory,
};

/// Unlock condition, evaluated against aggregate player/history state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockRule {
    /// Lifetime completed-workout count reaches N
    TotalWorkouts(u32),
    /// Current daily streak reaches N days
    StreakDays(u32),
    /// Rank reaches at least the given rank
    MinRank(HunterRank),
    /// Level reaches N
    MinLevel(u32),
    /// Lifetime workouts in one category reach N
    CategoryCount(WorkoutCategory, u32),
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tier: AchievementTier,
    pub category: AchievementCategory,
    pub icon: &'static str,
    pub target: u32,
    pub rule: UnlockRule,
}

/// All achievement definitions, in presentation order
pub static CATALOG: &[AchievementDef] = &[
    // === WORKOUTS ===
    AchievementDef {
        key: "first_workout",
        title: "First Blood",
        description: "Complete your first workout",
        tier: AchievementTier::Bronze,
        category: AchievementCategory::Workout,
        icon: "bolt",
        target: 1,
        rule: UnlockRule::TotalWorkouts(1),
    },
    AchievementDef {
        key: "workouts_10",
        title: "Dedicated",
        description: "Complete 10 workouts",
        tier: AchievementTier::Silver,
        category: AchievementCategory::Workout,
        icon: "dumbbell",
        target: 10,
        rule: UnlockRule::TotalWorkouts(10),
    },
    AchievementDef {
        key: "workouts_50",
        title: "Committed",
        description: "Complete 50 workouts",
        tier: AchievementTier::Silver,
        category: AchievementCategory::Workout,
        icon: "dumbbell",
        target: 50,
        rule: UnlockRule::TotalWorkouts(50),
    },
    AchievementDef {
        key: "workouts_100",
        title: "Centurion",
        description: "Complete 100 workouts",
        tier: AchievementTier::Gold,
        category: AchievementCategory::Workout,
        icon: "medal",
        target: 100,
        rule: UnlockRule::TotalWorkouts(100),
    },
    // === STREAKS ===
    AchievementDef {
        key: "streak_7",
        title: "Week Warrior",
        description: "Maintain a 7-day streak",
        tier: AchievementTier::Bronze,
        category: AchievementCategory::Streak,
        icon: "flame",
        target: 7,
        rule: UnlockRule::StreakDays(7),
    },
    AchievementDef {
        key: "streak_30",
        title: "Monthly Master",
        description: "Maintain a 30-day streak",
        tier: AchievementTier::Silver,
        category: AchievementCategory::Streak,
        icon: "flame",
        target: 30,
        rule: UnlockRule::StreakDays(30),
    },
    AchievementDef {
        key: "streak_100",
        title: "Unstoppable",
        description: "Maintain a 100-day streak",
        tier: AchievementTier::Gold,
        category: AchievementCategory::Streak,
        icon: "flame",
        target: 100,
        rule: UnlockRule::StreakDays(100),
    },
    // === RANKS ===
    AchievementDef {
        key: "rank_d",
        title: "Hunter",
        description: "Reach Rank D",
        tier: AchievementTier::Bronze,
        category: AchievementCategory::Rank,
        icon: "shield",
        target: 1,
        rule: UnlockRule::MinRank(HunterRank::D),
    },
    AchievementDef {
        key: "rank_c",
        title: "Warrior",
        description: "Reach Rank C",
        tier: AchievementTier::Bronze,
        category: AchievementCategory::Rank,
        icon: "shield",
        target: 1,
        rule: UnlockRule::MinRank(HunterRank::C),
    },
    AchievementDef {
        key: "rank_b",
        title: "Elite",
        description: "Reach Rank B",
        tier: AchievementTier::Silver,
        category: AchievementCategory::Rank,
        icon: "shield",
        target: 1,
        rule: UnlockRule::MinRank(HunterRank::B),
    },
    AchievementDef {
        key: "rank_a",
        title: "Champion",
        description: "Reach Rank A",
        tier: AchievementTier::Silver,
        category: AchievementCategory::Rank,
        icon: "shield",
        target: 1,
        rule: UnlockRule::MinRank(HunterRank::A),
    },
    AchievementDef {
        key: "rank_s",
        title: "Shadow Monarch",
        description: "Reach Rank S",
        tier: AchievementTier::Gold,
        category: AchievementCategory::Rank,
        icon: "crown",
        target: 1,
        rule: UnlockRule::MinRank(HunterRank::S),
    },
    // === LEVELS ===
    AchievementDef {
        key: "level_10",
        title: "Rising Star",
        description: "Reach Level 10",
        tier: AchievementTier::Bronze,
        category: AchievementCategory::Level,
        icon: "star",
        target: 10,
        rule: UnlockRule::MinLevel(10),
    },
    AchievementDef {
        key: "level_25",
        title: "Veteran",
        description: "Reach Level 25",
        tier: AchievementTier::Silver,
        category: AchievementCategory::Level,
        icon: "star",
        target: 25,
        rule: UnlockRule::MinLevel(25),
    },
    AchievementDef {
        key: "level_50",
        title: "Legend",
        description: "Reach Level 50",
        tier: AchievementTier::Gold,
        category: AchievementCategory::Level,
        icon: "star",
        target: 50,
        rule: UnlockRule::MinLevel(50),
    },
    // === CATEGORY MASTERY ===
    AchievementDef {
        key: "push_master",
        title: "Push Master",
        description: "Complete 10 Push workouts",
        tier: AchievementTier::Bronze,
        category: AchievementCategory::Category,
        icon: "dumbbell",
        target: 10,
        rule: UnlockRule::CategoryCount(WorkoutCategory::Push, 10),
    },
    AchievementDef {
        key: "pull_master",
        title: "Pull Master",
        description: "Complete 10 Pull workouts",
        tier: AchievementTier::Bronze,
        category: AchievementCategory::Category,
        icon: "rings",
        target: 10,
        rule: UnlockRule::CategoryCount(WorkoutCategory::Pull, 10),
    },
    AchievementDef {
        key: "core_master",
        title: "Core Master",
        description: "Complete 10 Core workouts",
        tier: AchievementTier::Bronze,
        category: AchievementCategory::Category,
        icon: "bolt",
        target: 10,
        rule: UnlockRule::CategoryCount(WorkoutCategory::Core, 10),
    },
];

impl AchievementDef {
    /// Get a definition by key
    pub fn get(key: &str) -> Option<&'static AchievementDef> {
        CATALOG.iter().find(|def| def.key == key)
    }

    /// Total number of achievements
    pub fn total_count() -> usize {
        CATALOG.len()
    }

    /// Total possible XP from all achievements
    pub fn total_xp() -> u32 {
        CATALOG.iter().map(|def| def.tier.xp_reward()).sum()
    }

    /// Create a fresh locked instance of this definition
    pub fn instantiate(&self, now: DateTime<Utc>) -> Achievement {
        Achievement {
            id: Uuid::new_v4(),
            key: self.key.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            tier: self.tier,
            category: self.category,
            xp_reward: self.tier.xp_reward(),
            icon: self.icon.to_string(),
            unlocked: false,
            unlocked_at: None,
            progress: 0,
            target_progress: self.target,
            created_at: now,
        }
    }
}

/// Instantiate catalog entries missing from the pool. Idempotent, keyed by
/// `key`.
pub fn seed_achievements(existing: &[Achievement], now: DateTime<Utc>) -> Vec<Achievement> {
    let existing_keys: HashSet<&str> = existing.iter().map(|a| a.key.as_str()).collect();
    CATALOG
        .iter()
        .filter(|def| !existing_keys.contains(def.key))
        .map(|def| def.instantiate(now))
        .collect()
}

/// An achievement that just unlocked, with the XP it awarded
#[derive(Debug, Clone)]
pub struct AchievementUnlock {
    pub achievement_id: Uuid,
    pub key: String,
    pub title: String,
    pub tier: AchievementTier,
    pub xp_awarded: u32,
}

/// Evaluate every locked achievement against current state.
///
/// Progress is refreshed (clamped to target) on every call so progress bars
/// track the measured statistic; unlocks are one-way and already-unlocked
/// achievements are skipped. Returns new unlocks in catalog order.
pub fn check_achievements(
    achievements: &mut [Achievement],
    profile: &PlayerProfile,
    history: &[CompletedWorkout],
    current_streak: u32,
    now: DateTime<Utc>,
) -> Vec<AchievementUnlock> {
    let mut unlocks = Vec::new();

    for def in CATALOG {
        let Some(achievement) = achievements.iter_mut().find(|a| a.key == def.key) else {
            continue;
        };
        if achievement.unlocked {
            continue;
        }

        let newly_unlocked = match def.rule {
            UnlockRule::TotalWorkouts(_) => {
                achievement.update_progress(history.len() as u32, now)
            }
            UnlockRule::StreakDays(_) => achievement.update_progress(current_streak, now),
            UnlockRule::MinRank(required) => {
                if profile.rank >= required {
                    achievement.unlock(now);
                    true
                } else {
                    false
                }
            }
            UnlockRule::MinLevel(_) => achievement.update_progress(profile.current_level, now),
            UnlockRule::CategoryCount(category, _) => {
                let count = category_count(history, category);
                achievement.update_progress(count, now)
            }
        };

        if newly_unlocked {
            debug!(key = %achievement.key, xp = achievement.xp_reward, "achievement unlocked");
            unlocks.push(AchievementUnlock {
                achievement_id: achievement.id,
                key: achievement.key.clone(),
                title: achievement.title.clone(),
                tier: achievement.tier,
                xp_awarded: achievement.xp_reward,
            });
        }
    }

    unlocks
}

/// Lifetime count of workouts in one category
fn category_count(history: &[CompletedWorkout], category: WorkoutCategory) -> u32 {
    history.iter().filter(|w| w.category == category).count() as u32
}
