//! Permanent achievements: one-way unlocks with tiered XP rewards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Achievement rarity tier; fixes the XP reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
}

impl AchievementTier {
    /// Fixed XP reward for unlocking an achievement of this tier
    pub fn xp_reward(&self) -> u32 {
        match self {
            Self::Bronze => 50,
            Self::Silver => 100,
            Self::Gold => 200,
        }
    }

    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "bronze" => Some(Self::Bronze),
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
        }
    }
}

/// Achievement category for grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Workout,
    Streak,
    Rank,
    Level,
    Category,
}

impl AchievementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Streak => "streak",
            Self::Rank => "rank",
            Self::Level => "level",
            Self::Category => "category",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "workout" => Some(Self::Workout),
            "streak" => Some(Self::Streak),
            "rank" => Some(Self::Rank),
            "level" => Some(Self::Level),
            "category" => Some(Self::Category),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Workout => "Workouts",
            Self::Streak => "Streaks",
            Self::Rank => "Ranks",
            Self::Level => "Levels",
            Self::Category => "Categories",
        }
    }
}

/// A seeded achievement instance.
///
/// One row per catalog definition, created on first engine activation and
/// never deleted. The unlock transition is one-way; once unlocked, progress
/// and timestamps are frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    /// Stable catalog identifier, e.g. "workouts_10"
    pub key: String,
    pub title: String,
    pub description: String,
    pub tier: AchievementTier,
    pub category: AchievementCategory,
    pub xp_reward: u32,
    pub icon: String,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub progress: u32,
    pub target_progress: u32,
    pub created_at: DateTime<Utc>,
}

impl Achievement {
    pub fn progress_fraction(&self) -> f64 {
        if self.target_progress == 0 {
            return 0.0;
        }
        (self.progress as f64 / self.target_progress as f64).min(1.0)
    }

    pub fn progress_text(&self) -> String {
        if self.unlocked {
            "Completed".to_string()
        } else {
            format!("{}/{}", self.progress, self.target_progress)
        }
    }

    /// Set measured progress (clamped) and unlock if the target is reached.
    /// Returns true if this call unlocked the achievement.
    pub fn update_progress(&mut self, new_progress: u32, now: DateTime<Utc>) -> bool {
        if self.unlocked {
            return false;
        }
        self.progress = new_progress.min(self.target_progress);
        if self.progress >= self.target_progress {
            self.unlocked = true;
            self.unlocked_at = Some(now);
            return true;
        }
        false
    }

    /// Unlock immediately, snapping progress to the target. No-op if already
    /// unlocked.
    pub fn unlock(&mut self, now: DateTime<Utc>) {
        if self.unlocked {
            return;
        }
        self.progress = self.target_progress;
        self.unlocked = true;
        self.unlocked_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn sample() -> Achievement {
        Achievement {
            id: Uuid::new_v4(),
            key: "workouts_10".into(),
            title: "Dedicated".into(),
            description: "Complete 10 workouts".into(),
            tier: AchievementTier::Bronze,
            category: AchievementCategory::Workout,
            xp_reward: AchievementTier::Bronze.xp_reward(),
            icon: "dumbbell".into(),
            unlocked: false,
            unlocked_at: None,
            progress: 0,
            target_progress: 10,
            created_at: ts("2026-03-01T00:00:00Z"),
        }
    }

    #[test]
    fn test_tier_rewards() {
        assert_eq!(AchievementTier::Bronze.xp_reward(), 50);
        assert_eq!(AchievementTier::Silver.xp_reward(), 100);
        assert_eq!(AchievementTier::Gold.xp_reward(), 200);
        assert!(AchievementTier::Bronze < AchievementTier::Gold);
    }

    #[test]
    fn test_update_progress_clamps_and_unlocks() {
        let mut ach = sample();
        let now = ts("2026-03-02T10:00:00Z");

        assert!(!ach.update_progress(9, now));
        assert_eq!(ach.progress, 9);
        assert!(!ach.unlocked);

        assert!(ach.update_progress(15, now));
        assert_eq!(ach.progress, 10);
        assert!(ach.unlocked);
        assert_eq!(ach.unlocked_at, Some(now));
    }

    #[test]
    fn test_unlock_is_one_way() {
        let mut ach = sample();
        let first = ts("2026-03-02T10:00:00Z");
        ach.unlock(first);

        let later = ts("2026-03-05T10:00:00Z");
        ach.unlock(later);
        assert!(!ach.update_progress(3, later));

        assert_eq!(ach.unlocked_at, Some(first));
        assert_eq!(ach.progress, 10);
    }
}
