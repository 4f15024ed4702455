//! Append-only XP ledger entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a grant of XP came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpSource {
    WorkoutCompletion,
    DailyStreak,
    FirstWorkoutOfDay,
    WeeklyGoal,
    QuestCompletion,
    AchievementUnlock,
    Bonus,
}

impl XpSource {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkoutCompletion => "workout_completion",
            Self::DailyStreak => "daily_streak",
            Self::FirstWorkoutOfDay => "first_workout_of_day",
            Self::WeeklyGoal => "weekly_goal",
            Self::QuestCompletion => "quest_completion",
            Self::AchievementUnlock => "achievement_unlock",
            Self::Bonus => "bonus",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "workout_completion" => Some(Self::WorkoutCompletion),
            "daily_streak" => Some(Self::DailyStreak),
            "first_workout_of_day" => Some(Self::FirstWorkoutOfDay),
            "weekly_goal" => Some(Self::WeeklyGoal),
            "quest_completion" => Some(Self::QuestCompletion),
            "achievement_unlock" => Some(Self::AchievementUnlock),
            "bonus" => Some(Self::Bonus),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WorkoutCompletion => "Workout Completion",
            Self::DailyStreak => "Daily Streak",
            Self::FirstWorkoutOfDay => "First Workout",
            Self::WeeklyGoal => "Weekly Goal",
            Self::QuestCompletion => "Quest",
            Self::AchievementUnlock => "Achievement",
            Self::Bonus => "Bonus",
        }
    }
}

/// One immutable ledger entry. Created exactly once per XP grant; never
/// mutated or deleted. History is for audit and display, not engine math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpEvent {
    pub id: Uuid,
    pub amount: u32,
    pub source: XpSource,
    pub source_id: Option<String>,
    pub source_name: Option<String>,
    pub earned_at: DateTime<Utc>,
}

impl XpEvent {
    pub fn new(
        amount: u32,
        source: XpSource,
        source_id: Option<String>,
        source_name: Option<String>,
        earned_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            source,
            source_id,
            source_name,
            earned_at,
        }
    }

    pub fn workout_completion(
        workout_name: &str,
        workout_id: Uuid,
        xp: u32,
        earned_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            xp,
            XpSource::WorkoutCompletion,
            Some(workout_id.to_string()),
            Some(workout_name.to_string()),
            earned_at,
        )
    }

    pub fn daily_streak(day: u32, xp: u32, earned_at: DateTime<Utc>) -> Self {
        Self::new(
            xp,
            XpSource::DailyStreak,
            None,
            Some(format!("Day {day} streak bonus")),
            earned_at,
        )
    }

    pub fn first_workout_of_day(xp: u32, earned_at: DateTime<Utc>) -> Self {
        Self::new(xp, XpSource::FirstWorkoutOfDay, None, None, earned_at)
    }

    pub fn weekly_goal(xp: u32, earned_at: DateTime<Utc>) -> Self {
        Self::new(
            xp,
            XpSource::WeeklyGoal,
            None,
            Some("Weekly goal complete".to_string()),
            earned_at,
        )
    }

    pub fn quest_complete(
        quest_name: &str,
        quest_id: Uuid,
        xp: u32,
        earned_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            xp,
            XpSource::QuestCompletion,
            Some(quest_id.to_string()),
            Some(quest_name.to_string()),
            earned_at,
        )
    }

    pub fn achievement_unlock(
        achievement_name: &str,
        achievement_id: Uuid,
        xp: u32,
        earned_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            xp,
            XpSource::AchievementUnlock,
            Some(achievement_id.to_string()),
            Some(achievement_name.to_string()),
            earned_at,
        )
    }

    pub fn display_title(&self) -> &str {
        self.source_name.as_deref().unwrap_or(self.source.label())
    }
}
