//! Time-boxed quests: daily and weekly progress trackers that grant XP

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::workout::WorkoutCategory;

/// Quest time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestType {
    Daily,
    Weekly,
}

impl QuestType {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
        }
    }
}

/// How a quest accumulates progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    /// Any completed workout counts for one
    GenericCount,
    /// Only workouts in the quest's category count
    Category,
    /// Progress is the number of distinct categories trained this week
    AllCategories,
    /// Each workout credits a duration-derived exercise estimate
    ExerciseCollector,
}

impl QuestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenericCount => "generic_count",
            Self::Category => "category",
            Self::AllCategories => "all_categories",
            Self::ExerciseCollector => "exercise_collector",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "generic_count" => Some(Self::GenericCount),
            "category" => Some(Self::Category),
            "all_categories" => Some(Self::AllCategories),
            "exercise_collector" => Some(Self::ExerciseCollector),
            _ => None,
        }
    }
}

/// A single quest instance with a definite lifetime.
///
/// Completion is one-way: once `completed` is set, further progress updates
/// are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub quest_type: QuestType,
    pub kind: QuestKind,
    pub category: Option<WorkoutCategory>,
    pub target_count: u32,
    pub current_progress: u32,
    pub xp_reward: u32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Quest {
    #[allow(clippy::too_many_arguments)]
    fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        quest_type: QuestType,
        kind: QuestKind,
        category: Option<WorkoutCategory>,
        target_count: u32,
        xp_reward: u32,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            quest_type,
            kind,
            category,
            target_count,
            current_progress: 0,
            xp_reward,
            completed: false,
            completed_at: None,
            expires_at,
            created_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.completed && !self.is_expired(now)
    }

    /// Progress as a fraction in [0, 1]
    pub fn progress_fraction(&self) -> f64 {
        if self.target_count == 0 {
            return 0.0;
        }
        (self.current_progress as f64 / self.target_count as f64).min(1.0)
    }

    pub fn progress_text(&self) -> String {
        format!("{}/{}", self.current_progress, self.target_count)
    }

    /// Add progress, clamped to the target. Returns true if this call
    /// completed the quest. No-op on already-completed quests.
    pub fn increment_progress(&mut self, amount: u32, now: DateTime<Utc>) -> bool {
        if self.completed {
            return false;
        }
        self.current_progress = (self.current_progress + amount).min(self.target_count);
        if self.current_progress >= self.target_count {
            self.completed = true;
            self.completed_at = Some(now);
            return true;
        }
        false
    }

    /// Replace progress with a recomputed value (all-categories quests).
    /// Only ever moves forward; returns true on completion.
    pub fn set_progress(&mut self, new_progress: u32, now: DateTime<Utc>) -> bool {
        if self.completed || new_progress <= self.current_progress {
            return false;
        }
        self.current_progress = new_progress.min(self.target_count);
        if self.current_progress >= self.target_count {
            self.completed = true;
            self.completed_at = Some(now);
            return true;
        }
        false
    }

    /// Whether a workout in `category` counts toward this quest
    pub fn matches_category(&self, category: WorkoutCategory) -> bool {
        match self.category {
            Some(wanted) => wanted == category,
            None => true,
        }
    }
}

// Quest templates. Rewards follow the daily/weekly base values of the award
// configuration.
impl Quest {
    /// "Complete N workouts today" daily quest
    pub fn complete_workouts(
        count: u32,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let (title, description, xp) = if count == 1 {
            ("Daily Warrior", "Complete 1 workout today".to_string(), 30)
        } else {
            (
                "Double Down",
                format!("Complete {count} workouts today"),
                50,
            )
        };
        Self::new(
            title,
            description,
            QuestType::Daily,
            QuestKind::GenericCount,
            None,
            count,
            xp,
            expires_at,
            created_at,
        )
    }

    /// Category-specific daily quest
    pub fn category_workout(
        category: WorkoutCategory,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            format!("{} Power", category.label()),
            format!("Complete a {} workout", category.label()),
            QuestType::Daily,
            QuestKind::Category,
            Some(category),
            1,
            30,
            expires_at,
            created_at,
        )
    }

    /// "Complete N exercises total" daily quest; progress is credited from a
    /// duration-derived estimate, not a true exercise count
    pub fn exercise_collector(
        count: u32,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            "Exercise Collector",
            format!("Complete {count} exercises total"),
            QuestType::Daily,
            QuestKind::ExerciseCollector,
            None,
            count,
            40,
            expires_at,
            created_at,
        )
    }

    /// "Complete N workouts this week" weekly quest
    pub fn weekly_workouts(
        count: u32,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(
            "Weekly Champion",
            format!("Complete {count} workouts this week"),
            QuestType::Weekly,
            QuestKind::GenericCount,
            None,
            count,
            75,
            expires_at,
            created_at,
        )
    }

    /// "Train every category this week" weekly quest
    pub fn all_categories(expires_at: DateTime<Utc>, created_at: DateTime<Utc>) -> Self {
        Self::new(
            "Well Rounded",
            "Complete Push, Pull, and Core workouts",
            QuestType::Weekly,
            QuestKind::AllCategories,
            None,
            WorkoutCategory::all().len() as u32,
            100,
            expires_at,
            created_at,
        )
    }
}
