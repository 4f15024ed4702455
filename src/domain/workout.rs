//! Workout categories and completed-workout history records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Training category of a workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutCategory {
    Push,
    Pull,
    Core,
}

impl WorkoutCategory {
    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pull => "pull",
            Self::Core => "core",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "push" => Some(Self::Push),
            "pull" => Some(Self::Pull),
            "core" => Some(Self::Core),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Push => "Push",
            Self::Pull => "Pull",
            Self::Core => "Core",
        }
    }

    /// All categories
    pub fn all() -> &'static [WorkoutCategory] {
        &[Self::Push, Self::Pull, Self::Core]
    }
}

/// Immutable record of one finished workout.
///
/// Retained forever; streaks and category counts are computed from these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedWorkout {
    pub id: Uuid,
    pub workout_name: String,
    pub category: WorkoutCategory,
    pub duration_minutes: u32,
    pub completed_at: DateTime<Utc>,
}

impl CompletedWorkout {
    pub fn new(
        workout_name: impl Into<String>,
        category: WorkoutCategory,
        duration_minutes: u32,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workout_name: workout_name.into(),
            category,
            duration_minutes,
            completed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for cat in WorkoutCategory::all() {
            assert_eq!(WorkoutCategory::parse(cat.as_str()), Some(*cat));
        }
        assert_eq!(WorkoutCategory::parse("legs"), None);
    }
}
