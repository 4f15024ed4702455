//! Core domain types for the Arise progression engine

mod achievement;
mod profile;
mod quest;
mod rank;
mod workout;
mod xp_event;

pub use achievement::{Achievement, AchievementCategory, AchievementTier};
pub use profile::{
    ActivityLevel, Equipment, FitnessGoal, FitnessLevel, FocusArea, Gender, PlayerProfile,
};
pub use quest::{Quest, QuestKind, QuestType};
pub use rank::HunterRank;
pub use workout::{CompletedWorkout, WorkoutCategory};
pub use xp_event::{XpEvent, XpSource};
