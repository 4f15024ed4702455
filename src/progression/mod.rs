//! The progression engine
//!
//! Converts completed workouts into XP, level and rank advancement, quest
//! progress, and achievement unlocks.
//!
//! # Architecture
//!
//! ```text
//! CompletedWorkout ──► ProgressionEngine::complete_activity
//!                          │
//!                          ├─ award      (XP breakdown)
//!                          ├─ level/rank (re-derive + cache)
//!                          ├─ quests     (match + auto-complete)
//!                          └─ achievements (evaluate + unlock)
//!                          │
//!                          ▼
//!                  Store (one transaction)  +  Vec<OutcomeEvent>
//! ```
//!
//! Everything above the store is pure, synchronous computation; the host
//! serializes calls per player.

pub mod achievements;
pub mod award;
pub mod calendar;
pub mod engine;
pub mod level;
pub mod quests;

pub use achievements::{seed_achievements, AchievementDef, AchievementUnlock, UnlockRule, CATALOG};
pub use award::{award_for_workout, AwardConfig, XpAward, XpBreakdownItem};
pub use engine::{EngineError, OutcomeEvent, ProgressionEngine};
pub use quests::{exercise_estimate, QuestCompletion, QuestMaintenance};
