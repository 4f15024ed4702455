//! Progression orchestrator
//!
//! Single entry point for "a workout was completed": awards XP, re-derives
//! level and rank, advances quests, evaluates achievements, and returns the
//! ordered outcome queue the host drains for presentation. All state
//! mutations for one completion are staged in memory and committed to the
//! store in a single transaction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::achievements::{check_achievements, seed_achievements};
use super::award::{award_for_workout, XpBreakdownItem};
use super::calendar;
use super::level;
use super::quests::{check_quest_progress, maintain_quest_pool};
use crate::domain::{AchievementTier, CompletedWorkout, HunterRank, PlayerProfile, XpEvent};
use crate::store::Store;

/// Errors surfaced at the engine boundary
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("no player profile exists; complete onboarding first")]
    ProfileMissing,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// One entry of the ordered outcome queue returned by
/// [`ProgressionEngine::complete_activity`].
///
/// The host presents these in order: XP toast, then level-up and rank-up
/// overlays, then one toast per completed quest, then one overlay per
/// unlocked achievement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutcomeEvent {
    XpAwarded {
        total: u32,
        breakdown: Vec<XpBreakdownItem>,
    },
    LevelUp {
        previous_level: u32,
        new_level: u32,
    },
    RankUp {
        previous_rank: HunterRank,
        new_rank: HunterRank,
    },
    QuestCompleted {
        quest_id: Uuid,
        title: String,
        xp_awarded: u32,
    },
    AchievementUnlocked {
        key: String,
        title: String,
        tier: AchievementTier,
        xp_awarded: u32,
    },
}

/// The progression engine. One instance per store; calls against the same
/// player must be serialized by the host (no internal locking beyond the
/// store connection).
pub struct ProgressionEngine {
    store: Store,
}

impl ProgressionEngine {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Session activation: seed missing achievements and refresh the quest
    /// pool for the current day/week. Idempotent; call before any
    /// `complete_activity`.
    pub fn activate(&self, now: DateTime<Utc>) -> Result<(), EngineError> {
        let achievements = self.store.fetch_achievements()?;
        let seeded = seed_achievements(&achievements, now);
        if !seeded.is_empty() {
            info!(count = seeded.len(), "seeded achievement catalog");
        }

        let quests = self.store.fetch_quests()?;
        let maintenance = maintain_quest_pool(&quests, now);

        self.store
            .apply_activation(&maintenance.purged, &maintenance.created, &seeded)?;
        Ok(())
    }

    /// Record a completed workout and run the full progression pipeline.
    ///
    /// Returns the ordered outcome queue. On any store failure the whole
    /// completion is rolled back and nothing is credited.
    pub fn complete_activity(
        &self,
        workout: CompletedWorkout,
    ) -> Result<Vec<OutcomeEvent>, EngineError> {
        let now = workout.completed_at;

        let mut profile = self
            .store
            .fetch_profile()?
            .ok_or(EngineError::ProfileMissing)?;
        let mut history = self.store.fetch_workouts()?;
        history.push(workout.clone());
        let mut quests = self.store.fetch_quests()?;
        let mut achievements = self.store.fetch_achievements()?;

        // Day/streak/goal context, derived from history including this workout
        let today = calendar::day_of(now);
        let is_first_of_day = calendar::workouts_on_day(&history, today) == 1;
        let current_streak = calendar::current_streak(&history, today);
        let weekly_goal_hit = profile.weekly_goal > 0
            && calendar::workouts_in_week(&history, today) as u32 == profile.weekly_goal;

        let mut outcomes = Vec::new();
        let mut xp_events = Vec::new();

        // Stage 1: workout XP award
        let award = award_for_workout(
            workout.duration_minutes,
            is_first_of_day,
            current_streak,
            weekly_goal_hit,
        );
        let previous_level = profile.current_level;
        let previous_rank = profile.rank;
        profile.credit_xp(award.total as u64);
        for item in award.breakdown.iter().filter(|item| item.amount > 0) {
            xp_events.push(XpEvent::new(
                item.amount,
                item.source,
                Some(workout.id.to_string()),
                Some(item.label.clone()),
                now,
            ));
        }
        outcomes.push(OutcomeEvent::XpAwarded {
            total: award.total,
            breakdown: award.breakdown.clone(),
        });

        // Stage 2: re-derive level and rank, cache on the profile
        let new_level = level::level_for_xp(profile.total_xp);
        if new_level > previous_level {
            info!(from = previous_level, to = new_level, "level up");
            outcomes.push(OutcomeEvent::LevelUp {
                previous_level,
                new_level,
            });
        }
        profile.current_level = new_level;

        let new_rank = HunterRank::for_total_xp(profile.total_xp);
        if new_rank > previous_rank {
            info!(from = %previous_rank.letter(), to = %new_rank.letter(), "rank up");
            outcomes.push(OutcomeEvent::RankUp {
                previous_rank,
                new_rank,
            });
        }
        profile.rank = new_rank;

        // Stage 3: quests. Quest XP is credited without re-deriving
        // level/rank; the next workout award picks it up.
        let quest_completions = check_quest_progress(&mut quests, &workout, &history, now);
        for completion in &quest_completions {
            profile.credit_xp(completion.xp_awarded as u64);
            xp_events.push(XpEvent::quest_complete(
                &completion.title,
                completion.quest_id,
                completion.xp_awarded,
                now,
            ));
            outcomes.push(OutcomeEvent::QuestCompleted {
                quest_id: completion.quest_id,
                title: completion.title.clone(),
                xp_awarded: completion.xp_awarded,
            });
        }

        // Stage 4: achievements, evaluated against post-quest state. Same
        // crediting rule as quests.
        let unlocks =
            check_achievements(&mut achievements, &profile, &history, current_streak, now);
        for unlock in &unlocks {
            profile.credit_xp(unlock.xp_awarded as u64);
            xp_events.push(XpEvent::achievement_unlock(
                &unlock.title,
                unlock.achievement_id,
                unlock.xp_awarded,
                now,
            ));
            outcomes.push(OutcomeEvent::AchievementUnlocked {
                key: unlock.key.clone(),
                title: unlock.title.clone(),
                tier: unlock.tier,
                xp_awarded: unlock.xp_awarded,
            });
        }

        // All staged mutations land together or not at all
        self.store
            .commit_completion(&workout, &profile, &quests, &achievements, &xp_events)?;

        Ok(outcomes)
    }
}
