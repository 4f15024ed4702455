//! Quest generation policy and progress matching
//!
//! Generation runs on every engine activation and is idempotent: a fresh
//! daily set appears once per calendar day, a fresh weekly set once per ISO
//! week. Expired quests linger for a 2-day grace window before being purged.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use super::calendar;
use crate::domain::{CompletedWorkout, Quest, QuestKind, QuestType, WorkoutCategory};

/// Exercise credits granted per workout toward collector quests.
///
/// A duration-derived estimate, not a true exercise count: one credit per
/// two minutes, minimum three.
pub fn exercise_estimate(duration_minutes: u32) -> u32 {
    (duration_minutes / 2).max(3)
}

/// Result of a quest-pool maintenance pass
#[derive(Debug, Default)]
pub struct QuestMaintenance {
    /// Quests expired past the grace window, to be deleted
    pub purged: Vec<Uuid>,
    /// Freshly generated quests, to be inserted
    pub created: Vec<Quest>,
}

/// A quest that just completed, with the XP it awarded
#[derive(Debug, Clone)]
pub struct QuestCompletion {
    pub quest_id: Uuid,
    pub title: String,
    pub xp_awarded: u32,
}

/// Generate daily/weekly quests if the current window has none.
///
/// Safe to call on every activation; an existing live set for the window
/// suppresses generation.
pub fn maintain_quest_pool(existing: &[Quest], now: DateTime<Utc>) -> QuestMaintenance {
    let mut maintenance = QuestMaintenance::default();
    let today = calendar::day_of(now);

    let has_live_dailies = existing.iter().any(|q| {
        q.quest_type == QuestType::Daily
            && calendar::day_of(q.created_at) == today
            && !q.is_expired(now)
    });

    if !has_live_dailies {
        // Grace window: recently-expired quests stay visible for two days
        let purge_cutoff = now - Duration::days(2);
        maintenance.purged = existing
            .iter()
            .filter(|q| q.expires_at < purge_cutoff)
            .map(|q| q.id)
            .collect();

        let expires = calendar::end_of_day(today);
        maintenance
            .created
            .push(Quest::complete_workouts(1, expires, now));
        maintenance
            .created
            .push(Quest::category_workout(random_category(), expires, now));
        maintenance
            .created
            .push(Quest::exercise_collector(5, expires, now));
        debug!("generated daily quest set for {today}");
    }

    let week_start = calendar::start_of_week(today);
    let has_live_weeklies = existing.iter().any(|q| {
        q.quest_type == QuestType::Weekly
            && calendar::day_of(q.created_at) >= week_start
            && !q.is_expired(now)
    });

    if !has_live_weeklies {
        let expires = calendar::end_of_week(today);
        maintenance
            .created
            .push(Quest::weekly_workouts(5, expires, now));
        maintenance.created.push(Quest::all_categories(expires, now));
        debug!("generated weekly quest set for week of {week_start}");
    }

    maintenance
}

/// Apply one completed workout to every live quest in the pool.
///
/// `history` must already include `workout`; the all-categories quest
/// recomputes its progress from this week's slice of it. Returns the quests
/// completed by this workout, in pool order.
pub fn check_quest_progress(
    quests: &mut [Quest],
    workout: &CompletedWorkout,
    history: &[CompletedWorkout],
    now: DateTime<Utc>,
) -> Vec<QuestCompletion> {
    let mut completions = Vec::new();

    for quest in quests.iter_mut() {
        if !quest.is_active(now) {
            continue;
        }

        let completed = match quest.kind {
            QuestKind::GenericCount => quest.increment_progress(1, now),
            QuestKind::Category => {
                if quest.matches_category(workout.category) {
                    quest.increment_progress(1, now)
                } else {
                    false
                }
            }
            QuestKind::AllCategories => {
                let distinct = calendar::categories_in_week(history, calendar::day_of(now));
                quest.set_progress(distinct.len() as u32, now)
            }
            QuestKind::ExerciseCollector => {
                quest.increment_progress(exercise_estimate(workout.duration_minutes), now)
            }
        };

        if completed {
            debug!(quest = %quest.title, xp = quest.xp_reward, "quest completed");
            completions.push(QuestCompletion {
                quest_id: quest.id,
                title: quest.title.clone(),
                xp_awarded: quest.xp_reward,
            });
        }
    }

    completions
}

fn random_category() -> WorkoutCategory {
    let categories = WorkoutCategory::all();
    let mut byte = [0u8; 1];
    match getrandom::getrandom(&mut byte) {
        Ok(()) => categories[byte[0] as usize % categories.len()],
        Err(_) => categories[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn workout(at: &str, category: WorkoutCategory, minutes: u32) -> CompletedWorkout {
        CompletedWorkout::new("Session", category, minutes, ts(at))
    }

    #[test]
    fn test_exercise_estimate() {
        assert_eq!(exercise_estimate(0), 3);
        assert_eq!(exercise_estimate(5), 3);
        assert_eq!(exercise_estimate(6), 3);
        assert_eq!(exercise_estimate(8), 4);
        assert_eq!(exercise_estimate(30), 15);
    }

    #[test]
    fn test_generation_creates_full_set() {
        let now = ts("2026-03-04T09:00:00Z");
        let maintenance = maintain_quest_pool(&[], now);

        let dailies: Vec<_> = maintenance
            .created
            .iter()
            .filter(|q| q.quest_type == QuestType::Daily)
            .collect();
        let weeklies: Vec<_> = maintenance
            .created
            .iter()
            .filter(|q| q.quest_type == QuestType::Weekly)
            .collect();
        assert_eq!(dailies.len(), 3);
        assert_eq!(weeklies.len(), 2);

        // Dailies expire at end of day, weeklies at end of the ISO week
        for quest in &dailies {
            assert_eq!(quest.expires_at, ts("2026-03-04T23:59:59Z"));
        }
        for quest in &weeklies {
            assert_eq!(quest.expires_at, ts("2026-03-08T23:59:59Z"));
        }

        assert!(dailies.iter().any(|q| q.kind == QuestKind::GenericCount));
        assert!(dailies.iter().any(|q| q.kind == QuestKind::Category));
        assert!(dailies
            .iter()
            .any(|q| q.kind == QuestKind::ExerciseCollector));
        assert!(weeklies.iter().any(|q| q.kind == QuestKind::GenericCount));
        assert!(weeklies.iter().any(|q| q.kind == QuestKind::AllCategories));
    }

    #[test]
    fn test_generation_is_idempotent_within_day() {
        let now = ts("2026-03-04T09:00:00Z");
        let first = maintain_quest_pool(&[], now);
        assert_eq!(first.created.len(), 5);

        let later = ts("2026-03-04T20:00:00Z");
        let second = maintain_quest_pool(&first.created, later);
        assert!(second.created.is_empty());
        assert!(second.purged.is_empty());
    }

    #[test]
    fn test_new_day_regenerates_dailies_only() {
        let monday = ts("2026-03-02T09:00:00Z");
        let pool = maintain_quest_pool(&[], monday).created;

        let tuesday = ts("2026-03-03T09:00:00Z");
        let maintenance = maintain_quest_pool(&pool, tuesday);
        assert_eq!(maintenance.created.len(), 3);
        assert!(maintenance
            .created
            .iter()
            .all(|q| q.quest_type == QuestType::Daily));
    }

    #[test]
    fn test_new_week_regenerates_weeklies() {
        let sunday = ts("2026-03-08T09:00:00Z");
        let pool = maintain_quest_pool(&[], sunday).created;

        let monday = ts("2026-03-09T09:00:00Z");
        let maintenance = maintain_quest_pool(&pool, monday);
        let weeklies: Vec<_> = maintenance
            .created
            .iter()
            .filter(|q| q.quest_type == QuestType::Weekly)
            .collect();
        assert_eq!(weeklies.len(), 2);
    }

    #[test]
    fn test_purge_respects_grace_window() {
        let monday = ts("2026-03-02T09:00:00Z");
        let pool = maintain_quest_pool(&[], monday).created;

        // Next day: dailies from Monday expired but inside the grace window
        let tuesday = ts("2026-03-03T09:00:00Z");
        let maintenance = maintain_quest_pool(&pool, tuesday);
        assert!(maintenance.purged.is_empty());

        // Three days later the Monday dailies are past the window
        let friday = ts("2026-03-06T09:00:00Z");
        let maintenance = maintain_quest_pool(&pool, friday);
        let daily_ids: Vec<Uuid> = pool
            .iter()
            .filter(|q| q.quest_type == QuestType::Daily)
            .map(|q| q.id)
            .collect();
        assert_eq!(maintenance.purged, daily_ids);
    }

    #[test]
    fn test_generic_and_category_matching() {
        let now = ts("2026-03-04T10:00:00Z");
        let expires = ts("2026-03-04T23:59:59Z");
        let mut quests = vec![
            Quest::complete_workouts(1, expires, now),
            Quest::category_workout(WorkoutCategory::Pull, expires, now),
        ];

        let push = workout("2026-03-04T10:00:00Z", WorkoutCategory::Push, 20);
        let history = vec![push.clone()];
        let completions = check_quest_progress(&mut quests, &push, &history, now);

        // Generic quest completes; the Pull quest is untouched
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].title, "Daily Warrior");
        assert_eq!(completions[0].xp_awarded, 30);
        assert_eq!(quests[1].current_progress, 0);
    }

    #[test]
    fn test_completed_quests_are_skipped() {
        let now = ts("2026-03-04T10:00:00Z");
        let expires = ts("2026-03-04T23:59:59Z");
        let mut quests = vec![Quest::complete_workouts(1, expires, now)];

        let first = workout("2026-03-04T10:00:00Z", WorkoutCategory::Push, 20);
        let history = vec![first.clone()];
        assert_eq!(
            check_quest_progress(&mut quests, &first, &history, now).len(),
            1
        );

        let second = workout("2026-03-04T12:00:00Z", WorkoutCategory::Push, 20);
        let later = ts("2026-03-04T12:00:00Z");
        let completions = check_quest_progress(&mut quests, &second, &history, later);
        assert!(completions.is_empty());
        assert_eq!(quests[0].current_progress, 1);
    }

    #[test]
    fn test_all_categories_recomputes_from_week() {
        let now = ts("2026-03-04T10:00:00Z");
        let mut quests = vec![Quest::all_categories(ts("2026-03-08T23:59:59Z"), now)];

        let history = vec![
            workout("2026-03-02T08:00:00Z", WorkoutCategory::Push, 20),
            workout("2026-03-03T08:00:00Z", WorkoutCategory::Push, 20),
            workout("2026-03-04T10:00:00Z", WorkoutCategory::Pull, 20),
        ];
        let completions =
            check_quest_progress(&mut quests, &history[2], &history, now);
        assert!(completions.is_empty());
        assert_eq!(quests[0].current_progress, 2);

        let mut full_history = history.clone();
        let core = workout("2026-03-05T08:00:00Z", WorkoutCategory::Core, 20);
        full_history.push(core.clone());
        let later = ts("2026-03-05T08:00:00Z");
        let completions = check_quest_progress(&mut quests, &core, &full_history, later);
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].xp_awarded, 100);
    }

    #[test]
    fn test_exercise_collector_uses_estimate() {
        let now = ts("2026-03-04T10:00:00Z");
        let mut quests = vec![Quest::exercise_collector(5, ts("2026-03-04T23:59:59Z"), now)];

        let short = workout("2026-03-04T10:00:00Z", WorkoutCategory::Core, 4);
        let history = vec![short.clone()];
        // 4 minutes still credits the 3-exercise minimum
        assert!(check_quest_progress(&mut quests, &short, &history, now).is_empty());
        assert_eq!(quests[0].current_progress, 3);

        let longer = workout("2026-03-04T12:00:00Z", WorkoutCategory::Core, 10);
        let later = ts("2026-03-04T12:00:00Z");
        let completions = check_quest_progress(&mut quests, &longer, &history, later);
        assert_eq!(completions.len(), 1);
        assert_eq!(quests[0].current_progress, 5);
    }

    #[test]
    fn test_expired_quests_are_ignored() {
        let created = ts("2026-03-02T09:00:00Z");
        let mut quests = vec![Quest::complete_workouts(
            1,
            ts("2026-03-02T23:59:59Z"),
            created,
        )];

        let next_day = ts("2026-03-03T10:00:00Z");
        let w = workout("2026-03-03T10:00:00Z", WorkoutCategory::Push, 20);
        let history = vec![w.clone()];
        let completions = check_quest_progress(&mut quests, &w, &history, next_day);
        assert!(completions.is_empty());
        assert_eq!(quests[0].current_progress, 0);
    }
}
