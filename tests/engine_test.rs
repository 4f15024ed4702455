//! Integration tests for the full progression pipeline
//!
//! Exercises onboarding, activation, and workout completion end-to-end
//! against a real database file.

use chrono::{DateTime, Utc};
use tempfile::TempDir;

use arise::domain::{CompletedWorkout, HunterRank, PlayerProfile, WorkoutCategory, XpSource};
use arise::progression::{level, OutcomeEvent, ProgressionEngine};
use arise::store::Store;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid test timestamp")
}

fn create_engine(dir: &TempDir) -> ProgressionEngine {
    let store = Store::open(&dir.path().join("arise.db")).expect("Failed to open store");
    ProgressionEngine::new(store)
}

fn onboard(engine: &ProgressionEngine, weekly_goal: u32) -> PlayerProfile {
    let mut profile = PlayerProfile::new("Hunter", ts("2026-03-01T00:00:00Z"));
    profile.weekly_goal = weekly_goal;
    profile.calculate_initial_stats();
    profile.calculate_potential_stats();
    profile.has_completed_onboarding = true;
    engine
        .store()
        .upsert_profile(&profile)
        .expect("Failed to store profile");
    profile
}

fn complete(
    engine: &ProgressionEngine,
    at: &str,
    category: WorkoutCategory,
    minutes: u32,
) -> Vec<OutcomeEvent> {
    let workout = CompletedWorkout::new("Session", category, minutes, ts(at));
    engine
        .complete_activity(workout)
        .expect("Failed to complete activity")
}

#[test]
fn test_full_first_day() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = create_engine(&dir);
    onboard(&engine, 5);
    engine.activate(ts("2026-03-02T08:00:00Z")).unwrap();

    let outcomes = complete(&engine, "2026-03-02T10:00:00Z", WorkoutCategory::Push, 30);

    // Base 80 + first-of-day 20
    let OutcomeEvent::XpAwarded { total, breakdown } = &outcomes[0] else {
        panic!("first outcome must be the XP award");
    };
    assert_eq!(*total, 100);
    let sum: u32 = breakdown.iter().map(|i| i.amount).sum();
    assert_eq!(sum, *total);

    // 100 XP crosses the first level boundary
    assert!(outcomes
        .iter()
        .any(|o| matches!(o, OutcomeEvent::LevelUp { new_level: 2, .. })));

    // Every credited XP amount has a ledger entry
    let profile = engine.store().fetch_profile().unwrap().unwrap();
    let ledger: u64 = engine
        .store()
        .fetch_xp_events()
        .unwrap()
        .iter()
        .map(|e| e.amount as u64)
        .sum();
    assert_eq!(profile.total_xp, ledger);
}

#[test]
fn test_level_rank_consistency_over_many_days() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = create_engine(&dir);
    onboard(&engine, 5);

    // Grind long workouts daily; rank D (500 XP) falls within the window
    let categories = [
        WorkoutCategory::Push,
        WorkoutCategory::Pull,
        WorkoutCategory::Core,
    ];
    let mut saw_rank_up = false;
    for day in 1..=28 {
        let at = format!("2026-03-{day:02}T09:00:00Z");
        engine.activate(ts(&at)).unwrap();
        let outcomes = complete(&engine, &at, categories[day % 3], 60);
        saw_rank_up |= outcomes
            .iter()
            .any(|o| matches!(o, OutcomeEvent::RankUp { .. }));

        // The cached level/rank always match the derivation at the point the
        // award stage ran; verify against the state before quest credits by
        // checking monotone consistency on the next read
        let profile = engine.store().fetch_profile().unwrap().unwrap();
        assert!(profile.current_level <= level::level_for_xp(profile.total_xp));
        assert!(profile.rank <= HunterRank::for_total_xp(profile.total_xp));
    }
    assert!(saw_rank_up, "a month of workouts must cross rank D");
}

#[test]
fn test_quest_lifecycle_across_days() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = create_engine(&dir);
    onboard(&engine, 7);

    engine.activate(ts("2026-03-02T08:00:00Z")).unwrap();
    let monday_quests = engine.store().fetch_quests().unwrap();
    assert_eq!(monday_quests.len(), 5);

    // Same-day reactivation changes nothing
    engine.activate(ts("2026-03-02T21:00:00Z")).unwrap();
    assert_eq!(engine.store().fetch_quests().unwrap().len(), 5);

    // Next day: 3 fresh dailies; expired ones linger in the grace window
    engine.activate(ts("2026-03-03T08:00:00Z")).unwrap();
    let tuesday_quests = engine.store().fetch_quests().unwrap();
    assert_eq!(tuesday_quests.len(), 8);

    // By Friday both stale daily sets are past the grace window
    engine.activate(ts("2026-03-06T08:00:00Z")).unwrap();
    let friday_quests = engine.store().fetch_quests().unwrap();
    let titles: Vec<&str> = friday_quests.iter().map(|q| q.title.as_str()).collect();
    assert_eq!(friday_quests.len(), 5); // 2 live weeklies + 3 fresh dailies
    assert!(titles.contains(&"Weekly Champion"));
    assert!(titles.contains(&"Well Rounded"));
}

#[test]
fn test_well_rounded_quest_completes_on_third_category() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = create_engine(&dir);
    onboard(&engine, 7);
    engine.activate(ts("2026-03-02T08:00:00Z")).unwrap();

    complete(&engine, "2026-03-02T09:00:00Z", WorkoutCategory::Push, 20);
    complete(&engine, "2026-03-03T09:00:00Z", WorkoutCategory::Pull, 20);
    let outcomes = complete(&engine, "2026-03-04T09:00:00Z", WorkoutCategory::Core, 20);

    let quest_titles: Vec<String> = outcomes
        .iter()
        .filter_map(|o| match o {
            OutcomeEvent::QuestCompleted { title, .. } => Some(title.clone()),
            _ => None,
        })
        .collect();
    assert!(quest_titles.contains(&"Well Rounded".to_string()));

    let quests = engine.store().fetch_quests().unwrap();
    let well_rounded = quests.iter().find(|q| q.title == "Well Rounded").unwrap();
    assert!(well_rounded.completed);
    assert_eq!(well_rounded.current_progress, 3);
}

#[test]
fn test_achievement_unlock_creates_single_event() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = create_engine(&dir);
    onboard(&engine, 7);
    engine.activate(ts("2026-03-02T08:00:00Z")).unwrap();

    // Ten workouts across ten days unlock "workouts_10" exactly once
    for day in 2..=11 {
        let at = format!("2026-03-{day:02}T09:00:00Z");
        engine.activate(ts(&at)).unwrap();
        complete(&engine, &at, WorkoutCategory::Push, 20);
    }

    let achievements = engine.store().fetch_achievements().unwrap();
    let dedicated = achievements.iter().find(|a| a.key == "workouts_10").unwrap();
    assert!(dedicated.unlocked);
    assert_eq!(dedicated.progress, 10);
    assert_eq!(dedicated.xp_reward, 100);

    let events = engine.store().fetch_xp_events().unwrap();
    let unlock_events: Vec<_> = events
        .iter()
        .filter(|e| e.source == XpSource::AchievementUnlock)
        .filter(|e| e.source_name.as_deref() == Some("Dedicated"))
        .collect();
    assert_eq!(unlock_events.len(), 1);
    assert_eq!(unlock_events[0].amount, 100);
}

#[test]
fn test_streak_milestone_achievement() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = create_engine(&dir);
    onboard(&engine, 7);

    for day in 2..=8 {
        let at = format!("2026-03-{day:02}T09:00:00Z");
        engine.activate(ts(&at)).unwrap();
        complete(&engine, &at, WorkoutCategory::Core, 20);
    }

    // Seven consecutive days: streak_7 unlocked, streak_30 tracking
    let achievements = engine.store().fetch_achievements().unwrap();
    let week = achievements.iter().find(|a| a.key == "streak_7").unwrap();
    assert!(week.unlocked);
    let month = achievements.iter().find(|a| a.key == "streak_30").unwrap();
    assert!(!month.unlocked);
    assert_eq!(month.progress, 7);
}

#[test]
fn test_gap_resets_streak_bonus() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = create_engine(&dir);
    onboard(&engine, 7);

    complete(&engine, "2026-03-02T09:00:00Z", WorkoutCategory::Push, 20);
    complete(&engine, "2026-03-03T09:00:00Z", WorkoutCategory::Push, 20);
    // Two-day gap
    let outcomes = complete(&engine, "2026-03-06T09:00:00Z", WorkoutCategory::Push, 20);

    let OutcomeEvent::XpAwarded { breakdown, .. } = &outcomes[0] else {
        panic!("first outcome must be the XP award");
    };
    assert!(breakdown
        .iter()
        .all(|item| item.source != XpSource::DailyStreak));
}

#[test]
fn test_missing_profile_is_fatal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let engine = create_engine(&dir);

    let workout = CompletedWorkout::new(
        "Session",
        WorkoutCategory::Push,
        30,
        ts("2026-03-02T10:00:00Z"),
    );
    let result = engine.complete_activity(workout);
    assert!(result.is_err());
}

#[test]
fn test_history_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("arise.db");

    {
        let store = Store::open(&db_path).unwrap();
        let engine = ProgressionEngine::new(store);
        onboard(&engine, 5);
        engine.activate(ts("2026-03-02T08:00:00Z")).unwrap();
        complete(&engine, "2026-03-02T09:00:00Z", WorkoutCategory::Pull, 25);
    }

    let store = Store::open(&db_path).unwrap();
    let profile = store.fetch_profile().unwrap().unwrap();
    assert!(profile.total_xp > 0);
    assert_eq!(store.fetch_workouts().unwrap().len(), 1);
    assert_eq!(store.fetch_achievements().unwrap().len(), 18);
}
