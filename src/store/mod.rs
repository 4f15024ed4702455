//! Persistence port for the progression engine
//!
//! A thin object store over SQLite with stable string identities. The engine
//! stages all mutations for one workout completion in memory and commits
//! them here in a single transaction, so a failed write never leaves
//! partially credited XP behind.

mod db;
mod records;

pub use db::Db;
pub use records::{AchievementRow, ProfileRow, QuestRow, WorkoutRow, XpEventRow};

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::domain::{Achievement, CompletedWorkout, PlayerProfile, Quest, XpEvent};

/// Central handle for progression persistence
#[derive(Clone)]
pub struct Store {
    db: Db,
}

impl Store {
    /// Open or create the store at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        let db = Db::open(path)?;
        Ok(Self { db })
    }

    /// Delete all progression data
    pub fn reset_all(&self) -> Result<()> {
        self.db.reset_all()
    }

    // ========================================
    // PROFILE
    // ========================================

    /// Fetch the player profile, if onboarding has created one
    pub fn fetch_profile(&self) -> Result<Option<PlayerProfile>> {
        let conn = self.db.conn();
        let row = conn
            .query_row(
                "SELECT * FROM player_profile LIMIT 1",
                [],
                Self::map_profile_row,
            )
            .optional()
            .context("Failed to read player profile")?;
        drop(conn);

        row.map(ProfileRow::into_domain).transpose()
    }

    /// Insert or replace the player profile
    pub fn upsert_profile(&self, profile: &PlayerProfile) -> Result<()> {
        let conn = self.db.conn();
        Self::upsert_profile_with(&conn, profile)
    }

    fn map_profile_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProfileRow> {
        Ok(ProfileRow {
            id: row.get("id")?,
            display_name: row.get("display_name")?,
            gender: row.get("gender")?,
            birth_date: row.get("birth_date")?,
            height_cm: row.get("height_cm")?,
            weight_kg: row.get("weight_kg")?,
            target_weight_kg: row.get("target_weight_kg")?,
            fitness_level: row.get("fitness_level")?,
            activity_level: row.get("activity_level")?,
            goal: row.get("goal")?,
            focus_areas: row.get("focus_areas")?,
            equipment: row.get("equipment")?,
            motivations: row.get("motivations")?,
            current_xp: row.get("current_xp")?,
            total_xp: row.get("total_xp")?,
            current_level: row.get("current_level")?,
            rank: row.get("rank")?,
            strength: row.get("strength")?,
            vitality: row.get("vitality")?,
            agility: row.get("agility")?,
            recovery: row.get("recovery")?,
            potential_strength: row.get("potential_strength")?,
            potential_vitality: row.get("potential_vitality")?,
            potential_agility: row.get("potential_agility")?,
            potential_recovery: row.get("potential_recovery")?,
            workout_days: row.get("workout_days")?,
            weekly_goal: row.get("weekly_goal")?,
            preferred_workout_duration: row.get("preferred_workout_duration")?,
            has_completed_onboarding: row.get("has_completed_onboarding")?,
            onboarding_completed_at: row.get("onboarding_completed_at")?,
            created_at: row.get("created_at")?,
        })
    }

    fn upsert_profile_with(conn: &Connection, profile: &PlayerProfile) -> Result<()> {
        let row = ProfileRow::from_domain(profile);
        conn.execute(
            r#"INSERT OR REPLACE INTO player_profile
               (id, display_name, gender, birth_date, height_cm, weight_kg, target_weight_kg,
                fitness_level, activity_level, goal, focus_areas, equipment, motivations,
                current_xp, total_xp, current_level, rank,
                strength, vitality, agility, recovery,
                potential_strength, potential_vitality, potential_agility, potential_recovery,
                workout_days, weekly_goal, preferred_workout_duration,
                has_completed_onboarding, onboarding_completed_at, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                       ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31)"#,
            params![
                row.id,
                row.display_name,
                row.gender,
                row.birth_date,
                row.height_cm,
                row.weight_kg,
                row.target_weight_kg,
                row.fitness_level,
                row.activity_level,
                row.goal,
                row.focus_areas,
                row.equipment,
                row.motivations,
                row.current_xp,
                row.total_xp,
                row.current_level,
                row.rank,
                row.strength,
                row.vitality,
                row.agility,
                row.recovery,
                row.potential_strength,
                row.potential_vitality,
                row.potential_agility,
                row.potential_recovery,
                row.workout_days,
                row.weekly_goal,
                row.preferred_workout_duration,
                row.has_completed_onboarding as i32,
                row.onboarding_completed_at,
                row.created_at,
            ],
        )
        .context("Failed to write player profile")?;
        Ok(())
    }

    // ========================================
    // WORKOUT HISTORY
    // ========================================

    /// All completed workouts, oldest first
    pub fn fetch_workouts(&self) -> Result<Vec<CompletedWorkout>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, workout_name, category, duration_minutes, completed_at
             FROM completed_workouts ORDER BY completed_at, id",
        )?;
        let rows: Vec<WorkoutRow> = stmt
            .query_map([], |row| {
                Ok(WorkoutRow {
                    id: row.get(0)?,
                    workout_name: row.get(1)?,
                    category: row.get(2)?,
                    duration_minutes: row.get(3)?,
                    completed_at: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        drop(stmt);
        drop(conn);

        rows.into_iter().map(WorkoutRow::into_domain).collect()
    }

    fn insert_workout_with(conn: &Connection, workout: &CompletedWorkout) -> Result<()> {
        let row = WorkoutRow::from_domain(workout);
        conn.execute(
            "INSERT OR REPLACE INTO completed_workouts
             (id, workout_name, category, duration_minutes, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                row.id,
                row.workout_name,
                row.category,
                row.duration_minutes,
                row.completed_at
            ],
        )
        .context("Failed to write completed workout")?;
        Ok(())
    }

    // ========================================
    // QUESTS
    // ========================================

    /// All stored quests, oldest first
    pub fn fetch_quests(&self) -> Result<Vec<Quest>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, title, description, quest_type, kind, category, target_count,
                    current_progress, xp_reward, completed, completed_at, expires_at, created_at
             FROM quests ORDER BY created_at, id",
        )?;
        let rows: Vec<QuestRow> = stmt
            .query_map([], |row| {
                Ok(QuestRow {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    description: row.get(2)?,
                    quest_type: row.get(3)?,
                    kind: row.get(4)?,
                    category: row.get(5)?,
                    target_count: row.get(6)?,
                    current_progress: row.get(7)?,
                    xp_reward: row.get(8)?,
                    completed: row.get(9)?,
                    completed_at: row.get(10)?,
                    expires_at: row.get(11)?,
                    created_at: row.get(12)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        drop(stmt);
        drop(conn);

        rows.into_iter().map(QuestRow::into_domain).collect()
    }

    fn upsert_quest_with(conn: &Connection, quest: &Quest) -> Result<()> {
        let row = QuestRow::from_domain(quest);
        conn.execute(
            r#"INSERT OR REPLACE INTO quests
               (id, title, description, quest_type, kind, category, target_count,
                current_progress, xp_reward, completed, completed_at, expires_at, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"#,
            params![
                row.id,
                row.title,
                row.description,
                row.quest_type,
                row.kind,
                row.category,
                row.target_count,
                row.current_progress,
                row.xp_reward,
                row.completed as i32,
                row.completed_at,
                row.expires_at,
                row.created_at,
            ],
        )
        .context("Failed to write quest")?;
        Ok(())
    }

    // ========================================
    // ACHIEVEMENTS
    // ========================================

    /// All seeded achievements
    pub fn fetch_achievements(&self) -> Result<Vec<Achievement>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, key, title, description, tier, category, xp_reward, icon,
                    unlocked, unlocked_at, progress, target_progress, created_at
             FROM achievements ORDER BY created_at, id",
        )?;
        let rows: Vec<AchievementRow> = stmt
            .query_map([], |row| {
                Ok(AchievementRow {
                    id: row.get(0)?,
                    key: row.get(1)?,
                    title: row.get(2)?,
                    description: row.get(3)?,
                    tier: row.get(4)?,
                    category: row.get(5)?,
                    xp_reward: row.get(6)?,
                    icon: row.get(7)?,
                    unlocked: row.get(8)?,
                    unlocked_at: row.get(9)?,
                    progress: row.get(10)?,
                    target_progress: row.get(11)?,
                    created_at: row.get(12)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        drop(stmt);
        drop(conn);

        rows.into_iter().map(AchievementRow::into_domain).collect()
    }

    fn upsert_achievement_with(conn: &Connection, achievement: &Achievement) -> Result<()> {
        let row = AchievementRow::from_domain(achievement);
        conn.execute(
            r#"INSERT OR REPLACE INTO achievements
               (id, key, title, description, tier, category, xp_reward, icon,
                unlocked, unlocked_at, progress, target_progress, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"#,
            params![
                row.id,
                row.key,
                row.title,
                row.description,
                row.tier,
                row.category,
                row.xp_reward,
                row.icon,
                row.unlocked as i32,
                row.unlocked_at,
                row.progress,
                row.target_progress,
                row.created_at,
            ],
        )
        .context("Failed to write achievement")?;
        Ok(())
    }

    // ========================================
    // XP LEDGER
    // ========================================

    /// All XP events, newest first
    pub fn fetch_xp_events(&self) -> Result<Vec<XpEvent>> {
        let conn = self.db.conn();
        let mut stmt = conn.prepare(
            "SELECT id, amount, source_type, source_id, source_name, earned_at
             FROM xp_events ORDER BY earned_at DESC, id",
        )?;
        let rows: Vec<XpEventRow> = stmt
            .query_map([], |row| {
                Ok(XpEventRow {
                    id: row.get(0)?,
                    amount: row.get(1)?,
                    source_type: row.get(2)?,
                    source_id: row.get(3)?,
                    source_name: row.get(4)?,
                    earned_at: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        drop(stmt);
        drop(conn);

        rows.into_iter().map(XpEventRow::into_domain).collect()
    }

    fn insert_xp_event_with(conn: &Connection, event: &XpEvent) -> Result<()> {
        let row = XpEventRow::from_domain(event);
        conn.execute(
            "INSERT INTO xp_events (id, amount, source_type, source_id, source_name, earned_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row.id,
                row.amount,
                row.source_type,
                row.source_id,
                row.source_name,
                row.earned_at
            ],
        )
        .context("Failed to write xp event")?;
        Ok(())
    }

    // ========================================
    // TRANSACTIONAL WRITES
    // ========================================

    /// Apply an activation pass: purge stale quests, insert fresh quests and
    /// newly seeded achievements. One transaction.
    pub fn apply_activation(
        &self,
        purged_quests: &[Uuid],
        created_quests: &[Quest],
        seeded_achievements: &[Achievement],
    ) -> Result<()> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        for quest_id in purged_quests {
            tx.execute(
                "DELETE FROM quests WHERE id = ?1",
                params![quest_id.to_string()],
            )
            .context("Failed to purge quest")?;
        }
        for quest in created_quests {
            Self::upsert_quest_with(&tx, quest)?;
        }
        for achievement in seeded_achievements {
            Self::upsert_achievement_with(&tx, achievement)?;
        }

        tx.commit().context("Failed to commit activation")?;
        Ok(())
    }

    /// Commit the full mutation set of one workout completion atomically:
    /// the new history row, the updated profile, every touched quest and
    /// achievement, and the XP ledger entries.
    pub fn commit_completion(
        &self,
        workout: &CompletedWorkout,
        profile: &PlayerProfile,
        quests: &[Quest],
        achievements: &[Achievement],
        xp_events: &[XpEvent],
    ) -> Result<()> {
        let mut conn = self.db.conn();
        let tx = conn.transaction()?;

        Self::insert_workout_with(&tx, workout)?;
        Self::upsert_profile_with(&tx, profile)?;
        for quest in quests {
            Self::upsert_quest_with(&tx, quest)?;
        }
        for achievement in achievements {
            Self::upsert_achievement_with(&tx, achievement)?;
        }
        for event in xp_events {
            Self::insert_xp_event_with(&tx, event)?;
        }

        tx.commit().context("Failed to commit workout completion")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HunterRank, WorkoutCategory, XpSource};
    use chrono::{DateTime, Utc};
    use tempfile::tempdir;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn open_store(dir: &tempfile::TempDir) -> Store {
        Store::open(&dir.path().join("test_arise.db")).unwrap()
    }

    #[test]
    fn test_profile_roundtrip() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        assert!(store.fetch_profile().unwrap().is_none());

        let mut profile = PlayerProfile::new("Hunter", ts("2026-03-01T00:00:00Z"));
        profile.rank = HunterRank::D;
        profile.credit_xp(600);
        store.upsert_profile(&profile).unwrap();

        let loaded = store.fetch_profile().unwrap().unwrap();
        assert_eq!(loaded.id, profile.id);
        assert_eq!(loaded.total_xp, 600);
        assert_eq!(loaded.rank, HunterRank::D);
    }

    #[test]
    fn test_commit_completion_writes_everything() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let now = ts("2026-03-02T10:00:00Z");
        let mut profile = PlayerProfile::new("Hunter", ts("2026-03-01T00:00:00Z"));
        profile.credit_xp(80);

        let workout = CompletedWorkout::new("Push Day", WorkoutCategory::Push, 30, now);
        let mut quest = Quest::complete_workouts(1, ts("2026-03-02T23:59:59Z"), now);
        quest.increment_progress(1, now);
        let event = XpEvent::workout_completion("Push Day", workout.id, 80, now);

        store
            .commit_completion(&workout, &profile, &[quest.clone()], &[], &[event])
            .unwrap();

        let workouts = store.fetch_workouts().unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].workout_name, "Push Day");

        let quests = store.fetch_quests().unwrap();
        assert_eq!(quests.len(), 1);
        assert!(quests[0].completed);

        let events = store.fetch_xp_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].source, XpSource::WorkoutCompletion);

        assert_eq!(store.fetch_profile().unwrap().unwrap().total_xp, 80);
    }

    #[test]
    fn test_apply_activation_purges_and_inserts() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let monday = ts("2026-03-02T09:00:00Z");
        let stale = Quest::complete_workouts(1, ts("2026-02-27T23:59:59Z"), ts("2026-02-27T09:00:00Z"));
        store.apply_activation(&[], &[stale.clone()], &[]).unwrap();

        let fresh = Quest::complete_workouts(1, ts("2026-03-02T23:59:59Z"), monday);
        store
            .apply_activation(&[stale.id], &[fresh.clone()], &[])
            .unwrap();

        let quests = store.fetch_quests().unwrap();
        assert_eq!(quests.len(), 1);
        assert_eq!(quests[0].id, fresh.id);
    }

    #[test]
    fn test_workout_history_is_ordered() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let profile = PlayerProfile::new("Hunter", ts("2026-03-01T00:00:00Z"));

        for at in ["2026-03-03T08:00:00Z", "2026-03-01T08:00:00Z", "2026-03-02T08:00:00Z"] {
            let workout = CompletedWorkout::new("Session", WorkoutCategory::Core, 20, ts(at));
            store
                .commit_completion(&workout, &profile, &[], &[], &[])
                .unwrap();
        }

        let workouts = store.fetch_workouts().unwrap();
        let days: Vec<u32> = workouts
            .iter()
            .map(|w| {
                use chrono::Datelike;
                w.completed_at.day()
            })
            .collect();
        assert_eq!(days, vec![1, 2, 3]);
    }
}
