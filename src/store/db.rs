//! SQLite connection and schema management for the progression store
//!
//! Manages the `~/.arise/arise.db` database with automatic schema migration.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Database wrapper shared by the engine and the CLI
#[derive(Clone)]
pub struct Db {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Open or create the progression database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progression db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the connection
    pub fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("Progression DB lock poisoned")
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Delete all progression data (reset to a fresh install)
    pub fn reset_all(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(
            r#"
            DELETE FROM xp_events;
            DELETE FROM quests;
            DELETE FROM achievements;
            DELETE FROM completed_workouts;
            DELETE FROM player_profile;
            "#,
        )?;
        Ok(())
    }
}

/// SQL schema for the progression database
const SCHEMA_SQL: &str = r#"
-- Player profile (single progression aggregate)
CREATE TABLE IF NOT EXISTS player_profile (
    id TEXT PRIMARY KEY,
    display_name TEXT NOT NULL,
    gender TEXT,
    birth_date TEXT,
    height_cm REAL,
    weight_kg REAL,
    target_weight_kg REAL,
    fitness_level TEXT NOT NULL,
    activity_level TEXT NOT NULL,
    goal TEXT NOT NULL,
    focus_areas TEXT NOT NULL DEFAULT '',
    equipment TEXT NOT NULL DEFAULT '',
    motivations TEXT NOT NULL DEFAULT '',
    current_xp INTEGER NOT NULL DEFAULT 0,
    total_xp INTEGER NOT NULL DEFAULT 0,
    current_level INTEGER NOT NULL DEFAULT 1,
    rank TEXT NOT NULL DEFAULT 'e',
    strength INTEGER NOT NULL DEFAULT 10,
    vitality INTEGER NOT NULL DEFAULT 10,
    agility INTEGER NOT NULL DEFAULT 10,
    recovery INTEGER NOT NULL DEFAULT 10,
    potential_strength INTEGER NOT NULL DEFAULT 80,
    potential_vitality INTEGER NOT NULL DEFAULT 80,
    potential_agility INTEGER NOT NULL DEFAULT 80,
    potential_recovery INTEGER NOT NULL DEFAULT 80,
    workout_days TEXT NOT NULL DEFAULT '',
    weekly_goal INTEGER NOT NULL DEFAULT 3,
    preferred_workout_duration INTEGER NOT NULL DEFAULT 30,
    has_completed_onboarding INTEGER NOT NULL DEFAULT 0,
    onboarding_completed_at INTEGER,
    created_at INTEGER NOT NULL
);

-- Completed workout history (one row per finished workout, kept forever)
CREATE TABLE IF NOT EXISTS completed_workouts (
    id TEXT PRIMARY KEY,
    workout_name TEXT NOT NULL,
    category TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL,
    completed_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_workout_completed_at ON completed_workouts(completed_at);
CREATE INDEX IF NOT EXISTS idx_workout_category ON completed_workouts(category);

-- Daily and weekly quests
CREATE TABLE IF NOT EXISTS quests (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    quest_type TEXT NOT NULL,
    kind TEXT NOT NULL,
    category TEXT,
    target_count INTEGER NOT NULL,
    current_progress INTEGER NOT NULL DEFAULT 0,
    xp_reward INTEGER NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    completed_at INTEGER,
    expires_at INTEGER NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_quest_type ON quests(quest_type);
CREATE INDEX IF NOT EXISTS idx_quest_expires_at ON quests(expires_at);

-- Seeded achievements (one row per catalog definition, never deleted)
CREATE TABLE IF NOT EXISTS achievements (
    id TEXT PRIMARY KEY,
    key TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    tier TEXT NOT NULL,
    category TEXT NOT NULL,
    xp_reward INTEGER NOT NULL,
    icon TEXT NOT NULL,
    unlocked INTEGER NOT NULL DEFAULT 0,
    unlocked_at INTEGER,
    progress INTEGER NOT NULL DEFAULT 0,
    target_progress INTEGER NOT NULL,
    created_at INTEGER NOT NULL
);

-- Append-only XP ledger
CREATE TABLE IF NOT EXISTS xp_events (
    id TEXT PRIMARY KEY,
    amount INTEGER NOT NULL,
    source_type TEXT NOT NULL,
    source_id TEXT,
    source_name TEXT,
    earned_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_xp_earned_at ON xp_events(earned_at);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;
