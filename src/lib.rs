//! Arise - hunter-style fitness progression engine
//!
//! Arise turns completed workouts into experience points, levels, hunter
//! ranks, quest progress, and achievement unlocks, with deterministic rules
//! and an append-only XP ledger backed by SQLite.
//!
//! ## Structure
//!
//! - [`domain`] - core types: player profile, workouts, quests, achievements,
//!   the XP ledger, and the rank ladder
//! - [`progression`] - the engine: leveling math, XP awards, quest
//!   generation/matching, achievement evaluation, and the orchestrator that
//!   composes them into a single "complete a workout" transaction
//! - [`store`] - SQLite persistence with validated enum parsing and
//!   all-or-nothing commits
//! - [`config`] - `~/.arise/` data directory and config file

pub mod config;
pub mod domain;
pub mod progression;
pub mod store;

pub use domain::*;
