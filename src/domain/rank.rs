//! Hunter rank ladder
//!
//! Ranks are a coarse progression tier derived purely from lifetime XP.
//! They are totally ordered E < D < C < B < A < S.

use serde::{Deserialize, Serialize};

/// Hunter rank, derived from total XP via a fixed threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HunterRank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl HunterRank {
    /// Total XP required to reach this rank
    pub fn xp_threshold(&self) -> u64 {
        match self {
            Self::E => 0,
            Self::D => 500,
            Self::C => 2_000,
            Self::B => 5_000,
            Self::A => 12_000,
            Self::S => 25_000,
        }
    }

    /// Determine rank from total XP (highest rank whose threshold is met)
    pub fn for_total_xp(xp: u64) -> Self {
        Self::all()
            .iter()
            .rev()
            .copied()
            .find(|r| xp >= r.xp_threshold())
            .unwrap_or(Self::E)
    }

    /// The next rank up, if any
    pub fn next_rank(&self) -> Option<Self> {
        match self {
            Self::E => Some(Self::D),
            Self::D => Some(Self::C),
            Self::C => Some(Self::B),
            Self::B => Some(Self::A),
            Self::A => Some(Self::S),
            Self::S => None,
        }
    }

    /// XP needed to advance from this rank to the next (None at S)
    pub fn xp_to_next_rank(&self) -> Option<u64> {
        self.next_rank()
            .map(|next| next.xp_threshold() - self.xp_threshold())
    }

    /// Get the string ID for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E => "e",
            Self::D => "d",
            Self::C => "c",
            Self::B => "b",
            Self::A => "a",
            Self::S => "s",
        }
    }

    /// Parse from database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "e" => Some(Self::E),
            "d" => Some(Self::D),
            "c" => Some(Self::C),
            "b" => Some(Self::B),
            "a" => Some(Self::A),
            "s" => Some(Self::S),
            _ => None,
        }
    }

    /// Display label, e.g. "Rank E"
    pub fn display_name(&self) -> String {
        format!("Rank {}", self.letter())
    }

    /// The rank letter
    pub fn letter(&self) -> &'static str {
        match self {
            Self::E => "E",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
        }
    }

    /// Honorific title attached to the rank
    pub fn title(&self) -> &'static str {
        match self {
            Self::E => "Awakened",
            Self::D => "Hunter",
            Self::C => "Warrior",
            Self::B => "Elite",
            Self::A => "Champion",
            Self::S => "Shadow Monarch",
        }
    }

    /// All ranks in ascending order
    pub fn all() -> &'static [HunterRank] {
        &[Self::E, Self::D, Self::C, Self::B, Self::A, Self::S]
    }
}
