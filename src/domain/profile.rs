//! Player profile: onboarding inputs, stats, and cached progression state

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rank::HunterRank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    BuildMuscle,
    LoseWeight,
    LookBetter,
    StayInShape,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuildMuscle => "build_muscle",
            Self::LoseWeight => "lose_weight",
            Self::LookBetter => "look_better",
            Self::StayInShape => "stay_in_shape",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "build_muscle" => Some(Self::BuildMuscle),
            "lose_weight" => Some(Self::LoseWeight),
            "look_better" => Some(Self::LookBetter),
            "stay_in_shape" => Some(Self::StayInShape),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BuildMuscle => "Build Muscle",
            Self::LoseWeight => "Lose Weight",
            Self::LookBetter => "Look Better",
            Self::StayInShape => "Stay In Shape",
        }
    }
}

/// Self-reported training experience; drives the initial stat baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Baseline multiplier for the initial stat formula
    pub fn base_stat_multiplier(&self) -> f64 {
        match self {
            Self::Beginner => 0.3,
            Self::Intermediate => 0.5,
            Self::Advanced => 0.7,
        }
    }
}

/// Day-to-day activity outside of training; additive bonus in the stat formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly_active",
            Self::ModeratelyActive => "moderately_active",
            Self::VeryActive => "very_active",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sedentary" => Some(Self::Sedentary),
            "lightly_active" => Some(Self::LightlyActive),
            "moderately_active" => Some(Self::ModeratelyActive),
            "very_active" => Some(Self::VeryActive),
            _ => None,
        }
    }

    /// Additive bonus for the initial stat formula
    pub fn stat_bonus(&self) -> f64 {
        match self {
            Self::Sedentary => 0.0,
            Self::LightlyActive => 0.05,
            Self::ModeratelyActive => 0.1,
            Self::VeryActive => 0.15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusArea {
    Chest,
    Back,
    Shoulders,
    Arms,
    Core,
    Legs,
    FullBody,
}

impl FocusArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Arms => "arms",
            Self::Core => "core",
            Self::Legs => "legs",
            Self::FullBody => "full_body",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chest" => Some(Self::Chest),
            "back" => Some(Self::Back),
            "shoulders" => Some(Self::Shoulders),
            "arms" => Some(Self::Arms),
            "core" => Some(Self::Core),
            "legs" => Some(Self::Legs),
            "full_body" => Some(Self::FullBody),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    NoEquipment,
    Dumbbells,
    Barbells,
    Kettlebells,
    ResistanceBands,
    PullUpBar,
    Cables,
    FullGym,
}

impl Equipment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoEquipment => "no_equipment",
            Self::Dumbbells => "dumbbells",
            Self::Barbells => "barbells",
            Self::Kettlebells => "kettlebells",
            Self::ResistanceBands => "resistance_bands",
            Self::PullUpBar => "pull_up_bar",
            Self::Cables => "cables",
            Self::FullGym => "full_gym",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "no_equipment" => Some(Self::NoEquipment),
            "dumbbells" => Some(Self::Dumbbells),
            "barbells" => Some(Self::Barbells),
            "kettlebells" => Some(Self::Kettlebells),
            "resistance_bands" => Some(Self::ResistanceBands),
            "pull_up_bar" => Some(Self::PullUpBar),
            "cables" => Some(Self::Cables),
            "full_gym" => Some(Self::FullGym),
            _ => None,
        }
    }
}

/// The mutable root of progression state.
///
/// Created once at onboarding completion and mutated exclusively through the
/// progression engine's award pipeline. `current_level` and `rank` are caches
/// re-derived from `total_xp` on every workout award.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: Uuid,
    pub display_name: String,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,

    pub fitness_level: FitnessLevel,
    pub activity_level: ActivityLevel,
    pub goal: FitnessGoal,
    pub focus_areas: Vec<FocusArea>,
    pub equipment: Vec<Equipment>,
    pub motivations: Vec<String>,

    /// Mirrors `total_xp` in the current design; kept separate for future
    /// spend/decay semantics.
    pub current_xp: u64,
    pub total_xp: u64,
    pub current_level: u32,
    pub rank: HunterRank,

    // Stats on a 0-100 scale, set once at onboarding
    pub strength: u32,
    pub vitality: u32,
    pub agility: u32,
    pub recovery: u32,

    // Projected ceilings, never mechanically applied
    pub potential_strength: u32,
    pub potential_vitality: u32,
    pub potential_agility: u32,
    pub potential_recovery: u32,

    /// Workout days as Monday-based indices (0 = Monday .. 6 = Sunday)
    pub workout_days: Vec<u8>,
    pub weekly_goal: u32,
    pub preferred_workout_duration: u32,

    pub has_completed_onboarding: bool,
    pub onboarding_completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl PlayerProfile {
    pub fn new(display_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            gender: None,
            birth_date: None,
            height_cm: None,
            weight_kg: None,
            target_weight_kg: None,
            fitness_level: FitnessLevel::Beginner,
            activity_level: ActivityLevel::Sedentary,
            goal: FitnessGoal::StayInShape,
            focus_areas: Vec::new(),
            equipment: Vec::new(),
            motivations: Vec::new(),
            current_xp: 0,
            total_xp: 0,
            current_level: 1,
            rank: HunterRank::E,
            strength: 10,
            vitality: 10,
            agility: 10,
            recovery: 10,
            potential_strength: 80,
            potential_vitality: 80,
            potential_agility: 80,
            potential_recovery: 80,
            workout_days: Vec::new(),
            weekly_goal: 3,
            preferred_workout_duration: 30,
            has_completed_onboarding: false,
            onboarding_completed_at: None,
            created_at,
        }
    }

    /// Credit XP without re-deriving level or rank.
    ///
    /// Level/rank derivation is the orchestrator's job; see the engine's
    /// award stage.
    pub fn credit_xp(&mut self, amount: u64) {
        self.total_xp += amount;
        self.current_xp = self.total_xp;
    }

    pub fn total_stats(&self) -> u32 {
        self.strength + self.vitality + self.agility + self.recovery
    }

    pub fn average_stats(&self) -> u32 {
        self.total_stats() / 4
    }

    pub fn potential_total_stats(&self) -> u32 {
        self.potential_strength
            + self.potential_vitality
            + self.potential_agility
            + self.potential_recovery
    }

    /// Seed the four stats from the onboarding inputs.
    ///
    /// base = floor((level multiplier + activity bonus) * 100), focus areas
    /// grant +5 to one stat each, everything clamped to [5, 50].
    pub fn calculate_initial_stats(&mut self) {
        let base = ((self.fitness_level.base_stat_multiplier()
            + self.activity_level.stat_bonus())
            * 100.0) as u32;

        let upper_body_focus = self.focus_areas.contains(&FocusArea::Chest)
            || self.focus_areas.contains(&FocusArea::Arms);
        let full_body_focus = self.focus_areas.contains(&FocusArea::FullBody);
        let legs_focus = self.focus_areas.contains(&FocusArea::Legs);

        self.strength = clamp_stat(base + if upper_body_focus { 5 } else { 0 });
        self.vitality = clamp_stat(base + if full_body_focus { 5 } else { 0 });
        self.agility = clamp_stat(base + if legs_focus { 5 } else { 0 });
        self.recovery = clamp_stat(base);
    }

    /// Seed the potential stats; always well above current, capped at 95.
    pub fn calculate_potential_stats(&mut self) {
        self.potential_strength = (self.strength + 40).min(95);
        self.potential_vitality = (self.vitality + 40).min(95);
        self.potential_agility = (self.agility + 40).min(95);
        self.potential_recovery = (self.recovery + 40).min(95);
    }

    /// XP into the current rank as a fraction of the rank band (1.0 at S)
    pub fn rank_progress(&self) -> f64 {
        match self.rank.xp_to_next_rank() {
            Some(span) => {
                let into_rank = self.total_xp - self.rank.xp_threshold();
                into_rank as f64 / span as f64
            }
            None => 1.0,
        }
    }

    pub fn xp_to_next_rank(&self) -> Option<u64> {
        self.rank
            .next_rank()
            .map(|next| next.xp_threshold().saturating_sub(self.total_xp))
    }
}

fn clamp_stat(value: u32) -> u32 {
    value.clamp(5, 50)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-03-02T10:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_initial_stats_beginner_sedentary() {
        let mut profile = PlayerProfile::new("Hunter", now());
        profile.fitness_level = FitnessLevel::Beginner;
        profile.activity_level = ActivityLevel::Sedentary;
        profile.calculate_initial_stats();

        // base = (0.3 + 0.0) * 100 = 30, no focus bonuses
        assert_eq!(profile.strength, 30);
        assert_eq!(profile.vitality, 30);
        assert_eq!(profile.agility, 30);
        assert_eq!(profile.recovery, 30);
    }

    #[test]
    fn test_initial_stats_focus_bonuses() {
        let mut profile = PlayerProfile::new("Hunter", now());
        profile.fitness_level = FitnessLevel::Intermediate;
        profile.activity_level = ActivityLevel::ModeratelyActive;
        profile.focus_areas = vec![FocusArea::Arms, FocusArea::Legs];
        profile.calculate_initial_stats();

        // base = (0.5 + 0.1) * 100 = 60, clamped to 50; bonuses can't push past the cap
        assert_eq!(profile.strength, 50);
        assert_eq!(profile.agility, 50);
        assert_eq!(profile.vitality, 50);
        assert_eq!(profile.recovery, 50);
    }

    #[test]
    fn test_initial_stats_chest_focus_boosts_strength() {
        let mut profile = PlayerProfile::new("Hunter", now());
        profile.fitness_level = FitnessLevel::Beginner;
        profile.activity_level = ActivityLevel::LightlyActive;
        profile.focus_areas = vec![FocusArea::Chest];
        profile.calculate_initial_stats();

        // base = (0.3 + 0.05) * 100 = 35
        assert_eq!(profile.strength, 40);
        assert_eq!(profile.vitality, 35);
        assert_eq!(profile.recovery, 35);
    }

    #[test]
    fn test_potential_stats_capped() {
        let mut profile = PlayerProfile::new("Hunter", now());
        profile.strength = 30;
        profile.vitality = 50;
        profile.agility = 60;
        profile.recovery = 5;
        profile.calculate_potential_stats();

        assert_eq!(profile.potential_strength, 70);
        assert_eq!(profile.potential_vitality, 90);
        assert_eq!(profile.potential_agility, 95);
        assert_eq!(profile.potential_recovery, 45);
    }

    #[test]
    fn test_credit_xp_mirrors_current() {
        let mut profile = PlayerProfile::new("Hunter", now());
        profile.credit_xp(120);
        profile.credit_xp(30);
        assert_eq!(profile.total_xp, 150);
        assert_eq!(profile.current_xp, 150);
    }
}
