//! Onboard command implementation

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;

use arise::config::Config;
use arise::domain::{ActivityLevel, Equipment, FitnessGoal, FitnessLevel, FocusArea, PlayerProfile};
use arise::store::Store;

#[derive(Args)]
pub struct OnboardArgs {
    /// Display name for the profile
    #[arg(long, default_value = "Hunter")]
    pub name: String,

    /// Training experience: beginner, intermediate, advanced
    #[arg(long, default_value = "beginner")]
    pub fitness_level: String,

    /// Day-to-day activity: sedentary, lightly_active, moderately_active, very_active
    #[arg(long, default_value = "sedentary")]
    pub activity_level: String,

    /// Goal: build_muscle, lose_weight, look_better, stay_in_shape
    #[arg(long, default_value = "stay_in_shape")]
    pub goal: String,

    /// Focus areas (repeatable): chest, back, shoulders, arms, core, legs, full_body
    #[arg(long = "focus")]
    pub focus_areas: Vec<String>,

    /// Available equipment (repeatable)
    #[arg(long = "equipment")]
    pub equipment: Vec<String>,

    /// Workouts per week to aim for (defaults to the configured goal)
    #[arg(long)]
    pub weekly_goal: Option<u32>,

    /// Replace an existing profile
    #[arg(long)]
    pub force: bool,
}

/// Create the player profile and reveal starting stats
pub fn onboard_command(store: &Store, config: &Config, args: OnboardArgs) -> Result<()> {
    if store.fetch_profile()?.is_some() && !args.force {
        bail!("a profile already exists; pass --force to replace it");
    }

    let Some(fitness_level) = FitnessLevel::parse(&args.fitness_level) else {
        bail!("unknown fitness level: {}", args.fitness_level);
    };
    let Some(activity_level) = ActivityLevel::parse(&args.activity_level) else {
        bail!("unknown activity level: {}", args.activity_level);
    };
    let Some(goal) = FitnessGoal::parse(&args.goal) else {
        bail!("unknown goal: {}", args.goal);
    };

    let mut focus_areas = Vec::new();
    for raw in &args.focus_areas {
        match FocusArea::parse(raw) {
            Some(area) => focus_areas.push(area),
            None => bail!("unknown focus area: {raw}"),
        }
    }

    let mut equipment = Vec::new();
    for raw in &args.equipment {
        match Equipment::parse(raw) {
            Some(item) => equipment.push(item),
            None => bail!("unknown equipment: {raw}"),
        }
    }

    let now = Utc::now();
    let mut profile = PlayerProfile::new(args.name, now);
    profile.fitness_level = fitness_level;
    profile.activity_level = activity_level;
    profile.goal = goal;
    profile.focus_areas = focus_areas;
    profile.equipment = equipment;
    profile.weekly_goal = args.weekly_goal.unwrap_or(config.default_weekly_goal);
    profile.preferred_workout_duration = config.default_workout_duration;
    profile.calculate_initial_stats();
    profile.calculate_potential_stats();
    profile.has_completed_onboarding = true;
    profile.onboarding_completed_at = Some(now);

    store.upsert_profile(&profile)?;

    println!("You have awakened, {}.", profile.display_name);
    println!();
    println!(
        "  {} ({})",
        profile.rank.display_name(),
        profile.rank.title()
    );
    println!("  Level {}", profile.current_level);
    println!();
    println!("  Strength  {:>3}  (potential {})", profile.strength, profile.potential_strength);
    println!("  Vitality  {:>3}  (potential {})", profile.vitality, profile.potential_vitality);
    println!("  Agility   {:>3}  (potential {})", profile.agility, profile.potential_agility);
    println!("  Recovery  {:>3}  (potential {})", profile.recovery, profile.potential_recovery);
    println!();
    println!("  Weekly goal: {} workouts", profile.weekly_goal);

    Ok(())
}
