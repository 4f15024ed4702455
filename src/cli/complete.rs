//! Complete command implementation

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Args;

use arise::domain::{CompletedWorkout, WorkoutCategory};
use arise::progression::{OutcomeEvent, ProgressionEngine};
use arise::store::Store;

#[derive(Args)]
pub struct CompleteArgs {
    /// Name of the workout
    #[arg(long, default_value = "Workout")]
    pub name: String,

    /// Category: push, pull, core
    #[arg(long)]
    pub category: String,

    /// Duration in minutes
    #[arg(long)]
    pub minutes: u32,

    /// Print the outcome queue as JSON
    #[arg(long)]
    pub json: bool,
}

/// Record a completed workout and print everything it earned, in order
pub fn complete_command(store: &Store, args: CompleteArgs) -> Result<()> {
    let Some(category) = WorkoutCategory::parse(&args.category) else {
        bail!("unknown category: {}", args.category);
    };

    let now = Utc::now();
    let engine = ProgressionEngine::new(store.clone());
    engine.activate(now)?;

    let workout = CompletedWorkout::new(args.name, category, args.minutes, now);
    let outcomes = engine.complete_activity(workout)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
        return Ok(());
    }

    for outcome in &outcomes {
        match outcome {
            OutcomeEvent::XpAwarded { total, breakdown } => {
                println!("+{total} XP");
                for item in breakdown {
                    println!("    {:<16} +{} XP", item.label, item.amount);
                }
            }
            OutcomeEvent::LevelUp { new_level, .. } => {
                println!();
                println!("LEVEL UP - you reached level {new_level}");
            }
            OutcomeEvent::RankUp { new_rank, .. } => {
                println!();
                println!(
                    "RANK UP - {} ({})",
                    new_rank.display_name(),
                    new_rank.title()
                );
            }
            OutcomeEvent::QuestCompleted {
                title, xp_awarded, ..
            } => {
                println!();
                println!("Quest complete: {title} (+{xp_awarded} XP)");
            }
            OutcomeEvent::AchievementUnlocked {
                title,
                tier,
                xp_awarded,
                ..
            } => {
                println!();
                println!(
                    "Achievement unlocked: {title} [{}] (+{xp_awarded} XP)",
                    tier.label()
                );
            }
        }
    }

    Ok(())
}
