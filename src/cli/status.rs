//! Status command implementation

use anyhow::{bail, Result};
use chrono::Utc;

use arise::progression::{calendar, level};
use arise::store::Store;

/// Show level, rank, streak and XP progress
pub fn status_command(store: &Store) -> Result<()> {
    let Some(profile) = store.fetch_profile()? else {
        bail!("no profile yet; run `arise onboard` first");
    };
    let history = store.fetch_workouts()?;

    let today = calendar::day_of(Utc::now());
    let streak = calendar::current_streak(&history, today);
    let best = calendar::best_streak(&history);
    let this_week = calendar::workouts_in_week(&history, today);

    println!("{}", profile.display_name);
    println!(
        "  {} ({})  -  Level {}",
        profile.rank.display_name(),
        profile.rank.title(),
        profile.current_level
    );
    println!("  Total XP: {}", profile.total_xp);

    let progress = level::level_progress(profile.total_xp);
    let to_next = level::xp_to_next_level(profile.total_xp);
    println!(
        "  Level progress: {:.0}% ({} XP to level {})",
        progress * 100.0,
        to_next,
        profile.current_level + 1
    );
    if let Some(xp) = profile.xp_to_next_rank() {
        println!("  Next rank in {xp} XP");
    }

    println!();
    println!("  Workouts: {} total", history.len());
    println!("  Streak: {streak} day(s) (best {best})");
    println!(
        "  This week: {this_week}/{} workouts",
        profile.weekly_goal
    );
    println!();
    println!(
        "  STR {:>3}   VIT {:>3}   AGI {:>3}   REC {:>3}",
        profile.strength, profile.vitality, profile.agility, profile.recovery
    );

    Ok(())
}
