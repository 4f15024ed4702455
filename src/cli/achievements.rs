//! Achievements command implementation

use anyhow::Result;
use chrono::Utc;

use arise::domain::AchievementCategory;
use arise::progression::ProgressionEngine;
use arise::store::Store;

/// List achievements grouped by category
pub fn achievements_command(store: &Store) -> Result<()> {
    let engine = ProgressionEngine::new(store.clone());
    engine.activate(Utc::now())?;

    let achievements = store.fetch_achievements()?;
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    println!("Achievements: {unlocked}/{} unlocked\n", achievements.len());

    let categories = [
        AchievementCategory::Workout,
        AchievementCategory::Streak,
        AchievementCategory::Rank,
        AchievementCategory::Level,
        AchievementCategory::Category,
    ];

    for category in categories {
        let group: Vec<_> = achievements
            .iter()
            .filter(|a| a.category == category)
            .collect();
        if group.is_empty() {
            continue;
        }

        println!("{}:", category.label());
        for achievement in group {
            let marker = if achievement.unlocked { "x" } else { " " };
            println!(
                "  [{marker}] {:<16} [{:<6}] {:>9}  +{} XP",
                achievement.title,
                achievement.tier.label(),
                achievement.progress_text(),
                achievement.xp_reward
            );
        }
        println!();
    }

    Ok(())
}
