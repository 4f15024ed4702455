//! Quests command implementation

use anyhow::Result;
use chrono::Utc;

use arise::domain::{Quest, QuestType};
use arise::progression::ProgressionEngine;
use arise::store::Store;

/// List daily and weekly quests with progress
pub fn quests_command(store: &Store) -> Result<()> {
    let now = Utc::now();
    let engine = ProgressionEngine::new(store.clone());
    engine.activate(now)?;

    let quests = store.fetch_quests()?;
    if quests.is_empty() {
        println!("No quests found.");
        return Ok(());
    }

    for quest_type in [QuestType::Daily, QuestType::Weekly] {
        let group: Vec<&Quest> = quests
            .iter()
            .filter(|q| q.quest_type == quest_type && !q.is_expired(now))
            .collect();
        if group.is_empty() {
            continue;
        }

        println!("{} quests:", quest_type.label());
        for quest in group {
            let marker = if quest.completed { "x" } else { " " };
            println!(
                "  [{marker}] {:<20} {:>6}  +{} XP",
                quest.title,
                quest.progress_text(),
                quest.xp_reward
            );
            println!("      {}", quest.description);
        }
        println!();
    }

    Ok(())
}
