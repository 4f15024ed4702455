//! History command implementation

use anyhow::Result;

use arise::store::Store;

/// Show recent XP ledger entries, newest first
pub fn history_command(store: &Store, limit: usize) -> Result<()> {
    let events = store.fetch_xp_events()?;
    if events.is_empty() {
        println!("No XP earned yet.");
        return Ok(());
    }

    for event in events.iter().take(limit) {
        println!(
            "  {}  +{:<4} {:<20} {}",
            event.earned_at.format("%Y-%m-%d %H:%M"),
            event.amount,
            event.source.label(),
            event.display_title()
        );
    }

    Ok(())
}
