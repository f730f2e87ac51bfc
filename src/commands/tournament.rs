//! Tournament creation and listing.

use super::common::CommandContext;
use crate::error::Result;

/// Handle `tournament create`.
pub fn handle_create(ctx: &mut CommandContext, name: &str) -> Result<()> {
    let tournament = ctx.db.create_tournament(name)?;
    println!("✓ Created tournament {} ({})", tournament.id, tournament.name);
    Ok(())
}

/// Handle `tournament list`.
pub fn handle_list(ctx: &mut CommandContext) -> Result<()> {
    let tournaments = ctx.db.list_tournaments()?;
    if tournaments.is_empty() {
        println!("No tournaments yet");
        return Ok(());
    }
    for t in tournaments {
        let teams = ctx.db.list_teams(t.id)?.len();
        let matches = ctx.db.list_matches(t.id)?.len();
        println!(
            "{:>4}  {}  ({teams} teams, {matches} matches)",
            t.id.as_i64(),
            t.name
        );
    }
    Ok(())
}
