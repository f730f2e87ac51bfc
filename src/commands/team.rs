//! Team and player management.

use super::common::CommandContext;
use crate::cli::types::{TeamId, TournamentId};
use crate::error::Result;

/// Handle `team add`: create the team, then any roster players given as
/// a comma-separated list (blank entries are dropped).
pub fn handle_add_team(
    ctx: &mut CommandContext,
    tournament_id: TournamentId,
    name: &str,
    players: Option<&str>,
    logo: Option<&str>,
) -> Result<()> {
    let team = ctx.db.add_team(tournament_id, name, logo)?;
    let mut added = 0;
    if let Some(list) = players {
        for player_name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            ctx.db.add_player(team.id, player_name)?;
            added += 1;
        }
    }
    println!("✓ Created team {} ({}) with {added} players", team.id, team.name);
    Ok(())
}

/// Handle `team remove`. The team's players go with it.
pub fn handle_remove_team(ctx: &mut CommandContext, team_id: TeamId) -> Result<()> {
    ctx.db.remove_team(team_id)?;
    println!("✓ Deleted team {team_id}");
    Ok(())
}

/// Handle `player add`.
pub fn handle_add_player(ctx: &mut CommandContext, team_id: TeamId, name: &str) -> Result<()> {
    let player = ctx.db.add_player(team_id, name)?;
    println!("✓ Added player {} ({})", player.id, player.name);
    Ok(())
}
