//! Fixture scheduling command.

use super::common::CommandContext;
use crate::cli::types::TournamentId;
use crate::core::scheduler::schedule_pairs;
use crate::error::{Result, ScorebookError};

/// Handle `schedule`: pair up the tournament's teams and persist one
/// match per pair. Rejects tournaments with fewer than two teams before
/// any scheduling is attempted.
pub fn handle_schedule(
    ctx: &mut CommandContext,
    tournament_id: TournamentId,
    matches_per_team: u32,
) -> Result<()> {
    let teams = ctx.db.list_teams(tournament_id)?;
    if teams.len() < 2 {
        return Err(ScorebookError::NotEnoughTeams { count: teams.len() });
    }

    let team_ids: Vec<_> = teams.iter().map(|t| t.id).collect();
    let pairs = schedule_pairs(&mut rand::thread_rng(), &team_ids, matches_per_team);
    let created = ctx.db.insert_fixtures(tournament_id, &pairs)?;
    println!("✓ Scheduled {created} matches");
    Ok(())
}
