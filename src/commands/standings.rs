//! Points table display.

use super::common::{print_json, CommandContext};
use crate::cli::types::TournamentId;
use crate::error::Result;

/// Handle `standings`: the ranked points table with net run rate.
pub fn handle_standings(
    ctx: &mut CommandContext,
    tournament_id: TournamentId,
    as_json: bool,
) -> Result<()> {
    let rows = ctx.db.standings(tournament_id)?;

    if as_json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No teams in tournament {tournament_id}");
        return Ok(());
    }

    println!(
        "{:<20} {:>3} {:>3} {:>3} {:>3} {:>4} {:>8}",
        "Team", "P", "W", "L", "T", "Pts", "NRR"
    );
    for row in rows {
        println!(
            "{:<20} {:>3} {:>3} {:>3} {:>3} {:>4} {:>8.3}",
            row.team_name, row.played, row.won, row.lost, row.tied, row.points, row.nrr
        );
    }
    Ok(())
}
