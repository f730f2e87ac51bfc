//! Fixture listing.

use super::common::CommandContext;
use crate::cli::types::TournamentId;
use crate::error::Result;
use crate::storage::MatchWinner;

/// Handle `matches`: list fixtures with results where played.
pub fn handle_matches(ctx: &mut CommandContext, tournament_id: TournamentId) -> Result<()> {
    let matches = ctx.db.list_matches(tournament_id)?;
    if matches.is_empty() {
        println!("No matches scheduled");
        return Ok(());
    }

    let names = ctx.db.team_names(tournament_id)?;
    let name_of = |id| names.get(&id).cloned().unwrap_or_else(|| id.to_string());

    for m in matches {
        let team_a = name_of(m.team_a_id);
        let team_b = name_of(m.team_b_id);
        if m.played {
            let outcome = match m.winner {
                Some(MatchWinner::A) => format!("{team_a} won"),
                Some(MatchWinner::B) => format!("{team_b} won"),
                Some(MatchWinner::Tie) => "tie".to_string(),
                None => "played".to_string(),
            };
            println!(
                "{:>4}  {team_a} {}/{} ({}) v {team_b} {}/{} ({}): {outcome}",
                m.id.as_i64(),
                m.a_runs,
                m.a_wickets,
                m.a_overs,
                m.b_runs,
                m.b_wickets,
                m.b_overs,
            );
        } else {
            println!("{:>4}  {team_a} v {team_b}: scheduled", m.id.as_i64());
        }
    }
    Ok(())
}
