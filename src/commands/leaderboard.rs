//! Team leaderboard display.

use super::common::{print_json, CommandContext};
use crate::cli::types::TeamId;
use crate::error::Result;

/// Handle `top batsmen`.
pub fn handle_top_batsmen(
    ctx: &mut CommandContext,
    team_id: TeamId,
    limit: usize,
    from_deliveries: bool,
    as_json: bool,
) -> Result<()> {
    let lines = if from_deliveries {
        ctx.db.top_batsmen_from_deliveries(team_id, limit)?
    } else {
        ctx.db.top_batsmen(team_id, limit)?
    };

    if as_json {
        return print_json(&lines);
    }
    if lines.is_empty() {
        println!("No batting records for team {team_id}");
        return Ok(());
    }
    for (rank, line) in lines.iter().enumerate() {
        println!("{:>2}. {:<24} {:>5} runs", rank + 1, line.name, line.runs);
    }
    Ok(())
}

/// Handle `top bowlers`.
pub fn handle_top_bowlers(
    ctx: &mut CommandContext,
    team_id: TeamId,
    limit: usize,
    from_deliveries: bool,
    as_json: bool,
) -> Result<()> {
    let lines = if from_deliveries {
        ctx.db.top_bowlers_from_deliveries(team_id, limit)?
    } else {
        ctx.db.top_bowlers(team_id, limit)?
    };

    if as_json {
        return print_json(&lines);
    }
    if lines.is_empty() {
        println!("No bowling records for team {team_id}");
        return Ok(());
    }
    for (rank, line) in lines.iter().enumerate() {
        println!(
            "{:>2}. {:<24} {:>3} wickets, economy {:.2}",
            rank + 1,
            line.name,
            line.wickets,
            line.economy
        );
    }
    Ok(())
}
