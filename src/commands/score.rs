//! Live score display.

use super::common::{print_json, CommandContext};
use crate::cli::types::MatchId;
use crate::error::Result;

/// Handle `score`: per-side totals plus the recent-balls feed.
pub fn handle_score(ctx: &mut CommandContext, match_id: MatchId, as_json: bool) -> Result<()> {
    let live = ctx.db.live_score(match_id)?;

    if as_json {
        return print_json(&live);
    }

    if live.totals.is_empty() {
        println!("No deliveries recorded yet");
    }
    for side in &live.totals {
        let name = if side.team_name.is_empty() {
            side.team_id.to_string()
        } else {
            side.team_name.clone()
        };
        println!("{name}: {}/{} in {} overs", side.runs, side.wickets, side.overs);
    }

    for ball in &live.recent {
        let mut line = format!("  {}.{} {} to {}: {} run(s)", ball.over, ball.ball, ball.bowler, ball.batsman, ball.runs);
        if !ball.extras.is_empty() {
            line.push_str(&format!(" [{}]", ball.extras));
        }
        if ball.wicket {
            line.push_str(&format!(" WICKET {}", ball.wicket_type));
        }
        println!("{line}");
    }
    Ok(())
}
