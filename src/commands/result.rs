//! Match result recording.

use super::common::CommandContext;
use crate::cli::types::MatchId;
use crate::error::Result;
use crate::storage::MatchResultInput;

/// Handle `result`: store the final totals and optionally apply bulk
/// per-player stat increments supplied as JSON text.
pub fn handle_result(
    ctx: &mut CommandContext,
    match_id: MatchId,
    totals: MatchResultInput,
    player_stats: Option<&str>,
) -> Result<()> {
    let stats = player_stats.map(serde_json::from_str).transpose()?;
    let m = ctx.db.record_result(match_id, &totals, stats.as_ref())?;

    let winner = m
        .winner
        .map(|w| w.to_string())
        .unwrap_or_else(|| "unset".to_string());
    println!(
        "✓ Result recorded: {}/{} ({}) v {}/{} ({}), winner {winner}",
        m.a_runs, m.a_wickets, m.a_overs, m.b_runs, m.b_wickets, m.b_overs,
    );
    Ok(())
}
