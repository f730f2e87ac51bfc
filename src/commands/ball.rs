//! Ball-by-ball recording: the structured path and the legacy path.

use super::common::CommandContext;
use crate::cli::types::MatchId;
use crate::error::Result;
use crate::storage::{parse_delivery_payload, DeliveryInput};

/// Handle `ball record`: insert one structured delivery and update the
/// two players' statistics. If `payload` is given it is parsed as the
/// JSON shape scoring clients send and overrides the field flags.
pub fn handle_record(
    ctx: &mut CommandContext,
    match_id: MatchId,
    payload: Option<&str>,
    flags: DeliveryInput,
) -> Result<()> {
    let input = match payload {
        Some(text) => parse_delivery_payload(&serde_json::from_str(text)?)?,
        None => flags,
    };
    let delivery = ctx.db.record_delivery(match_id, &input)?;

    let mut line = format!(
        "✓ Ball {}.{} recorded: {} run(s)",
        delivery.over, delivery.ball_in_over, delivery.runs
    );
    if !delivery.extras.is_empty() {
        line.push_str(&format!(" [{}]", delivery.extras));
    }
    if delivery.wicket {
        line.push_str(" WICKET");
    }
    println!("{line}");
    Ok(())
}

/// Handle `ball ingest`: append a raw payload to the match's audit ball
/// log and apply the player stats it names.
pub fn handle_ingest(ctx: &mut CommandContext, match_id: MatchId, payload: &str) -> Result<()> {
    let value = serde_json::from_str(payload)?;
    let ball_count = ctx.db.ingest_ball(match_id, &value)?;
    println!("✓ Ball ingested, audit log now {ball_count} balls");
    Ok(())
}
