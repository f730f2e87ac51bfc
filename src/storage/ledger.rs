//! Delivery recording, match results, and the live score.
//!
//! Both ball-ingestion paths land here and share one set of scoring
//! rules from [`crate::core::ledger`]. Each submission, whether a
//! structured delivery, a legacy raw payload, or a match result, runs inside a
//! single transaction so a reader never sees a ball without its player
//! stat updates. There is deliberately no deduplication: the log is
//! append-only and submitting the same ball twice double-counts.

use super::{models::*, queries::now_millis, schema::TournamentDb};
use crate::cli::types::{MatchId, PlayerId, TeamId, TournamentId};
use crate::core::ledger::{extras_runs, rule_ball, InningsTotals, NoBallPolicy, NO_BALL};
use crate::core::overs::overs_to_balls;
use crate::error::{Result, ScorebookError};
use rusqlite::{params, Transaction};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// How many trailing deliveries the live feed returns.
pub const RECENT_WINDOW: usize = 50;

/// Aggregate totals for one batting side of a match.
#[derive(Debug, Clone, Serialize)]
pub struct TeamScore {
    pub team_id: TeamId,
    pub team_name: String,
    pub runs: i64,
    pub wickets: u32,
    pub balls: u32,
    pub overs: String,
}

/// One delivery of the live feed, with player names resolved.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryLine {
    pub over: u32,
    pub ball: u32,
    pub batsman: String,
    pub bowler: String,
    pub runs: i64,
    pub extras: String,
    pub wicket: bool,
    pub wicket_type: String,
}

/// Live score of a match: per-side totals plus the recent-balls feed.
#[derive(Debug, Clone, Serialize)]
pub struct LiveScore {
    pub totals: Vec<TeamScore>,
    pub recent: Vec<DeliveryLine>,
}

impl TournamentDb {
    /// Record one structured delivery: append it to the match's log and
    /// apply the striker/bowler stat updates, all in one transaction.
    ///
    /// Replay order is the rowid assigned here, not anything the client
    /// supplies. Unknown striker/bowler ids skip their update silently.
    pub fn record_delivery(&mut self, match_id: MatchId, input: &DeliveryInput) -> Result<Delivery> {
        self.get_match(match_id)?;

        let created_at = now_millis();
        let ruling = rule_ball(&input.extras, NoBallPolicy::ExtrasCodeOnly);
        let conceded = input.runs + extras_runs(&input.extras);

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO deliveries
                 (match_id, over_number, ball_in_over, batting_team_id, bowling_team_id,
                  striker_id, non_striker_id, bowler_id, runs, extras, wicket,
                  wicket_type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                match_id.as_i64(),
                input.over,
                input.ball_in_over,
                input.batting_team_id.map(|t| t.as_i64()),
                input.bowling_team_id.map(|t| t.as_i64()),
                input.striker_id.map(|p| p.as_i64()),
                input.non_striker_id.map(|p| p.as_i64()),
                input.bowler_id.map(|p| p.as_i64()),
                input.runs,
                input.extras,
                input.wicket,
                input.wicket_type,
                created_at,
            ],
        )?;
        let id = tx.last_insert_rowid();

        if let Some(striker) = input.striker_id {
            apply_striker(&tx, striker, input.runs, ruling.counts_for_striker)?;
        }
        if let Some(bowler) = input.bowler_id {
            apply_bowler(&tx, bowler, conceded, ruling.counts_for_bowler, input.wicket)?;
        }
        tx.commit()?;

        Ok(Delivery {
            id,
            match_id,
            over: input.over,
            ball_in_over: input.ball_in_over,
            batting_team_id: input.batting_team_id,
            bowling_team_id: input.bowling_team_id,
            striker_id: input.striker_id,
            non_striker_id: input.non_striker_id,
            bowler_id: input.bowler_id,
            runs: input.runs,
            extras: input.extras.clone(),
            wicket: input.wicket,
            wicket_type: input.wicket_type.clone(),
            created_at,
        })
    }

    /// Legacy ingestion: append the raw payload to the match's audit
    /// ball log and apply player stats from its fields. Does NOT create
    /// a row in the structured deliveries table; the two logs are
    /// independent. Returns the audit log's new length.
    ///
    /// Field handling is deliberately forgiving: `batsman_id` and
    /// `striker_id` are aliases, numbers may arrive as strings, and
    /// anything uncoercible falls back to zero/absent. The only hard
    /// rejection is a payload that is not a JSON object.
    pub fn ingest_ball(&mut self, match_id: MatchId, payload: &Value) -> Result<usize> {
        self.get_match(match_id)?;
        let fields = payload.as_object().ok_or_else(|| ScorebookError::InvalidDelivery {
            reason: "payload must be a JSON object".to_string(),
        })?;

        // "batsman_id" and "striker_id" are aliases; an absent or
        // unusable first spelling falls through to the second.
        let striker = lenient_id(fields.get("batsman_id"))
            .or_else(|| lenient_id(fields.get("striker_id")));
        let bowler = lenient_id(fields.get("bowler_id"));
        let runs = lenient_i64(fields.get("runs"));
        let extra_runs = lenient_extras_runs(fields.get("extras"));
        let wicket = lenient_bool(fields.get("wicket"));
        let is_no_ball = lenient_bool(fields.get("is_no_ball"));
        let extras_type = fields
            .get("extras_type")
            .or_else(|| fields.get("extras_kind"))
            .and_then(Value::as_str)
            .unwrap_or("");

        // A no-ball may be signalled either way; fold both into the one
        // canonical extras code before ruling on the ball.
        let code = if is_no_ball { NO_BALL } else { extras_type };
        let ruling = rule_ball(code, NoBallPolicy::CountsForStriker);

        let tx = self.conn.transaction()?;
        let log_text: String = tx.query_row(
            "SELECT ball_log FROM matches WHERE id = ?1",
            params![match_id.as_i64()],
            |row| row.get(0),
        )?;
        let mut log: Vec<Value> = serde_json::from_str(&log_text).unwrap_or_default();
        log.push(payload.clone());
        let ball_count = log.len();
        tx.execute(
            "UPDATE matches SET ball_log = ?1 WHERE id = ?2",
            params![serde_json::to_string(&log)?, match_id.as_i64()],
        )?;

        if let Some(striker) = striker {
            apply_striker(&tx, PlayerId::new(striker), runs, ruling.counts_for_striker)?;
        }
        if let Some(bowler) = bowler {
            apply_bowler(
                &tx,
                PlayerId::new(bowler),
                runs + extra_runs,
                ruling.counts_for_bowler,
                wicket,
            )?;
        }
        tx.commit()?;

        Ok(ball_count)
    }

    /// Record a match's final totals: marks it played, derives the
    /// winner (higher total, equal is a tie), and optionally applies
    /// bulk per-player stat increments from a JSON object keyed by
    /// player id.
    ///
    /// Re-recording overwrites the totals but stat increments stay
    /// additive; there is no retraction of previously applied ones.
    pub fn record_result(
        &mut self,
        match_id: MatchId,
        totals: &MatchResultInput,
        player_stats: Option<&Value>,
    ) -> Result<Match> {
        let before = self.get_match(match_id)?;

        let winner = match totals.a_runs.cmp(&totals.b_runs) {
            std::cmp::Ordering::Greater => MatchWinner::A,
            std::cmp::Ordering::Less => MatchWinner::B,
            std::cmp::Ordering::Equal => MatchWinner::Tie,
        };

        let tx = self.conn.transaction()?;
        tx.execute(
            "UPDATE matches
             SET a_runs = ?1, a_overs = ?2, a_wickets = ?3,
                 b_runs = ?4, b_overs = ?5, b_wickets = ?6,
                 played = 1, winner = ?7
             WHERE id = ?8",
            params![
                totals.a_runs,
                totals.a_overs,
                totals.a_wickets,
                totals.b_runs,
                totals.b_overs,
                totals.b_wickets,
                winner.to_string(),
                match_id.as_i64(),
            ],
        )?;
        if let Some(stats) = player_stats {
            apply_bulk_stats(&tx, before.tournament_id, stats)?;
        }
        tx.commit()?;

        log::info!("match {match_id} recorded, winner {winner}");
        self.get_match(match_id)
    }

    /// All deliveries of a match in canonical replay order.
    pub fn list_deliveries(&self, match_id: MatchId) -> Result<Vec<Delivery>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, match_id, over_number, ball_in_over, batting_team_id,
                    bowling_team_id, striker_id, non_striker_id, bowler_id,
                    runs, extras, wicket, wicket_type, created_at
             FROM deliveries WHERE match_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![match_id.as_i64()], super::queries::row_to_delivery)?;
        let mut deliveries = Vec::new();
        for row in rows {
            deliveries.push(row?);
        }
        Ok(deliveries)
    }

    /// Replay the structured delivery log into per-side totals plus the
    /// trailing [`RECENT_WINDOW`] balls for the live feed.
    pub fn live_score(&self, match_id: MatchId) -> Result<LiveScore> {
        let m = self.get_match(match_id)?;
        let deliveries = self.list_deliveries(match_id)?;

        let mut grouped: BTreeMap<TeamId, InningsTotals> = BTreeMap::new();
        for d in &deliveries {
            // Balls with no batting side still show in the feed but
            // cannot be attributed to a total.
            if let Some(team) = d.batting_team_id {
                grouped.entry(team).or_default().record(d.runs, d.wicket, &d.extras);
            }
        }

        let team_names = self.team_names(m.tournament_id)?;
        let totals = grouped
            .into_iter()
            .map(|(team_id, innings)| TeamScore {
                team_id,
                team_name: team_names.get(&team_id).cloned().unwrap_or_default(),
                runs: innings.runs,
                wickets: innings.wickets,
                balls: innings.balls,
                overs: innings.overs_text(),
            })
            .collect();

        let player_names = self.match_player_names(&m)?;
        let resolve = |id: Option<PlayerId>| -> String {
            id.and_then(|p| player_names.get(&p).cloned()).unwrap_or_default()
        };
        let recent = deliveries
            .iter()
            .skip(deliveries.len().saturating_sub(RECENT_WINDOW))
            .map(|d| DeliveryLine {
                over: d.over,
                ball: d.ball_in_over,
                batsman: resolve(d.striker_id),
                bowler: resolve(d.bowler_id),
                runs: d.runs,
                extras: d.extras.clone(),
                wicket: d.wicket,
                wicket_type: d.wicket_type.clone(),
            })
            .collect();

        Ok(LiveScore { totals, recent })
    }

    fn match_player_names(&self, m: &Match) -> Result<HashMap<PlayerId, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM players WHERE team_id IN (?1, ?2)")?;
        let rows = stmt.query_map(
            params![m.team_a_id.as_i64(), m.team_b_id.as_i64()],
            |row| Ok((PlayerId::new(row.get(0)?), row.get::<_, String>(1)?)),
        )?;
        let mut names = HashMap::new();
        for row in rows {
            let (id, name) = row?;
            names.insert(id, name);
        }
        Ok(names)
    }
}

/// Parse a structured delivery payload (the JSON shape the original
/// scoring clients POST). Missing fields default; present fields that
/// cannot be coerced reject the whole payload. This is the one place
/// the ledger refuses input outright.
pub fn parse_delivery_payload(payload: &Value) -> Result<DeliveryInput> {
    let fields = payload.as_object().ok_or_else(|| ScorebookError::InvalidDelivery {
        reason: "payload must be a JSON object".to_string(),
    })?;

    Ok(DeliveryInput {
        over: strict_u32(fields.get("over"), 0, "over")?,
        ball_in_over: strict_u32(fields.get("ball_in_over"), 1, "ball_in_over")?,
        batting_team_id: strict_opt_id(fields.get("batting_team_id"), "batting_team_id")?
            .map(TeamId::new),
        bowling_team_id: strict_opt_id(fields.get("bowling_team_id"), "bowling_team_id")?
            .map(TeamId::new),
        striker_id: strict_opt_id(fields.get("striker_id"), "striker_id")?.map(PlayerId::new),
        non_striker_id: strict_opt_id(fields.get("non_striker_id"), "non_striker_id")?
            .map(PlayerId::new),
        bowler_id: strict_opt_id(fields.get("bowler_id"), "bowler_id")?.map(PlayerId::new),
        runs: strict_i64_field(fields.get("runs"), 0, "runs")?,
        extras: text_field(fields.get("extras"), "extras")?,
        wicket: lenient_bool(fields.get("wicket")),
        wicket_type: text_field(fields.get("wicket_type"), "wicket_type")?,
    })
}

fn apply_striker(tx: &Transaction, id: PlayerId, runs: i64, counts_ball: bool) -> Result<()> {
    let updated = tx.execute(
        "UPDATE players SET runs = runs + ?1, balls_faced = balls_faced + ?2 WHERE id = ?3",
        params![runs, counts_ball as i64, id.as_i64()],
    )?;
    if updated == 0 {
        log::debug!("striker {id} unknown, stat update skipped");
    }
    Ok(())
}

fn apply_bowler(
    tx: &Transaction,
    id: PlayerId,
    conceded: i64,
    counts_ball: bool,
    wicket: bool,
) -> Result<()> {
    let updated = tx.execute(
        "UPDATE players
         SET runs_conceded = runs_conceded + ?1,
             balls_bowled = balls_bowled + ?2,
             wickets = wickets + ?3
         WHERE id = ?4",
        params![conceded, counts_ball as i64, wicket as i64, id.as_i64()],
    )?;
    if updated == 0 {
        log::debug!("bowler {id} unknown, stat update skipped");
    }
    Ok(())
}

/// Apply bulk stat increments from `{"<player_id>": {"runs": 10, ...}}`.
/// Only players of the given tournament are touched; unknown ids and
/// malformed values skip or zero out, never fail.
fn apply_bulk_stats(tx: &Transaction, tournament_id: TournamentId, stats: &Value) -> Result<()> {
    let Some(entries) = stats.as_object() else {
        return Ok(());
    };
    for (key, fields) in entries {
        let Ok(player_id) = key.trim().parse::<i64>() else {
            continue;
        };
        let Some(fields) = fields.as_object() else {
            continue;
        };
        let runs = lenient_i64(fields.get("runs"));
        let balls = lenient_i64(fields.get("balls"));
        let wickets = lenient_i64(fields.get("wickets"));
        let conceded = lenient_i64(fields.get("runs_conceded"));
        let balls_bowled = fields
            .get("overs_bowled")
            .map(|v| overs_text_of(v))
            .map(|text| i64::from(overs_to_balls(&text)))
            .unwrap_or(0);

        let updated = tx.execute(
            "UPDATE players
             SET runs = runs + ?1,
                 balls_faced = balls_faced + ?2,
                 wickets = wickets + ?3,
                 runs_conceded = runs_conceded + ?4,
                 balls_bowled = balls_bowled + ?5
             WHERE id = ?6
               AND team_id IN (SELECT id FROM teams WHERE tournament_id = ?7)",
            params![
                runs,
                balls,
                wickets,
                conceded,
                balls_bowled,
                player_id,
                tournament_id.as_i64(),
            ],
        )?;
        if updated == 0 {
            log::debug!("bulk stats for player {player_id} skipped (not in tournament)");
        }
    }
    Ok(())
}

fn overs_text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Optional id: absent, null, zero or empty mean "not given"; anything
/// else must coerce to an integer.
fn strict_opt_id(value: Option<&Value>, field: &str) -> Result<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => {
            let id = strict_i64(v, field)?;
            Ok(if id == 0 { None } else { Some(id) })
        }
    }
}

fn strict_u32(value: Option<&Value>, default: u32, field: &str) -> Result<u32> {
    let Some(v) = value else {
        return Ok(default);
    };
    if v.is_null() {
        return Ok(default);
    }
    u32::try_from(strict_i64(v, field)?).map_err(|_| ScorebookError::InvalidDelivery {
        reason: format!("field '{field}' must be a non-negative integer"),
    })
}

fn strict_i64_field(value: Option<&Value>, default: i64, field: &str) -> Result<i64> {
    match value {
        None | Some(Value::Null) => Ok(default),
        Some(v) => strict_i64(v, field),
    }
}

fn strict_i64(value: &Value, field: &str) -> Result<i64> {
    let coerced = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    coerced.ok_or_else(|| ScorebookError::InvalidDelivery {
        reason: format!("field '{field}' is not coercible to an integer"),
    })
}

fn text_field(value: Option<&Value>, field: &str) -> Result<String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(ScorebookError::InvalidDelivery {
            reason: format!("field '{field}' must be a string"),
        }),
    }
}

/// Best-effort integer: numbers truncate, numeric strings parse, all
/// else is 0.
fn lenient_i64(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

/// Best-effort id: 0 and anything uncoercible mean "absent".
fn lenient_id(value: Option<&Value>) -> Option<i64> {
    let id = lenient_i64(value);
    (id != 0).then_some(id)
}

/// The legacy `extras` field carries a run count (number or digit
/// string); extras codes like `"WD"` contribute 0 here.
fn lenient_extras_runs(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u32>().map_or(0, i64::from),
        _ => 0,
    }
}

/// Truthiness in the original client's spirit: false, 0, "", null and
/// absent are false; everything else is true.
fn lenient_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        _ => false,
    }
}
