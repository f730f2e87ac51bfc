//! Data models for the storage layer

use crate::cli::types::{MatchId, PlayerId, TeamId, TournamentId};
use crate::core::leaderboard;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tournament owning teams and matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Unix seconds.
    pub created_at: i64,
    /// Opaque settings blob, stored as JSON text. Not interpreted here.
    pub settings: String,
}

impl Tournament {
    /// Settings parsed as JSON; malformed text degrades to `{}`.
    pub fn settings_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.settings)
            .unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
    }
}

/// A team within one tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub logo: Option<String>,
    /// JSON list of player ids picked for the XI. Opaque to the core.
    pub playing_xi: String,
}

/// A player and their cumulative career statistics.
///
/// The counters only ever grow, and only through the delivery ledger or
/// the bulk match-result path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub team_id: TeamId,
    pub name: String,
    pub runs: i64,
    pub balls_faced: u32,
    pub wickets: u32,
    pub balls_bowled: u32,
    pub runs_conceded: i64,
    pub is_keeper: bool,
    pub is_captain: bool,
}

impl Player {
    /// Runs conceded per over bowled; 0.0 with no balls bowled.
    pub fn bowling_economy(&self) -> f64 {
        leaderboard::economy(self.runs_conceded, self.balls_bowled)
    }
}

/// Which side won a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchWinner {
    A,
    B,
    Tie,
}

impl fmt::Display for MatchWinner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MatchWinner::A => "A",
            MatchWinner::B => "B",
            MatchWinner::Tie => "tie",
        };
        write!(f, "{text}")
    }
}

impl FromStr for MatchWinner {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(MatchWinner::A),
            "B" => Ok(MatchWinner::B),
            "tie" => Ok(MatchWinner::Tie),
            _ => Err(()),
        }
    }
}

/// A fixture between two teams, with totals once played.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub team_a_id: TeamId,
    pub team_b_id: TeamId,
    /// Free-text scheduling label ("Sat 14:00, Oval"), if any.
    pub scheduled: Option<String>,
    pub played: bool,
    pub toss_winner_id: Option<TeamId>,
    pub toss_choice: Option<String>,
    pub a_runs: i64,
    pub a_overs: String,
    pub a_wickets: u32,
    pub b_runs: i64,
    pub b_overs: String,
    pub b_wickets: u32,
    pub winner: Option<MatchWinner>,
    /// Append-only audit log of raw legacy-path ball payloads, stored as
    /// a JSON array. Independent of the `deliveries` table.
    pub ball_log: String,
}

impl Match {
    /// The audit log parsed as JSON events; malformed text degrades to
    /// an empty list.
    pub fn audit_log(&self) -> Vec<serde_json::Value> {
        serde_json::from_str(&self.ball_log).unwrap_or_default()
    }
}

/// One recorded ball in a match's structured delivery log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub id: i64,
    pub match_id: MatchId,
    pub over: u32,
    pub ball_in_over: u32,
    pub batting_team_id: Option<TeamId>,
    pub bowling_team_id: Option<TeamId>,
    pub striker_id: Option<PlayerId>,
    pub non_striker_id: Option<PlayerId>,
    pub bowler_id: Option<PlayerId>,
    pub runs: i64,
    pub extras: String,
    pub wicket: bool,
    pub wicket_type: String,
    /// Unix milliseconds, assigned when the ledger accepts the ball.
    pub created_at: i64,
}

/// Input for recording one structured delivery.
#[derive(Debug, Clone, Default)]
pub struct DeliveryInput {
    pub over: u32,
    pub ball_in_over: u32,
    pub batting_team_id: Option<TeamId>,
    pub bowling_team_id: Option<TeamId>,
    pub striker_id: Option<PlayerId>,
    pub non_striker_id: Option<PlayerId>,
    pub bowler_id: Option<PlayerId>,
    pub runs: i64,
    pub extras: String,
    pub wicket: bool,
    pub wicket_type: String,
}

/// Final totals submitted for a completed match.
#[derive(Debug, Clone)]
pub struct MatchResultInput {
    pub a_runs: i64,
    pub a_overs: String,
    pub a_wickets: u32,
    pub b_runs: i64,
    pub b_overs: String,
    pub b_wickets: u32,
}
