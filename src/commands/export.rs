//! Tournament export: one JSON document with teams, matches (including
//! the audit ball log), player statistics and the points table.

use super::common::CommandContext;
use crate::cli::types::{MatchId, PlayerId, TournamentId};
use crate::core::standings::StandingsRow;
use crate::error::Result;
use crate::storage::MatchWinner;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct ExportDoc {
    tournament: TournamentSheet,
    teams: Vec<TeamSheet>,
    matches: Vec<MatchSheet>,
    players: Vec<PlayerSheet>,
    standings: Vec<StandingsRow>,
}

#[derive(Debug, Serialize)]
struct TournamentSheet {
    id: TournamentId,
    name: String,
    created_at: i64,
    settings: Value,
}

#[derive(Debug, Serialize)]
struct TeamSheet {
    name: String,
    players: String,
}

#[derive(Debug, Serialize)]
struct MatchSheet {
    match_id: MatchId,
    team_a: String,
    team_b: String,
    a_runs: i64,
    a_overs: String,
    a_wickets: u32,
    b_runs: i64,
    b_overs: String,
    b_wickets: u32,
    played: bool,
    winner: Option<MatchWinner>,
    ball_log: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct PlayerSheet {
    player_id: PlayerId,
    name: String,
    team: String,
    runs: i64,
    balls: u32,
    wickets: u32,
    economy: f64,
}

/// Handle `export`: write the tournament document to `out` (default
/// `tournament_<id>_export.json` in the working directory).
pub fn handle_export(
    ctx: &mut CommandContext,
    tournament_id: TournamentId,
    out: Option<&Path>,
) -> Result<()> {
    let doc = build_export(ctx, tournament_id)?;

    let path = out.map(Path::to_path_buf).unwrap_or_else(|| {
        PathBuf::from(format!("tournament_{}_export.json", tournament_id.as_i64()))
    });
    std::fs::write(&path, serde_json::to_string_pretty(&doc)?)?;
    println!("✓ Exported tournament {tournament_id} to {}", path.display());
    Ok(())
}

fn build_export(ctx: &mut CommandContext, tournament_id: TournamentId) -> Result<ExportDoc> {
    let tournament = ctx.db.get_tournament(tournament_id)?;
    let teams = ctx.db.list_teams(tournament_id)?;
    let matches = ctx.db.list_matches(tournament_id)?;
    let names = ctx.db.team_names(tournament_id)?;
    let name_of = |id| names.get(&id).cloned().unwrap_or_default();

    let mut team_sheets = Vec::new();
    let mut player_sheets = Vec::new();
    for team in &teams {
        let players = ctx.db.list_players(team.id)?;
        team_sheets.push(TeamSheet {
            name: team.name.clone(),
            players: players
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        });
        for p in players {
            player_sheets.push(PlayerSheet {
                player_id: p.id,
                name: p.name.clone(),
                team: team.name.clone(),
                runs: p.runs,
                balls: p.balls_faced,
                wickets: p.wickets,
                economy: round_2(p.bowling_economy()),
            });
        }
    }

    let match_sheets = matches
        .iter()
        .map(|m| MatchSheet {
            match_id: m.id,
            team_a: name_of(m.team_a_id),
            team_b: name_of(m.team_b_id),
            a_runs: m.a_runs,
            a_overs: m.a_overs.clone(),
            a_wickets: m.a_wickets,
            b_runs: m.b_runs,
            b_overs: m.b_overs.clone(),
            b_wickets: m.b_wickets,
            played: m.played,
            winner: m.winner,
            ball_log: m.audit_log(),
        })
        .collect();

    Ok(ExportDoc {
        tournament: TournamentSheet {
            id: tournament.id,
            name: tournament.name.clone(),
            created_at: tournament.created_at,
            settings: tournament.settings_json(),
        },
        teams: team_sheets,
        matches: match_sheets,
        players: player_sheets,
        standings: ctx.db.standings(tournament_id)?,
    })
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
