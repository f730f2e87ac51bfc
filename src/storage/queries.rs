//! Basic database query operations

use super::{models::*, schema::TournamentDb};
use crate::cli::types::{MatchId, PlayerId, TeamId, TournamentId};
use crate::core::leaderboard::{self, BatsmanLine, BowlerLine};
use crate::core::standings::{self, MatchFacts, StandingsRow, TeamRef};
use crate::error::{Result, ScorebookError};
use rusqlite::{params, OptionalExtension, Row};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in unix seconds; 0 if the clock is broken.
pub(crate) fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Current wall-clock time in unix milliseconds; 0 if the clock is broken.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

impl TournamentDb {
    /// Create a tournament and return the stored row.
    pub fn create_tournament(&mut self, name: &str) -> Result<Tournament> {
        let created_at = now_secs();
        self.conn.execute(
            "INSERT INTO tournaments (name, created_at) VALUES (?1, ?2)",
            params![name, created_at],
        )?;
        let id = TournamentId::new(self.conn.last_insert_rowid());
        log::info!("created tournament {id} ({name})");
        self.get_tournament(id)
    }

    /// All tournaments, newest first.
    pub fn list_tournaments(&self) -> Result<Vec<Tournament>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, created_at, settings FROM tournaments
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], row_to_tournament)?;
        collect(rows)
    }

    pub fn get_tournament(&self, id: TournamentId) -> Result<Tournament> {
        self.conn
            .query_row(
                "SELECT id, name, created_at, settings FROM tournaments WHERE id = ?1",
                params![id.as_i64()],
                row_to_tournament,
            )
            .optional()?
            .ok_or(ScorebookError::TournamentNotFound { id: id.as_i64() })
    }

    /// Add a team to a tournament.
    pub fn add_team(
        &mut self,
        tournament_id: TournamentId,
        name: &str,
        logo: Option<&str>,
    ) -> Result<Team> {
        self.get_tournament(tournament_id)?;
        self.conn.execute(
            "INSERT INTO teams (tournament_id, name, logo) VALUES (?1, ?2, ?3)",
            params![tournament_id.as_i64(), name, logo],
        )?;
        let id = TeamId::new(self.conn.last_insert_rowid());
        self.get_team(id)
    }

    /// Delete a team; its players go with it.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM teams WHERE id = ?1",
            params![team_id.as_i64()],
        )?;
        if deleted == 0 {
            return Err(ScorebookError::TeamNotFound {
                id: team_id.as_i64(),
            });
        }
        Ok(())
    }

    pub fn get_team(&self, id: TeamId) -> Result<Team> {
        self.conn
            .query_row(
                "SELECT id, tournament_id, name, logo, playing_xi FROM teams WHERE id = ?1",
                params![id.as_i64()],
                row_to_team,
            )
            .optional()?
            .ok_or(ScorebookError::TeamNotFound { id: id.as_i64() })
    }

    pub fn list_teams(&self, tournament_id: TournamentId) -> Result<Vec<Team>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, tournament_id, name, logo, playing_xi FROM teams
             WHERE tournament_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![tournament_id.as_i64()], row_to_team)?;
        collect(rows)
    }

    /// Team id -> name for one tournament, for display joins.
    pub fn team_names(&self, tournament_id: TournamentId) -> Result<HashMap<TeamId, String>> {
        Ok(self
            .list_teams(tournament_id)?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect())
    }

    /// Add a player with zeroed statistics.
    pub fn add_player(&mut self, team_id: TeamId, name: &str) -> Result<Player> {
        self.get_team(team_id)?;
        self.conn.execute(
            "INSERT INTO players (team_id, name) VALUES (?1, ?2)",
            params![team_id.as_i64(), name],
        )?;
        let id = PlayerId::new(self.conn.last_insert_rowid());
        Ok(self.conn.query_row(
            "SELECT id, team_id, name, runs, balls_faced, wickets, balls_bowled,
                    runs_conceded, is_keeper, is_captain
             FROM players WHERE id = ?1",
            params![id.as_i64()],
            row_to_player,
        )?)
    }

    pub fn get_player(&self, id: PlayerId) -> Result<Option<Player>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, team_id, name, runs, balls_faced, wickets, balls_bowled,
                        runs_conceded, is_keeper, is_captain
                 FROM players WHERE id = ?1",
                params![id.as_i64()],
                row_to_player,
            )
            .optional()?)
    }

    pub fn list_players(&self, team_id: TeamId) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, team_id, name, runs, balls_faced, wickets, balls_bowled,
                    runs_conceded, is_keeper, is_captain
             FROM players WHERE team_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64()], row_to_player)?;
        collect(rows)
    }

    /// Persist scheduled fixtures, one match per pair, in discovery order.
    pub fn insert_fixtures(
        &mut self,
        tournament_id: TournamentId,
        pairs: &[(TeamId, TeamId)],
    ) -> Result<usize> {
        self.get_tournament(tournament_id)?;
        let tx = self.conn.transaction()?;
        for (a, b) in pairs {
            tx.execute(
                "INSERT INTO matches (tournament_id, team_a_id, team_b_id) VALUES (?1, ?2, ?3)",
                params![tournament_id.as_i64(), a.as_i64(), b.as_i64()],
            )?;
        }
        tx.commit()?;
        Ok(pairs.len())
    }

    pub fn get_match(&self, id: MatchId) -> Result<Match> {
        self.conn
            .query_row(
                "SELECT id, tournament_id, team_a_id, team_b_id, scheduled, played,
                        toss_winner_id, toss_choice, a_runs, a_overs, a_wickets,
                        b_runs, b_overs, b_wickets, winner, ball_log
                 FROM matches WHERE id = ?1",
                params![id.as_i64()],
                row_to_match,
            )
            .optional()?
            .ok_or(ScorebookError::MatchNotFound { id: id.as_i64() })
    }

    pub fn list_matches(&self, tournament_id: TournamentId) -> Result<Vec<Match>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, tournament_id, team_a_id, team_b_id, scheduled, played,
                    toss_winner_id, toss_choice, a_runs, a_overs, a_wickets,
                    b_runs, b_overs, b_wickets, winner, ball_log
             FROM matches WHERE tournament_id = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![tournament_id.as_i64()], row_to_match)?;
        collect(rows)
    }

    /// The ranked points table for a tournament.
    pub fn standings(&self, tournament_id: TournamentId) -> Result<Vec<StandingsRow>> {
        let teams: Vec<TeamRef> = self
            .list_teams(tournament_id)?
            .into_iter()
            .map(|t| TeamRef {
                id: t.id,
                name: t.name,
            })
            .collect();
        let matches: Vec<MatchFacts> = self
            .list_matches(tournament_id)?
            .into_iter()
            .map(|m| MatchFacts {
                team_a: m.team_a_id,
                team_b: m.team_b_id,
                played: m.played,
                a_runs: m.a_runs,
                a_overs: m.a_overs,
                b_runs: m.b_runs,
                b_overs: m.b_overs,
            })
            .collect();
        Ok(standings::compute_standings(&matches, &teams))
    }

    /// Top run scorers of a team by cumulative player statistics.
    pub fn top_batsmen(&self, team_id: TeamId, limit: usize) -> Result<Vec<BatsmanLine>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, runs FROM players
             WHERE team_id = ?1 ORDER BY runs DESC LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64(), limit as i64], |row| {
            Ok(BatsmanLine {
                player_id: PlayerId::new(row.get(0)?),
                name: row.get(1)?,
                runs: row.get(2)?,
            })
        })?;
        collect(rows)
    }

    /// Top wicket takers of a team by cumulative player statistics,
    /// cheaper economy breaking ties.
    pub fn top_bowlers(&self, team_id: TeamId, limit: usize) -> Result<Vec<BowlerLine>> {
        let lines = self
            .list_players(team_id)?
            .into_iter()
            .map(|p| BowlerLine {
                player_id: p.id,
                name: p.name.clone(),
                wickets: p.wickets,
                economy: p.bowling_economy(),
            })
            .collect();
        Ok(leaderboard::rank_bowlers(lines, limit))
    }

    /// Top run scorers derived from the raw delivery log, independent of
    /// the cumulative player counters.
    pub fn top_batsmen_from_deliveries(
        &self,
        team_id: TeamId,
        limit: usize,
    ) -> Result<Vec<BatsmanLine>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name, COALESCE(SUM(d.runs), 0) AS total_runs
             FROM players p
             JOIN deliveries d ON p.id = d.striker_id
             WHERE p.team_id = ?1
             GROUP BY p.id, p.name
             ORDER BY total_runs DESC
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64(), limit as i64], |row| {
            Ok(BatsmanLine {
                player_id: PlayerId::new(row.get(0)?),
                name: row.get(1)?,
                runs: row.get(2)?,
            })
        })?;
        collect(rows)
    }

    /// Top wicket takers derived from the raw delivery log.
    pub fn top_bowlers_from_deliveries(
        &self,
        team_id: TeamId,
        limit: usize,
    ) -> Result<Vec<BowlerLine>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.name,
                    COALESCE(SUM(d.wicket), 0) AS wickets,
                    COALESCE(SUM(d.runs), 0) AS conceded,
                    SUM(CASE WHEN TRIM(d.extras) NOT IN ('WD', 'NB') THEN 1 ELSE 0 END)
                        AS legal_balls
             FROM players p
             JOIN deliveries d ON p.id = d.bowler_id
             WHERE p.team_id = ?1
             GROUP BY p.id, p.name",
        )?;
        let rows = stmt.query_map(params![team_id.as_i64()], |row| {
            let wickets: i64 = row.get(2)?;
            let conceded: i64 = row.get(3)?;
            let legal_balls: i64 = row.get(4)?;
            Ok(BowlerLine {
                player_id: PlayerId::new(row.get(0)?),
                name: row.get(1)?,
                wickets: u32::try_from(wickets).unwrap_or(0),
                economy: leaderboard::economy(conceded, u32::try_from(legal_balls).unwrap_or(0)),
            })
        })?;
        let lines = collect(rows)?;
        Ok(leaderboard::rank_bowlers(lines, limit))
    }
}

fn collect<T>(rows: impl Iterator<Item = rusqlite::Result<T>>) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for row in rows {
        items.push(row?);
    }
    Ok(items)
}

pub(crate) fn row_to_tournament(row: &Row) -> rusqlite::Result<Tournament> {
    Ok(Tournament {
        id: TournamentId::new(row.get(0)?),
        name: row.get(1)?,
        created_at: row.get(2)?,
        settings: row.get(3)?,
    })
}

pub(crate) fn row_to_team(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: TeamId::new(row.get(0)?),
        tournament_id: TournamentId::new(row.get(1)?),
        name: row.get(2)?,
        logo: row.get(3)?,
        playing_xi: row.get(4)?,
    })
}

pub(crate) fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: PlayerId::new(row.get(0)?),
        team_id: TeamId::new(row.get(1)?),
        name: row.get(2)?,
        runs: row.get(3)?,
        balls_faced: row.get(4)?,
        wickets: row.get(5)?,
        balls_bowled: row.get(6)?,
        runs_conceded: row.get(7)?,
        is_keeper: row.get(8)?,
        is_captain: row.get(9)?,
    })
}

pub(crate) fn row_to_match(row: &Row) -> rusqlite::Result<Match> {
    let winner: Option<String> = row.get(14)?;
    Ok(Match {
        id: MatchId::new(row.get(0)?),
        tournament_id: TournamentId::new(row.get(1)?),
        team_a_id: TeamId::new(row.get(2)?),
        team_b_id: TeamId::new(row.get(3)?),
        scheduled: row.get(4)?,
        played: row.get(5)?,
        toss_winner_id: row.get::<_, Option<i64>>(6)?.map(TeamId::new),
        toss_choice: row.get(7)?,
        a_runs: row.get(8)?,
        a_overs: row.get(9)?,
        a_wickets: row.get(10)?,
        b_runs: row.get(11)?,
        b_overs: row.get(12)?,
        b_wickets: row.get(13)?,
        winner: winner.and_then(|w| w.parse().ok()),
        ball_log: row.get(15)?,
    })
}

pub(crate) fn row_to_delivery(row: &Row) -> rusqlite::Result<Delivery> {
    Ok(Delivery {
        id: row.get(0)?,
        match_id: MatchId::new(row.get(1)?),
        over: row.get(2)?,
        ball_in_over: row.get(3)?,
        batting_team_id: row.get::<_, Option<i64>>(4)?.map(TeamId::new),
        bowling_team_id: row.get::<_, Option<i64>>(5)?.map(TeamId::new),
        striker_id: row.get::<_, Option<i64>>(6)?.map(PlayerId::new),
        non_striker_id: row.get::<_, Option<i64>>(7)?.map(PlayerId::new),
        bowler_id: row.get::<_, Option<i64>>(8)?.map(PlayerId::new),
        runs: row.get(9)?,
        extras: row.get(10)?,
        wicket: row.get(11)?,
        wicket_type: row.get(12)?,
        created_at: row.get(13)?,
    })
}
