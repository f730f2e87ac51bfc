//! CLI argument definitions and parsing structures.

use super::types::{MatchId, PlayerId, TeamId, TournamentId};
use crate::core::leaderboard::DEFAULT_LIMIT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "scorebook", about = "Cricket tournament scorebook CLI")]
pub struct Scorebook {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create and list tournaments
    Tournament {
        #[clap(subcommand)]
        cmd: TournamentCmd,
    },

    /// Manage a tournament's teams
    Team {
        #[clap(subcommand)]
        cmd: TeamCmd,
    },

    /// Manage a team's players
    Player {
        #[clap(subcommand)]
        cmd: PlayerCmd,
    },

    /// Generate fixtures so each team appears in a target number of matches.
    ///
    /// Best effort: with few or oddly many teams some may end up short
    /// of the target, but no pairing repeats and nobody exceeds it.
    Schedule {
        tournament_id: TournamentId,

        /// Fixtures each team should appear in.
        #[clap(long, default_value_t = 3)]
        matches_per_team: u32,
    },

    /// List a tournament's fixtures and recorded results
    Matches { tournament_id: TournamentId },

    /// Record a completed match's final totals.
    ///
    /// Marks the match played and derives the winner (higher total;
    /// equal totals tie). Re-running overwrites the totals.
    #[clap(name = "result")]
    MatchResult {
        match_id: MatchId,

        #[clap(long, default_value_t = 0)]
        a_runs: i64,

        /// Side A's overs as text, e.g. "19.4".
        #[clap(long, default_value = "0.0")]
        a_overs: String,

        #[clap(long, default_value_t = 0)]
        a_wickets: u32,

        #[clap(long, default_value_t = 0)]
        b_runs: i64,

        /// Side B's overs as text, e.g. "20.0".
        #[clap(long, default_value = "0.0")]
        b_overs: String,

        #[clap(long, default_value_t = 0)]
        b_wickets: u32,

        /// Bulk per-player stat increments as JSON, keyed by player id:
        /// {"7": {"runs": 31, "balls": 22, "wickets": 1, "runs_conceded": 18, "overs_bowled": "4.0"}}
        #[clap(long)]
        player_stats: Option<String>,
    },

    /// Record deliveries ball by ball
    Ball {
        #[clap(subcommand)]
        cmd: BallCmd,
    },

    /// Live score of a match: per-side totals plus the recent balls
    Score {
        match_id: MatchId,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Points table with net run rate
    Standings {
        tournament_id: TournamentId,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Team leaderboards
    Top {
        #[clap(subcommand)]
        cmd: TopCmd,
    },

    /// Export a tournament (teams, matches, players, standings) as one JSON file
    Export {
        tournament_id: TournamentId,

        /// Output path; defaults to tournament_<id>_export.json.
        #[clap(long, short)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum TournamentCmd {
    /// Create a tournament
    Create {
        #[clap(long)]
        name: String,
    },

    /// List tournaments, newest first
    List,
}

#[derive(Debug, Subcommand)]
pub enum TeamCmd {
    /// Add a team, optionally with a comma-separated starting roster
    Add {
        tournament_id: TournamentId,

        #[clap(long)]
        name: String,

        /// Comma-separated player names: --players "A. Okafor, S. Rai"
        #[clap(long)]
        players: Option<String>,

        /// Logo file name or URL, stored verbatim.
        #[clap(long)]
        logo: Option<String>,
    },

    /// Delete a team and its players
    Remove { team_id: TeamId },
}

#[derive(Debug, Subcommand)]
pub enum PlayerCmd {
    /// Add a player with zeroed statistics
    Add {
        team_id: TeamId,

        #[clap(long)]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BallCmd {
    /// Record one structured delivery.
    ///
    /// Updates the striker's and bowler's cumulative statistics in the
    /// same transaction. There is no deduplication: recording the same
    /// ball twice counts it twice.
    Record {
        match_id: MatchId,

        /// Full delivery payload as JSON; overrides the field flags.
        #[clap(long)]
        payload: Option<String>,

        #[clap(long, default_value_t = 0)]
        over: u32,

        #[clap(long, default_value_t = 1)]
        ball_in_over: u32,

        #[clap(long)]
        batting_team: Option<TeamId>,

        #[clap(long)]
        bowling_team: Option<TeamId>,

        #[clap(long)]
        striker: Option<PlayerId>,

        #[clap(long)]
        non_striker: Option<PlayerId>,

        #[clap(long)]
        bowler: Option<PlayerId>,

        /// Runs off the bat.
        #[clap(long, default_value_t = 0)]
        runs: i64,

        /// Extras code: "WD" wide, "NB" no-ball, or a number of extra runs.
        #[clap(long, default_value = "")]
        extras: String,

        #[clap(long)]
        wicket: bool,

        #[clap(long, default_value = "")]
        wicket_type: String,
    },

    /// Append a raw ball payload to the match's audit log.
    ///
    /// The legacy scoring path: the payload lands verbatim in the
    /// match's ball log (not in the structured delivery table) and the
    /// player statistics it names are updated.
    Ingest {
        match_id: MatchId,

        /// Raw ball payload as JSON.
        #[clap(long)]
        payload: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum TopCmd {
    /// Top run scorers of a team
    Batsmen {
        team_id: TeamId,

        #[clap(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Derive from the raw delivery log instead of cumulative stats.
        #[clap(long)]
        from_deliveries: bool,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Top wicket takers of a team, cheaper economy breaking ties
    Bowlers {
        team_id: TeamId,

        #[clap(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Derive from the raw delivery log instead of cumulative stats.
        #[clap(long)]
        from_deliveries: bool,

        /// Output as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
