//! Cricket Tournament Scorebook Library
//!
//! Manages cricket tournaments end to end: teams and players, fixture
//! scheduling, an append-only ball-by-ball delivery ledger, live match
//! scores, a points table with net run rate, and player leaderboards,
//! all persisted in a local SQLite database.
//!
//! ## Features
//!
//! - **Fixture Scheduling**: best-effort pairing so each team plays a
//!   target number of matches, with no duplicate or self pairings
//! - **Delivery Ledger**: every recorded ball updates the striker's and
//!   bowler's cumulative statistics atomically
//! - **Live Scores**: per-side totals and a recent-balls feed replayed
//!   from the delivery log
//! - **Standings**: points table (win 2 / tie 1) ranked with net run
//!   rate as the tiebreaker
//! - **Leaderboards**: top batsmen and bowlers per team, from either
//!   cumulative statistics or the raw delivery log
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scorebook::storage::TournamentDb;
//!
//! # fn example() -> scorebook::Result<()> {
//! let mut db = TournamentDb::open_default()?;
//! let tournament = db.create_tournament("Summer Cup")?;
//! let lions = db.add_team(tournament.id, "Lions", None)?;
//! let _striker = db.add_player(lions.id, "A. Okafor")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Point the CLI at a specific database file:
//! ```bash
//! export SCOREBOOK_DB=/tmp/scorebook.db
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{MatchId, PlayerId, TeamId, TournamentId};
pub use error::{Result, ScorebookError};

pub const DB_PATH_ENV_VAR: &str = "SCOREBOOK_DB";
