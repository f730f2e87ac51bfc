//! Database connection and schema management

use crate::error::{Result, ScorebookError};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Database connection manager for tournament data.
///
/// This is the repository object threaded through every core operation:
/// commands construct one and pass it down, and each delivery or result
/// submission runs inside a single transaction on its connection.
pub struct TournamentDb {
    pub(crate) conn: Connection,
}

impl TournamentDb {
    /// Open (creating if needed) the database at the default location:
    /// `$SCOREBOOK_DB` if set, otherwise `scorebook.db` under the
    /// platform data directory.
    pub fn open_default() -> Result<Self> {
        let db_path = Self::database_path()?;

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        log::debug!("opening scorebook database at {}", db_path.display());
        Self::open(&db_path)
    }

    /// Open (creating if needed) a database at an explicit path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.configure()?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Fresh in-memory database, used by tests.
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.configure()?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Resolve the database file location.
    fn database_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(crate::DB_PATH_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        let data_dir = dirs::data_dir().ok_or(ScorebookError::NoDataDir)?;
        Ok(data_dir.join("scorebook").join("scorebook.db"))
    }

    /// Cascade deletes flow through foreign keys; SQLite needs the
    /// pragma per connection.
    fn configure(&mut self) -> Result<()> {
        self.conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(())
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tournaments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                settings TEXT NOT NULL DEFAULT '{}'
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tournament_id INTEGER NOT NULL
                    REFERENCES tournaments(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                logo TEXT,
                playing_xi TEXT NOT NULL DEFAULT '[]'
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                team_id INTEGER NOT NULL
                    REFERENCES teams(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                runs INTEGER NOT NULL DEFAULT 0,
                balls_faced INTEGER NOT NULL DEFAULT 0,
                wickets INTEGER NOT NULL DEFAULT 0,
                balls_bowled INTEGER NOT NULL DEFAULT 0,
                runs_conceded INTEGER NOT NULL DEFAULT 0,
                is_keeper INTEGER NOT NULL DEFAULT 0,
                is_captain INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS matches (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tournament_id INTEGER NOT NULL
                    REFERENCES tournaments(id) ON DELETE CASCADE,
                team_a_id INTEGER NOT NULL,
                team_b_id INTEGER NOT NULL,
                scheduled TEXT,
                played INTEGER NOT NULL DEFAULT 0,
                toss_winner_id INTEGER,
                toss_choice TEXT,
                a_runs INTEGER NOT NULL DEFAULT 0,
                a_overs TEXT NOT NULL DEFAULT '0.0',
                a_wickets INTEGER NOT NULL DEFAULT 0,
                b_runs INTEGER NOT NULL DEFAULT 0,
                b_overs TEXT NOT NULL DEFAULT '0.0',
                b_wickets INTEGER NOT NULL DEFAULT 0,
                winner TEXT,
                ball_log TEXT NOT NULL DEFAULT '[]'
            )",
            [],
        )?;

        // Replay order for a match is the rowid, assigned at insert time
        // inside the recording transaction.
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS deliveries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                match_id INTEGER NOT NULL
                    REFERENCES matches(id) ON DELETE CASCADE,
                over_number INTEGER NOT NULL,
                ball_in_over INTEGER NOT NULL,
                batting_team_id INTEGER,
                bowling_team_id INTEGER,
                striker_id INTEGER,
                non_striker_id INTEGER,
                bowler_id INTEGER,
                runs INTEGER NOT NULL DEFAULT 0,
                extras TEXT NOT NULL DEFAULT '',
                wicket INTEGER NOT NULL DEFAULT 0,
                wicket_type TEXT NOT NULL DEFAULT '',
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_deliveries_match
             ON deliveries(match_id)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_matches_tournament
             ON matches(tournament_id)",
            [],
        )?;

        Ok(())
    }
}
