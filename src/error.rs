//! Error types for the scorebook CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScorebookError>;

#[derive(Error, Debug)]
pub enum ScorebookError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("tournament not found: {id}")]
    TournamentNotFound { id: i64 },

    #[error("team not found: {id}")]
    TeamNotFound { id: i64 },

    #[error("match not found: {id}")]
    MatchNotFound { id: i64 },

    #[error("need at least 2 teams to schedule fixtures, found {count}")]
    NotEnoughTeams { count: usize },

    #[error("invalid delivery payload: {reason}")]
    InvalidDelivery { reason: String },

    #[error("could not determine a data directory for the scorebook database")]
    NoDataDir,
}
