//! Common utilities shared across commands.

use crate::error::Result;
use crate::storage::TournamentDb;
use serde::Serialize;

/// Context containing the open database handle commands work against.
///
/// Constructed once per invocation and passed down explicitly; the
/// transactional scope of every operation lives behind this handle.
pub struct CommandContext {
    pub db: TournamentDb,
}

impl CommandContext {
    /// Open the default database (see [`TournamentDb::open_default`]).
    pub fn new() -> Result<Self> {
        let db = TournamentDb::open_default()?;
        Ok(Self { db })
    }

    /// Wrap an already-open database (used by tests).
    pub fn with_db(db: TournamentDb) -> Self {
        Self { db }
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
