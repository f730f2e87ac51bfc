//! Storage layer for the scorebook
//!
//! A thin abstraction over SQLite, organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: CRUD, standings and leaderboard reads
//! - `ledger`: transactional ball-by-ball and result recording

pub mod ledger;
pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use ledger::{parse_delivery_payload, DeliveryLine, LiveScore, TeamScore, RECENT_WINDOW};
pub use models::*;
pub use schema::TournamentDb;
