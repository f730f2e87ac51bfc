//! Typed building blocks for CLI arguments.

pub mod ids;

pub use ids::{MatchId, PlayerId, TeamId, TournamentId};
