//! Command implementations for the scorebook CLI

pub mod ball;
pub mod common;
pub mod export;
pub mod leaderboard;
pub mod matches;
pub mod result;
pub mod schedule;
pub mod score;
pub mod standings;
pub mod team;
pub mod tournament;
