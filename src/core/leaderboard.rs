//! Leaderboard ranking rules.

use crate::cli::types::PlayerId;
use serde::Serialize;
use std::cmp::Ordering;

/// Default number of entries a leaderboard query returns.
pub const DEFAULT_LIMIT: usize = 5;

/// A batting leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct BatsmanLine {
    pub player_id: PlayerId,
    pub name: String,
    pub runs: i64,
}

/// A bowling leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct BowlerLine {
    pub player_id: PlayerId,
    pub name: String,
    pub wickets: u32,
    pub economy: f64,
}

/// Runs conceded per over; 0.0 for a bowler who has bowled no balls.
pub fn economy(runs_conceded: i64, balls_bowled: u32) -> f64 {
    if balls_bowled == 0 {
        return 0.0;
    }
    runs_conceded as f64 / (balls_bowled as f64 / 6.0)
}

/// Rank bowlers by wickets descending, breaking ties with the lower
/// economy, and truncate to `limit`.
pub fn rank_bowlers(mut lines: Vec<BowlerLine>, limit: usize) -> Vec<BowlerLine> {
    lines.sort_by(|a, b| {
        b.wickets.cmp(&a.wickets).then(
            a.economy
                .partial_cmp(&b.economy)
                .unwrap_or(Ordering::Equal),
        )
    });
    lines.truncate(limit);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bowler(id: i64, name: &str, wickets: u32, economy: f64) -> BowlerLine {
        BowlerLine {
            player_id: PlayerId::new(id),
            name: name.to_string(),
            wickets,
            economy,
        }
    }

    #[test]
    fn economy_is_runs_per_over() {
        assert_eq!(economy(30, 30), 6.0);
        assert_eq!(economy(12, 6), 12.0);
        assert_eq!(economy(10, 0), 0.0);
    }

    #[test]
    fn wickets_rank_first_then_cheaper_economy() {
        let ranked = rank_bowlers(
            vec![
                bowler(1, "Expensive", 3, 9.5),
                bowler(2, "Thrifty", 3, 4.2),
                bowler(3, "Strike", 5, 8.0),
            ],
            5,
        );
        assert_eq!(ranked[0].name, "Strike");
        assert_eq!(ranked[1].name, "Thrifty");
        assert_eq!(ranked[2].name, "Expensive");
    }

    #[test]
    fn truncates_to_limit() {
        let lines: Vec<BowlerLine> = (0..10).map(|i| bowler(i, "B", 1, 6.0)).collect();
        assert_eq!(rank_bowlers(lines, 5).len(), 5);
        assert!(rank_bowlers(vec![], 5).is_empty());
    }
}
