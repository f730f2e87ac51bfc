//! Points table and net run rate from completed match totals.

use crate::cli::types::TeamId;
use crate::core::overs::overs_to_balls;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// The match facts standings need: who played whom, and each side's
/// final total. Overs are the stored display text; malformed text
/// contributes zero balls rather than failing the whole table.
#[derive(Debug, Clone)]
pub struct MatchFacts {
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub played: bool,
    pub a_runs: i64,
    pub a_overs: String,
    pub b_runs: i64,
    pub b_overs: String,
}

/// A team entry in the table input.
#[derive(Debug, Clone)]
pub struct TeamRef {
    pub id: TeamId,
    pub name: String,
}

/// One ranked row of the points table.
#[derive(Debug, Clone, Serialize)]
pub struct StandingsRow {
    pub team_id: TeamId,
    pub team_name: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub tied: u32,
    pub points: u32,
    pub runs_for: i64,
    pub runs_against: i64,
    pub nrr: f64,
}

#[derive(Debug, Default)]
struct Tally {
    played: u32,
    won: u32,
    lost: u32,
    tied: u32,
    points: u32,
    runs_for: i64,
    balls_faced: u32,
    runs_against: i64,
    balls_bowled: u32,
}

/// Compute the ranked points table: win 2, tie 1 each, loss 0, net run
/// rate as the tiebreaker.
///
/// Unplayed matches are skipped. A match referencing a team missing from
/// `teams` contributes nothing for that side. Teams level on points and
/// NRR keep their input order (the sort is stable). Empty inputs produce
/// an empty table.
pub fn compute_standings(matches: &[MatchFacts], teams: &[TeamRef]) -> Vec<StandingsRow> {
    let mut tallies: HashMap<TeamId, Tally> =
        teams.iter().map(|t| (t.id, Tally::default())).collect();

    for m in matches {
        if !m.played {
            continue;
        }

        let a_balls = overs_to_balls(&m.a_overs);
        let b_balls = overs_to_balls(&m.b_overs);

        if let Some(a) = tallies.get_mut(&m.team_a) {
            a.played += 1;
            a.runs_for += m.a_runs;
            a.balls_faced += a_balls;
            a.runs_against += m.b_runs;
            a.balls_bowled += b_balls;
            match m.a_runs.cmp(&m.b_runs) {
                Ordering::Greater => {
                    a.won += 1;
                    a.points += 2;
                }
                Ordering::Less => a.lost += 1,
                Ordering::Equal => {
                    a.tied += 1;
                    a.points += 1;
                }
            }
        }
        if let Some(b) = tallies.get_mut(&m.team_b) {
            b.played += 1;
            b.runs_for += m.b_runs;
            b.balls_faced += b_balls;
            b.runs_against += m.a_runs;
            b.balls_bowled += a_balls;
            match m.b_runs.cmp(&m.a_runs) {
                Ordering::Greater => {
                    b.won += 1;
                    b.points += 2;
                }
                Ordering::Less => b.lost += 1,
                Ordering::Equal => {
                    b.tied += 1;
                    b.points += 1;
                }
            }
        }
    }

    let mut rows: Vec<StandingsRow> = teams
        .iter()
        .map(|team| {
            let tally = tallies.remove(&team.id).unwrap_or_default();
            StandingsRow {
                team_id: team.id,
                team_name: team.name.clone(),
                played: tally.played,
                won: tally.won,
                lost: tally.lost,
                tied: tally.tied,
                points: tally.points,
                runs_for: tally.runs_for,
                runs_against: tally.runs_against,
                nrr: net_run_rate(&tally),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.nrr.partial_cmp(&a.nrr).unwrap_or(Ordering::Equal))
    });
    rows
}

/// `runs_for` per over minus `runs_against` per over, rounded to 3 dp.
/// A side that has faced or bowled no balls contributes a 0 term instead
/// of dividing by zero.
fn net_run_rate(tally: &Tally) -> f64 {
    let rate_for = if tally.balls_faced > 0 {
        tally.runs_for as f64 / (tally.balls_faced as f64 / 6.0)
    } else {
        0.0
    };
    let rate_against = if tally.balls_bowled > 0 {
        tally.runs_against as f64 / (tally.balls_bowled as f64 / 6.0)
    } else {
        0.0
    };
    round_3(rate_for - rate_against)
}

fn round_3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: i64, name: &str) -> TeamRef {
        TeamRef {
            id: TeamId::new(id),
            name: name.to_string(),
        }
    }

    fn played(a: i64, b: i64, a_runs: i64, a_overs: &str, b_runs: i64, b_overs: &str) -> MatchFacts {
        MatchFacts {
            team_a: TeamId::new(a),
            team_b: TeamId::new(b),
            played: true,
            a_runs,
            a_overs: a_overs.to_string(),
            b_runs,
            b_overs: b_overs.to_string(),
        }
    }

    #[test]
    fn empty_inputs_produce_empty_table() {
        assert!(compute_standings(&[], &[]).is_empty());
    }

    #[test]
    fn zero_matches_produce_zero_rows() {
        let rows = compute_standings(&[], &[team(1, "Lions"), team(2, "Tigers")]);
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(row.played, 0);
            assert_eq!(row.won, 0);
            assert_eq!(row.lost, 0);
            assert_eq!(row.tied, 0);
            assert_eq!(row.points, 0);
            assert_eq!(row.nrr, 0.0);
        }
    }

    #[test]
    fn unplayed_matches_are_skipped() {
        let mut m = played(1, 2, 150, "20.0", 120, "18.0");
        m.played = false;
        let rows = compute_standings(&[m], &[team(1, "Lions"), team(2, "Tigers")]);
        assert!(rows.iter().all(|r| r.played == 0 && r.points == 0));
    }

    #[test]
    fn single_win_points_and_nrr() {
        // A: 150 in 20.0 overs, B: 120 in 18.0 overs.
        // NRR(A) = 150/20 - 120/18 = 7.5 - 6.667 = 0.833.
        let rows = compute_standings(
            &[played(1, 2, 150, "20.0", 120, "18.0")],
            &[team(1, "Lions"), team(2, "Tigers")],
        );
        assert_eq!(rows[0].team_name, "Lions");
        assert_eq!(rows[0].won, 1);
        assert_eq!(rows[0].points, 2);
        assert!((rows[0].nrr - 0.833).abs() < 1e-9);
        assert_eq!(rows[1].team_name, "Tigers");
        assert_eq!(rows[1].lost, 1);
        assert_eq!(rows[1].points, 0);
        assert!((rows[1].nrr + 0.833).abs() < 1e-9);
    }

    #[test]
    fn tie_splits_the_points() {
        let rows = compute_standings(
            &[played(1, 2, 150, "20.0", 150, "20.0")],
            &[team(1, "Lions"), team(2, "Tigers")],
        );
        for row in &rows {
            assert_eq!(row.tied, 1);
            assert_eq!(row.points, 1);
            assert_eq!(row.nrr, 0.0);
        }
    }

    #[test]
    fn points_rank_before_nrr_and_ties_keep_input_order() {
        // Team 3 beats team 1 narrowly, team 2 beats team 1 heavily:
        // 2 and 3 are level on points, 2 ranks first on NRR.
        let rows = compute_standings(
            &[
                played(2, 1, 200, "20.0", 100, "20.0"),
                played(3, 1, 150, "20.0", 140, "20.0"),
            ],
            &[team(1, "Lions"), team(2, "Tigers"), team(3, "Bears")],
        );
        assert_eq!(rows[0].team_name, "Tigers");
        assert_eq!(rows[1].team_name, "Bears");
        assert_eq!(rows[2].team_name, "Lions");

        // Identical records keep input order (stable sort).
        let rows = compute_standings(&[], &[team(9, "First"), team(4, "Second")]);
        assert_eq!(rows[0].team_name, "First");
        assert_eq!(rows[1].team_name, "Second");
    }

    #[test]
    fn malformed_overs_text_degrades_to_zero_balls() {
        let rows = compute_standings(
            &[played(1, 2, 150, "garbage", 120, "18.0")],
            &[team(1, "Lions"), team(2, "Tigers")],
        );
        // A's balls faced parse to 0, so the runs-for term is zeroed.
        assert!((rows[0].nrr - round_3(-(120.0 / 18.0))).abs() < 1e-9);
        assert_eq!(rows[0].won, 1);
    }

    #[test]
    fn matches_with_unknown_teams_count_for_known_side_only() {
        let rows = compute_standings(
            &[played(1, 99, 150, "20.0", 120, "18.0")],
            &[team(1, "Lions")],
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].won, 1);
    }
}
