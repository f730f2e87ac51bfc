//! Ball-by-ball scoring rules.
//!
//! Every delivery event, whichever path it arrives through, is judged by
//! one predicate: does this ball count toward the striker's balls faced,
//! does it count toward the bowler's balls bowled, and how many extra
//! runs does it concede. Recognized extras codes are `"WD"` (wide) and
//! `"NB"` (no-ball); a numeric code like `"2"` is a legal ball carrying
//! extra conceded runs; anything else (including the empty string) is an
//! ordinary legal delivery.

use crate::core::overs::balls_to_overs;
use serde::Serialize;

/// Extras code for a wide.
pub const WIDE: &str = "WD";
/// Extras code for a no-ball.
pub const NO_BALL: &str = "NB";

/// Whether a no-ball is credited to the striker as a ball faced.
///
/// The two historical ingestion paths disagreed on this, so the rule is
/// an explicit parameter rather than a hard-coded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoBallPolicy {
    /// A `"NB"` ball is faced by nobody: not the striker, not the bowler.
    /// Used by the structured delivery path.
    #[default]
    ExtrasCodeOnly,
    /// The striker is still credited a ball faced off a no-ball; only
    /// the bowler's tally skips it. Used by the legacy ingestion path.
    CountsForStriker,
}

/// Outcome of judging one delivery's extras code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallRuling {
    pub counts_for_striker: bool,
    pub counts_for_bowler: bool,
}

/// Judge a delivery's extras code under the given no-ball policy.
pub fn rule_ball(extras: &str, policy: NoBallPolicy) -> BallRuling {
    let code = extras.trim();
    let counts_for_bowler = is_legal_ball(code);
    let counts_for_striker = match policy {
        NoBallPolicy::ExtrasCodeOnly => counts_for_bowler,
        NoBallPolicy::CountsForStriker => code != WIDE,
    };
    BallRuling {
        counts_for_striker,
        counts_for_bowler,
    }
}

/// A legal delivery counts toward the over tally: neither wide nor no-ball.
pub fn is_legal_ball(extras: &str) -> bool {
    let code = extras.trim();
    code != WIDE && code != NO_BALL
}

/// Extra conceded runs carried by a numeric extras code; 0 for anything else.
pub fn extras_runs(extras: &str) -> i64 {
    extras.trim().parse::<u32>().map_or(0, i64::from)
}

/// Live running totals for one batting side of a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InningsTotals {
    pub runs: i64,
    pub wickets: u32,
    pub balls: u32,
}

impl InningsTotals {
    /// Fold one delivery into the totals. Wides and no-balls score and
    /// can take wickets but do not advance the ball count.
    pub fn record(&mut self, runs: i64, wicket: bool, extras: &str) {
        self.runs += runs;
        if wicket {
            self.wickets += 1;
        }
        if is_legal_ball(extras) {
            self.balls += 1;
        }
    }

    /// Ball count rendered as display overs text.
    pub fn overs_text(&self) -> String {
        balls_to_overs(self.balls)
    }
}
