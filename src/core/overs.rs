//! Conversion between `"overs.balls"` text and a total-legal-balls count.
//!
//! Bowling totals are stored as text like `"3.4"` (3 overs and 4 balls).
//! The fractional part is a literal ball count, not a decimal fraction:
//! `"3.4"` is 22 balls. Parsing never fails: scoring input arrives from
//! untrusted forms, and a malformed overs string must degrade to zero
//! rather than abort the surrounding computation.

/// Parse `"<overs>"` or `"<overs>.<balls>"` into a total ball count.
///
/// Ball counts of 6 or more in the fractional part are accepted and
/// simply added (`"3.10"` is 28 balls). Anything unparseable yields 0.
pub fn overs_to_balls(overs: &str) -> u32 {
    let text = overs.trim();
    if text.is_empty() {
        return 0;
    }
    if let Some((whole, balls)) = text.split_once('.') {
        match (whole.parse::<u32>(), balls.parse::<u32>()) {
            (Ok(o), Ok(b)) => o.saturating_mul(6).saturating_add(b),
            _ => 0,
        }
    } else {
        text.parse::<u32>().map_or(0, |o| o.saturating_mul(6))
    }
}

/// Render a ball count as canonical `"<overs>.<balls>"` text.
///
/// Inverse of [`overs_to_balls`]: `overs_to_balls(&balls_to_overs(n)) == n`
/// for every `n`.
pub fn balls_to_overs(balls: u32) -> String {
    format!("{}.{}", balls / 6, balls % 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_overs() {
        assert_eq!(overs_to_balls("20"), 120);
        assert_eq!(overs_to_balls("0"), 0);
    }

    #[test]
    fn parses_overs_and_balls() {
        assert_eq!(overs_to_balls("3.4"), 22);
        assert_eq!(overs_to_balls("0.5"), 5);
        assert_eq!(overs_to_balls("19.0"), 114);
    }

    #[test]
    fn ball_part_six_or_more_is_added_verbatim() {
        assert_eq!(overs_to_balls("3.10"), 28);
    }

    #[test]
    fn malformed_input_yields_zero() {
        assert_eq!(overs_to_balls(""), 0);
        assert_eq!(overs_to_balls("   "), 0);
        assert_eq!(overs_to_balls("abc"), 0);
        assert_eq!(overs_to_balls("3."), 0);
        assert_eq!(overs_to_balls(".4"), 0);
        assert_eq!(overs_to_balls("3.4.5"), 0);
        assert_eq!(overs_to_balls("-2.1"), 0);
        assert_eq!(overs_to_balls("3,4"), 0);
    }

    #[test]
    fn renders_canonical_form() {
        assert_eq!(balls_to_overs(0), "0.0");
        assert_eq!(balls_to_overs(22), "3.4");
        assert_eq!(balls_to_overs(120), "20.0");
    }

    #[test]
    fn round_trips_for_any_count() {
        for n in 0..=400 {
            assert_eq!(overs_to_balls(&balls_to_overs(n)), n);
        }
    }
}
