//! Integration tests for the two ball-ingestion paths.

use scorebook::storage::{parse_delivery_payload, DeliveryInput, TournamentDb};
use scorebook::{MatchId, PlayerId, ScorebookError, TeamId};
use serde_json::json;

struct Setup {
    db: TournamentDb,
    lions: TeamId,
    tigers: TeamId,
    striker: PlayerId,
    bowler: PlayerId,
    match_id: MatchId,
}

fn setup() -> Setup {
    let mut db = TournamentDb::new_in_memory().unwrap();
    let tournament = db.create_tournament("Cup").unwrap();
    let lions = db.add_team(tournament.id, "Lions", None).unwrap();
    let tigers = db.add_team(tournament.id, "Tigers", None).unwrap();
    let striker = db.add_player(lions.id, "A. Okafor").unwrap();
    let bowler = db.add_player(tigers.id, "D. Mbeki").unwrap();
    db.insert_fixtures(tournament.id, &[(lions.id, tigers.id)]).unwrap();
    let match_id = db.list_matches(tournament.id).unwrap()[0].id;
    Setup {
        db,
        lions: lions.id,
        tigers: tigers.id,
        striker: striker.id,
        bowler: bowler.id,
        match_id,
    }
}

#[test]
fn structured_path_writes_deliveries_only() {
    let mut s = setup();
    let input = DeliveryInput {
        batting_team_id: Some(s.lions),
        bowling_team_id: Some(s.tigers),
        striker_id: Some(s.striker),
        bowler_id: Some(s.bowler),
        runs: 4,
        ball_in_over: 1,
        ..Default::default()
    };
    s.db.record_delivery(s.match_id, &input).unwrap();

    assert_eq!(s.db.list_deliveries(s.match_id).unwrap().len(), 1);
    assert!(s.db.get_match(s.match_id).unwrap().audit_log().is_empty());
}

#[test]
fn legacy_path_writes_audit_log_only() {
    let mut s = setup();
    let payload = json!({
        "over": 0,
        "ball_in_over": 1,
        "batsman_id": s.striker.as_i64(),
        "bowler_id": s.bowler.as_i64(),
        "runs": 4,
    });
    s.db.ingest_ball(s.match_id, &payload).unwrap();

    assert!(s.db.list_deliveries(s.match_id).unwrap().is_empty());
    assert_eq!(s.db.get_match(s.match_id).unwrap().audit_log().len(), 1);

    let striker = s.db.get_player(s.striker).unwrap().unwrap();
    assert_eq!(striker.runs, 4);
    assert_eq!(striker.balls_faced, 1);
}

#[test]
fn both_paths_share_the_wide_rule() {
    let mut s = setup();

    let mut input = DeliveryInput {
        striker_id: Some(s.striker),
        bowler_id: Some(s.bowler),
        runs: 1,
        ..Default::default()
    };
    input.extras = "WD".to_string();
    s.db.record_delivery(s.match_id, &input).unwrap();

    s.db.ingest_ball(
        s.match_id,
        &json!({
            "batsman_id": s.striker.as_i64(),
            "bowler_id": s.bowler.as_i64(),
            "runs": 1,
            "extras_type": "WD",
        }),
    )
    .unwrap();

    // Two wides: runs credited, no ball counts anywhere.
    let striker = s.db.get_player(s.striker).unwrap().unwrap();
    assert_eq!(striker.runs, 2);
    assert_eq!(striker.balls_faced, 0);
    let bowler = s.db.get_player(s.bowler).unwrap().unwrap();
    assert_eq!(bowler.runs_conceded, 2);
    assert_eq!(bowler.balls_bowled, 0);
}

#[test]
fn no_ball_policy_differs_between_paths() {
    let mut s = setup();

    let input = DeliveryInput {
        striker_id: Some(s.striker),
        bowler_id: Some(s.bowler),
        extras: "NB".to_string(),
        ..Default::default()
    };
    s.db.record_delivery(s.match_id, &input).unwrap();
    let striker = s.db.get_player(s.striker).unwrap().unwrap();
    assert_eq!(striker.balls_faced, 0);

    s.db.ingest_ball(
        s.match_id,
        &json!({
            "batsman_id": s.striker.as_i64(),
            "bowler_id": s.bowler.as_i64(),
            "is_no_ball": true,
        }),
    )
    .unwrap();
    let striker = s.db.get_player(s.striker).unwrap().unwrap();
    assert_eq!(striker.balls_faced, 1);

    // Neither path ever counts a no-ball for the bowler.
    let bowler = s.db.get_player(s.bowler).unwrap().unwrap();
    assert_eq!(bowler.balls_bowled, 0);
}

#[test]
fn duplicate_payloads_double_count() {
    let mut s = setup();
    let input = DeliveryInput {
        striker_id: Some(s.striker),
        bowler_id: Some(s.bowler),
        runs: 6,
        ..Default::default()
    };
    s.db.record_delivery(s.match_id, &input).unwrap();
    s.db.record_delivery(s.match_id, &input).unwrap();

    let striker = s.db.get_player(s.striker).unwrap().unwrap();
    assert_eq!(striker.runs, 12);
    assert_eq!(striker.balls_faced, 2);
}

#[test]
fn structured_payload_parsing_rejects_bad_shapes() {
    assert!(parse_delivery_payload(&json!({"runs": 4})).is_ok());

    let err = parse_delivery_payload(&json!({"runs": "four"})).unwrap_err();
    assert!(matches!(err, ScorebookError::InvalidDelivery { .. }));

    let err = parse_delivery_payload(&json!(42)).unwrap_err();
    assert!(matches!(err, ScorebookError::InvalidDelivery { .. }));
}

#[test]
fn unknown_match_is_rejected_by_both_paths() {
    let mut db = TournamentDb::new_in_memory().unwrap();
    let err = db
        .record_delivery(MatchId::new(1), &DeliveryInput::default())
        .unwrap_err();
    assert!(matches!(err, ScorebookError::MatchNotFound { .. }));

    let err = db.ingest_ball(MatchId::new(1), &json!({})).unwrap_err();
    assert!(matches!(err, ScorebookError::MatchNotFound { .. }));
}
