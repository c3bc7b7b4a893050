//! Violation reporting through observers.

#[path = "common/mod.rs"]
mod common;

use std::sync::Arc;

use common::{frames, init_tracing};
use pinfall::telemetry::{CollectingObserver, ViolationKind, ViolationSeverity};
use pinfall::{Frame, GameBuilder, PlayerHandle, ScoringError};

fn builder(rolls: &[&[u32]], num_players: usize) -> GameBuilder {
    init_tracing();
    GameBuilder::new()
        .with_num_players(num_players)
        .unwrap()
        .with_frames(frames(rolls))
}

#[test]
fn data_integrity_failure_is_reported_and_returned() {
    let observer = Arc::new(CollectingObserver::new());
    let result = builder(&[&[5, 5], &[5, 5], &[1, 1]], 1)
        .with_violation_observer(observer.clone())
        .start_game()
        .total_score();

    assert!(matches!(result, Err(ScoringError::DataIntegrity { position: 1, .. })));

    let violations = observer.violations();
    assert_eq!(violations.len(), 1);
    let violation = &violations[0];
    assert_eq!(violation.kind, ViolationKind::DataIntegrity);
    assert_eq!(violation.severity, ViolationSeverity::Error);
    assert_eq!(violation.position, Some(1));
    assert_eq!(violation.player, Some(PlayerHandle::new(0)));
    assert_eq!(violation.frame, Some(Frame::from([5, 5])));
}

#[test]
fn clean_game_reports_nothing() {
    let observer = Arc::new(CollectingObserver::new());
    let total = builder(&[&[2, 3], &[10], &[10], &[1, 2], &[4, 3]], 2)
        .with_violation_observer(observer.clone())
        .start_game()
        .total_score();

    assert_eq!(total, Ok(49));
    assert!(observer.is_empty(), "{:#?}", observer.violations());
}

#[test]
fn failure_without_observer_still_returns_error() {
    let result = builder(&[&[1, 9], &[9, 1]], 2).start_game().total_score();
    assert!(matches!(result, Err(ScoringError::DataIntegrity { .. })));
}

#[test]
fn failure_in_second_players_turn_names_that_player() {
    let observer = Arc::new(CollectingObserver::new());
    let result = builder(&[&[1, 1], &[6, 4], &[3, 7]], 2)
        .with_violation_observer(observer.clone())
        .start_game()
        .score();

    match result {
        Err(ScoringError::DataIntegrity {
            position, player, ..
        }) => {
            assert_eq!(position, 2);
            assert_eq!(player.as_usize(), 1);
        },
        other => panic!("expected data integrity error, got {other:?}"),
    }
    assert!(observer.for_player(PlayerHandle::new(0)).is_empty());
    let reported = observer.for_player(PlayerHandle::new(1));
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].frame, Some(Frame::from([3, 7])));
}

#[test]
fn rejected_player_count_reaches_the_observer() {
    init_tracing();
    let observer = Arc::new(CollectingObserver::new());
    let result = GameBuilder::new()
        .with_violation_observer(observer.clone())
        .with_num_players(0);

    assert!(result.is_err());
    assert!(observer.has_violation(ViolationKind::Configuration));
    assert_eq!(observer.violations()[0].severity, ViolationSeverity::Warning);
}
