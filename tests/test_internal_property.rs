//! Property-based tests for the scorer.
//!
//! # Properties Tested
//!
//! - Scoring is deterministic.
//! - The total equals the sum of the players' scores.
//! - Turns cover the frame sequence contiguously and rotate round-robin.
//! - Games of open frames score exactly their pin sum, one frame per turn.
//! - Without spares, scoring never fails.
//! - Bonus ledgers satisfy their invariants after every feed, spares included.
//! - A rejected spare always directly follows another spare.

use pinfall::telemetry::InvariantChecker;
use pinfall::{BonusLedger, Frame, FrameKind, Game, PlayerHandle, SpareMarker};
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Any frame of 0-3 rolls with 0-10 pins each.
fn frame_strategy() -> impl Strategy<Value = Frame> {
    prop::collection::vec(0u32..=10, 0..=3).prop_map(Frame::from)
}

/// Two rolls that leave at least one pin standing.
fn open_frame_strategy() -> impl Strategy<Value = Frame> {
    (0u32..10)
        .prop_flat_map(|first| (Just(first), 0..(10 - first)))
        .prop_map(|(first, second)| Frame::from([first, second]))
}

fn spare_free_frame_strategy() -> impl Strategy<Value = Frame> {
    frame_strategy().prop_filter("no spares", |frame| frame.kind() != FrameKind::Spare)
}

fn player_count_strategy() -> impl Strategy<Value = usize> {
    1usize..5
}

// ============================================================================
// Scorer Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_scoring_is_deterministic(
        frames in prop::collection::vec(frame_strategy(), 0..40),
        num_players in player_count_strategy(),
    ) {
        let first = Game::new(frames.clone(), num_players).unwrap().score();
        let second = Game::new(frames, num_players).unwrap().score();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_total_is_sum_of_players(
        frames in prop::collection::vec(spare_free_frame_strategy(), 0..40),
        num_players in player_count_strategy(),
    ) {
        let card = Game::new(frames, num_players).unwrap().score().unwrap();
        let sum: u32 = card.player_scores().iter().sum();
        prop_assert_eq!(card.total(), sum);
        prop_assert_eq!(card.player_scores().len(), num_players);
    }

    #[test]
    fn prop_turns_cover_sequence_and_rotate(
        frames in prop::collection::vec(spare_free_frame_strategy(), 1..40),
        num_players in player_count_strategy(),
    ) {
        let len = frames.len();
        let card = Game::new(frames, num_players).unwrap().score().unwrap();

        let mut expected_start = 0;
        for (i, turn) in card.turns().iter().enumerate() {
            prop_assert_eq!(turn.first_frame, expected_start);
            prop_assert!(turn.frames_played >= 1);
            prop_assert_eq!(turn.player, PlayerHandle::new(i % num_players));
            expected_start = turn.next_frame();
        }
        prop_assert_eq!(expected_start, len);

        // Only the last turn can run out of frames with bonuses open.
        let partials = card.turns().iter().filter(|t| t.partial_bonus.is_some()).count();
        prop_assert!(partials <= 1);
        if partials == 1 {
            prop_assert!(card.turns().last().unwrap().partial_bonus.is_some());
        }
    }

    #[test]
    fn prop_player_scores_never_decrease(
        frames in prop::collection::vec(spare_free_frame_strategy(), 1..40),
        num_players in player_count_strategy(),
    ) {
        let card = Game::new(frames, num_players).unwrap().score().unwrap();
        for player in 0..num_players {
            let handle = PlayerHandle::new(player);
            let scores: Vec<u32> = card.turns_of(handle).map(|t| t.score_after).collect();
            prop_assert!(scores.windows(2).all(|w| w[0] <= w[1]), "{:?}", scores);
            if let Some(&last) = scores.last() {
                prop_assert_eq!(card.player_score(handle), Some(last));
            }
        }
    }

    #[test]
    fn prop_open_frames_score_their_pins(
        frames in prop::collection::vec(open_frame_strategy(), 0..40),
        num_players in player_count_strategy(),
    ) {
        let pins: u32 = frames.iter().map(Frame::pin_sum).sum();
        let len = frames.len();
        let card = Game::new(frames, num_players).unwrap().score().unwrap();
        prop_assert_eq!(card.total(), pins);
        prop_assert_eq!(card.turns().len(), len);
    }

    #[test]
    fn prop_ledger_invariants_hold_with_spares(
        frames in prop::collection::vec(frame_strategy(), 0..40),
    ) {
        let mut ledger = BonusLedger::new();
        let mut previous = None;
        for (position, frame) in frames.iter().enumerate() {
            ledger.feed(frame.rolls());
            match ledger.classify_and_enqueue(frame, position, PlayerHandle::new(0)) {
                Ok(kind) => {
                    prop_assert_eq!(kind, frame.kind());
                    previous = Some(kind);
                },
                Err(err) => {
                    // Rejected frames enqueue nothing and leave the marker alone.
                    prop_assert_eq!(frame.kind(), FrameKind::Spare, "{}", err);
                    prop_assert_eq!(previous, Some(FrameKind::Spare));
                    prop_assert_eq!(ledger.marker(), SpareMarker::Spare);
                },
            }
            let result = ledger.check_invariants();
            prop_assert!(result.is_ok(), "invariants failed at {}: {:?}", position, result.err());
        }
    }

    #[test]
    fn prop_ledger_invariants_hold(
        frames in prop::collection::vec(spare_free_frame_strategy(), 0..40),
    ) {
        let mut ledger = BonusLedger::new();
        for (position, frame) in frames.iter().enumerate() {
            ledger.feed(frame.rolls());
            ledger
                .classify_and_enqueue(frame, position, PlayerHandle::new(0))
                .unwrap();
            let result = ledger.check_invariants();
            prop_assert!(result.is_ok(), "invariants failed at {}: {:?}", position, result.err());
        }
    }
}
