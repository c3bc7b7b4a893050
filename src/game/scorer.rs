//! The turn walker: attributes frames to players and drives bonus resolution.
//!
//! A turn starts at some frame and keeps consuming frames for the same player
//! for as long as that player has strike or spare bonuses waiting. The turn
//! closes on the first frame after which nothing is pending, and the next frame
//! belongs to the next player. If the sequence runs out mid-turn, whatever the
//! pending bonuses have accumulated is credited as is.

use std::sync::Arc;

use tracing::debug;

use crate::debug_check_invariants;
use crate::game::builder::GameBuilder;
use crate::game::score_card::{ScoreCard, TurnSummary};
use crate::players::PlayerRegistry;
use crate::telemetry::{self, ScoringViolation, ViolationObserver};
use crate::{Frame, FrameKind, PlayerHandle, ScoringError, ScoringResult};

/// A single bowling game, ready to be scored once.
///
/// Scoring consumes the game, so an engine can never be scored twice or
/// observed half-way through a scan.
///
/// # Example
///
/// ```
/// use pinfall::Game;
///
/// let frames = [vec![2, 3], vec![10], vec![4, 6], vec![1], vec![4, 3]];
/// let game = Game::new(frames, 2)?;
/// assert_eq!(game.total_score()?, 44);
/// # Ok::<(), pinfall::ScoringError>(())
/// ```
pub struct Game {
    frames: Vec<Frame>,
    players: PlayerRegistry,
    violation_observer: Option<Arc<dyn ViolationObserver>>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            frames,
            players,
            violation_observer,
        } = self;

        f.debug_struct("Game")
            .field("frames", frames)
            .field("players", players)
            .field("has_violation_observer", &violation_observer.is_some())
            .finish()
    }
}

impl Game {
    /// Creates a game over `frames` for `num_players` players.
    ///
    /// # Errors
    /// - Returns [`ScoringError::Configuration`] if `num_players` is 0.
    pub fn new<F>(frames: impl IntoIterator<Item = F>, num_players: usize) -> ScoringResult<Self>
    where
        F: Into<Frame>,
    {
        Ok(GameBuilder::new()
            .with_num_players(num_players)?
            .with_frames(frames)
            .start_game())
    }

    pub(crate) fn from_parts(
        frames: Vec<Frame>,
        players: PlayerRegistry,
        violation_observer: Option<Arc<dyn ViolationObserver>>,
    ) -> Self {
        Self {
            frames,
            players,
            violation_observer,
        }
    }

    /// Number of players in this game.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.num_players()
    }

    /// The frame sequence being scored.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Scores the game and returns the sum of all players' scores.
    ///
    /// # Errors
    /// - Returns [`ScoringError::DataIntegrity`] if a player's turn contains two
    ///   spares back to back. No partial score is returned.
    pub fn total_score(self) -> ScoringResult<u32> {
        self.score().map(|card| card.total())
    }

    /// Scores the game and returns per-player scores and a summary of every turn.
    ///
    /// # Errors
    /// - Returns [`ScoringError::DataIntegrity`] if a player's turn contains two
    ///   spares back to back.
    pub fn score(mut self) -> ScoringResult<ScoreCard> {
        let mut turns = Vec::new();
        let mut index = 0;
        let mut active = PlayerHandle::new(0);

        while index < self.frames.len() {
            if index != 0 {
                active = self.players.next_handle(active);
            }
            debug!(player = %active, frame = index, "turn started");

            let turn = match self.play_turn(active, index) {
                Ok(turn) => turn,
                Err(err) => {
                    self.report(&err);
                    return Err(err);
                },
            };
            debug!(
                player = %active,
                frames_played = turn.frames_played,
                score = turn.score_after,
                "turn finished"
            );
            index = turn.next_frame();
            turns.push(turn);
        }

        debug_check_invariants!(
            self.violation_observer.as_ref(),
            self.players,
            "after final turn"
        );
        let card = ScoreCard::new(self.players.scores(), turns);
        debug!(total = card.total(), "game complete");
        Ok(card)
    }

    /// Plays one turn for `player` starting at frame `start`.
    fn play_turn(&mut self, player: PlayerHandle, start: usize) -> ScoringResult<TurnSummary> {
        let state = self.players.get_mut(player)?;
        state.bonuses_mut().start_turn();

        let mut index = start;
        while index < self.frames.len() {
            let frame = &self.frames[index];

            // Earlier bonuses see this frame's rolls before the frame itself is classified.
            let resolved = state.bonuses_mut().feed(frame.rolls());
            state.credit(resolved);
            let kind = state
                .bonuses_mut()
                .classify_and_enqueue(frame, index, player)?;
            debug_check_invariants!(self.violation_observer.as_ref(), state, "after frame");

            debug!(
                player = %player,
                frame = index,
                rolls = %frame,
                kind = %kind,
                score = state.score(),
                pending = state.bonuses().pending_len(),
                "frame played"
            );
            index += 1;

            if !state.bonuses().has_pending() {
                if kind == FrameKind::Normal {
                    state.credit(frame.pin_sum());
                }
                return Ok(TurnSummary {
                    player,
                    first_frame: start,
                    frames_played: index - start,
                    score_after: state.score(),
                    partial_bonus: None,
                });
            }
        }

        // Out of frames with bonuses still open.
        let partial = state.bonuses().drain_partial();
        state.credit(partial);
        debug!(player = %player, partial, "frames exhausted with pending bonuses");
        Ok(TurnSummary {
            player,
            first_frame: start,
            frames_played: index - start,
            score_after: state.score(),
            partial_bonus: Some(partial),
        })
    }

    fn report(&self, err: &ScoringError) {
        telemetry::report(
            self.violation_observer.as_ref(),
            &ScoringViolation::from_error(err, concat!(file!(), ":", line!())),
        );
    }
}

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;

    fn score(frames: &[&[u32]], num_players: usize) -> ScoreCard {
        Game::new(frames.iter().map(|rolls| Frame::from(*rolls)), num_players)
            .unwrap()
            .score()
            .unwrap()
    }

    #[test]
    fn open_frames_rotate_every_frame() {
        let card = score(&[&[2, 3], &[3, 4], &[1, 0], &[1, 2], &[3, 3]], 2);
        assert_eq!(card.player_scores(), &[12, 10]);
        assert_eq!(card.total(), 22);
        assert_eq!(card.turns().len(), 5);
        assert!(card.turns().iter().all(|t| t.frames_played == 1));
    }

    #[test]
    fn spare_then_strike_keeps_the_turn() {
        let card = score(&[&[2, 3], &[4, 6], &[10], &[1, 2], &[4, 3]], 2);
        assert_eq!(card.player_scores(), &[12, 36]);
        let second = &card.turns()[1];
        assert_eq!(second.player, PlayerHandle::new(1));
        assert_eq!(second.first_frame, 1);
        assert_eq!(second.frames_played, 3);
        assert_eq!(card.turns()[2].player, PlayerHandle::new(0));
    }

    #[test]
    fn lone_strike_at_end_credits_partial_bonus() {
        let card = score(&[&[10]], 1);
        assert_eq!(card.total(), 10);
        assert_eq!(card.turns()[0].partial_bonus, Some(10));
    }

    #[test]
    fn strike_then_single_roll_at_end() {
        // [3] does not close the turn: the strike still needs one more roll.
        let card = score(&[&[10], &[3]], 1);
        assert_eq!(card.total(), 13);
        assert_eq!(card.turns().len(), 1);
    }

    #[test]
    fn normal_frame_leaving_bonus_open_is_not_credited_directly() {
        // [3] feeds the strike but keeps it open; [4, 1] completes it (10+3+4)
        // and closes the turn, crediting its own 5.
        let card = score(&[&[10], &[3], &[4, 1]], 1);
        assert_eq!(card.total(), 17 + 5);
    }

    #[test]
    fn empty_sequence_scores_zero() {
        let card = score(&[], 3);
        assert_eq!(card.total(), 0);
        assert_eq!(card.player_scores(), &[0, 0, 0]);
        assert!(card.turns().is_empty());
    }

    #[test]
    fn back_to_back_spares_fail() {
        let game = Game::new([[5, 5], [5, 5], [1, 1]], 1).unwrap();
        let err = game.total_score().unwrap_err();
        assert_eq!(
            err,
            ScoringError::DataIntegrity {
                frame: Frame::from([5, 5]),
                position: 1,
                player: PlayerHandle::new(0),
            }
        );
    }

    #[test]
    fn spares_in_different_turns_are_fine() {
        // Player 0: [5,5] then [1,1] closes the turn. Player 1 then spares.
        let card = score(&[&[5, 5], &[1, 1], &[5, 5], &[2, 2]], 2);
        assert_eq!(card.player_scores(), &[11 + 2, 12 + 4]);
    }
}
