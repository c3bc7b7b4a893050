//! Per-player score and bonus state.
//!
//! This module provides the [`PlayerRegistry`] that owns one [`PlayerState`]
//! per player for the lifetime of a single game.

use crate::bonus::BonusLedger;
use crate::error::ScoringError;
use crate::telemetry::{InvariantChecker, InvariantViolation};
use crate::PlayerHandle;

/// Score and pending bonuses of one player.
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    score: u32,
    bonuses: BonusLedger,
}

impl PlayerState {
    /// Creates a player with a score of 0 and no pending bonuses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score credited so far.
    #[inline]
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Adds points to the score. The score never decreases.
    pub fn credit(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// The player's pending bonuses.
    #[inline]
    #[must_use]
    pub fn bonuses(&self) -> &BonusLedger {
        &self.bonuses
    }

    /// Mutable access to the player's pending bonuses.
    #[inline]
    pub fn bonuses_mut(&mut self) -> &mut BonusLedger {
        &mut self.bonuses
    }
}

impl InvariantChecker for PlayerState {
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.bonuses.check_invariants()
    }
}

/// Registry holding the state of every player, indexed by [`PlayerHandle`].
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    players: Vec<PlayerState>,
}

impl PlayerRegistry {
    /// Creates a registry with `num_players` fresh players.
    #[must_use]
    pub fn new(num_players: usize) -> Self {
        Self {
            players: vec![PlayerState::new(); num_players],
        }
    }

    /// Number of players in the game.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Returns the state of the given player.
    pub fn get(&self, handle: PlayerHandle) -> Result<&PlayerState, ScoringError> {
        let num_players = self.players.len();
        self.players
            .get(handle.as_usize())
            .ok_or(ScoringError::InvalidPlayerHandle {
                handle,
                num_players,
            })
    }

    /// Returns mutable state of the given player.
    pub fn get_mut(&mut self, handle: PlayerHandle) -> Result<&mut PlayerState, ScoringError> {
        let num_players = self.players.len();
        self.players
            .get_mut(handle.as_usize())
            .ok_or(ScoringError::InvalidPlayerHandle {
                handle,
                num_players,
            })
    }

    /// The handle of the player after `handle`, wrapping around to player 0.
    #[must_use]
    pub fn next_handle(&self, handle: PlayerHandle) -> PlayerHandle {
        PlayerHandle::new((handle.as_usize() + 1) % self.players.len().max(1))
    }

    /// Iterates over all player states in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerHandle, &PlayerState)> {
        self.players
            .iter()
            .enumerate()
            .map(|(i, state)| (PlayerHandle::new(i), state))
    }

    /// Final scores in handle order.
    #[must_use]
    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(PlayerState::score).collect()
    }

    /// Sum of every player's score.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.players
            .iter()
            .fold(0, |acc, player| acc.saturating_add(player.score()))
    }
}

impl InvariantChecker for PlayerRegistry {
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.players.is_empty() {
            return Err(InvariantViolation::new(
                "PlayerRegistry",
                "registry has no players",
            ));
        }
        for (handle, player) in self.iter() {
            player
                .check_invariants()
                .map_err(|violation| violation.for_player(handle))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_starts_at_zero() {
        let registry = PlayerRegistry::new(3);
        assert_eq!(registry.num_players(), 3);
        assert_eq!(registry.scores(), vec![0, 0, 0]);
        assert_eq!(registry.total(), 0);
        assert!(registry.check_invariants().is_ok());
    }

    #[test]
    fn next_handle_wraps_around() {
        let registry = PlayerRegistry::new(2);
        assert_eq!(
            registry.next_handle(PlayerHandle::new(0)),
            PlayerHandle::new(1)
        );
        assert_eq!(
            registry.next_handle(PlayerHandle::new(1)),
            PlayerHandle::new(0)
        );
    }

    #[test]
    fn single_player_always_plays_next() {
        let registry = PlayerRegistry::new(1);
        assert_eq!(
            registry.next_handle(PlayerHandle::new(0)),
            PlayerHandle::new(0)
        );
    }

    #[test]
    fn out_of_range_handle_is_rejected() {
        let mut registry = PlayerRegistry::new(2);
        let err = registry.get_mut(PlayerHandle::new(2)).unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidPlayerHandle {
                handle: PlayerHandle::new(2),
                num_players: 2,
            }
        );
        assert!(registry.get(PlayerHandle::new(5)).is_err());
    }

    #[test]
    fn credit_accumulates_into_total() {
        let mut registry = PlayerRegistry::new(2);
        registry.get_mut(PlayerHandle::new(0)).unwrap().credit(5);
        registry.get_mut(PlayerHandle::new(1)).unwrap().credit(7);
        registry.get_mut(PlayerHandle::new(1)).unwrap().credit(1);
        assert_eq!(registry.scores(), vec![5, 8]);
        assert_eq!(registry.total(), 13);
    }
}
