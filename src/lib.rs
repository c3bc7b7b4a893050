//! # Pinfall
//!
//! Pinfall scores multi-player bowling games from a flat sequence of frames.
//!
//! Players take turns in order. A strike or spare cannot be valued when it is
//! played, so it opens a pending bonus that is fed the player's following rolls
//! until it can be credited. While a player has bonuses pending, their turn keeps
//! going and the next frame in the sequence is theirs as well.
//!
//! ```
//! use pinfall::Game;
//!
//! let frames = [vec![2, 3], vec![10], vec![10], vec![1, 2], vec![4, 3]];
//! let game = Game::new(frames, 2)?;
//! assert_eq!(game.total_score()?, 49);
//! # Ok::<(), pinfall::ScoringError>(())
//! ```
//!
//! This is a simplified scoring model, not the official rules: there is no
//! ten-frame limit and no special tenth frame.

#![forbid(unsafe_code)] // let us try
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub use bonus::{BonusLedger, PendingBonus, PendingKind, SpareMarker};
pub use error::{ConfigurationKind, ScoringError};
pub use frame::{Frame, FrameKind};
pub use game::builder::GameBuilder;
pub use game::input::GameInput;
pub use game::score_card::{ScoreCard, TurnSummary};
pub use game::scorer::Game;
pub use players::{PlayerRegistry, PlayerState};

pub mod bonus;
pub mod error;
pub mod frame;
pub mod players;
pub mod prelude;
pub mod telemetry;
/// Game construction, the turn walker and its results.
pub mod game {
    pub mod builder;
    pub mod input;
    pub mod score_card;
    pub mod scorer;
}

// #############
// # CONSTANTS #
// #############

/// Number of pins in a rack. A strike or spare knocks down exactly this many.
pub const ALL_PINS: u32 = 10;

/// A specialized `Result` type for scoring operations.
pub type ScoringResult<T> = std::result::Result<T, ScoringError>;

/// A unique identifier for a player in a game.
///
/// Handles `0` through `num_players - 1` are valid for a game. Player 0 plays
/// the first frame.
///
/// # Examples
///
/// ```
/// use pinfall::PlayerHandle;
///
/// let player = PlayerHandle::new(1);
/// assert!(player.is_valid_player_for(2));
/// assert!(!player.is_valid_player_for(1));
/// assert_eq!(player.as_usize(), 1);
/// ```
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct PlayerHandle(usize);

impl PlayerHandle {
    /// Creates a new `PlayerHandle` from a `usize` value.
    ///
    /// Note: This does not validate the handle against a specific game.
    #[inline]
    #[must_use]
    pub const fn new(handle: usize) -> Self {
        PlayerHandle(handle)
    }

    /// Returns the underlying `usize` value.
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns `true` if this handle refers to a player of a game with
    /// `num_players` players.
    #[inline]
    #[must_use]
    pub const fn is_valid_player_for(self, num_players: usize) -> bool {
        self.0 < num_players
    }
}

impl std::fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for PlayerHandle {
    #[inline]
    fn from(value: usize) -> Self {
        PlayerHandle(value)
    }
}

impl From<PlayerHandle> for usize {
    #[inline]
    fn from(handle: PlayerHandle) -> Self {
        handle.0
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn player_handle_conversions() {
        let handle = PlayerHandle::from(3usize);
        assert_eq!(usize::from(handle), 3);
        assert_eq!(handle.to_string(), "3");
    }

    #[test]
    fn player_handle_validity() {
        assert!(PlayerHandle::new(0).is_valid_player_for(1));
        assert!(!PlayerHandle::new(1).is_valid_player_for(1));
    }

    #[test]
    fn player_handle_serializes_as_number() {
        let json = serde_json::to_string(&PlayerHandle::new(4)).unwrap();
        assert_eq!(json, "4");
    }
}
