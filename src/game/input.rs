//! Serializable game input.

use crate::game::builder::{GameBuilder, DEFAULT_PLAYERS};
use crate::game::scorer::Game;
use crate::{Frame, ScoringResult};

fn default_num_players() -> usize {
    DEFAULT_PLAYERS
}

/// A frame sequence plus player count, as supplied by a caller.
///
/// In JSON the frames are plain lists of rolls:
///
/// ```
/// use pinfall::GameInput;
///
/// let input = GameInput::from_json(r#"{ "frames": [[2, 3], [4, 6], [10], [1, 2], [4, 3]] }"#)?;
/// assert_eq!(input.num_players, 2);
/// assert_eq!(input.into_game()?.total_score()?, 48);
/// # Ok::<(), pinfall::ScoringError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameInput {
    /// The frame sequence, in play order.
    pub frames: Vec<Frame>,
    /// Number of players. Defaults to 2.
    #[serde(default = "default_num_players")]
    pub num_players: usize,
}

impl GameInput {
    /// Creates an input from frames and a player count.
    #[must_use]
    pub fn new(frames: Vec<Frame>, num_players: usize) -> Self {
        Self {
            frames,
            num_players,
        }
    }

    /// Parses input from JSON.
    ///
    /// # Errors
    /// - Returns [`ScoringError::Serialization`] if the JSON does not describe a game.
    ///
    /// [`ScoringError::Serialization`]: crate::ScoringError::Serialization
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> ScoringResult<Self> {
        serde_json::from_str(json).map_err(|err| crate::ScoringError::Serialization {
            context: format!("invalid game input: {}", err),
        })
    }

    /// Validates the player count and creates the game.
    ///
    /// # Errors
    /// - Returns [`ScoringError::Configuration`] if `num_players` is 0.
    ///
    /// [`ScoringError::Configuration`]: crate::ScoringError::Configuration
    pub fn into_game(self) -> ScoringResult<Game> {
        Ok(GameBuilder::new()
            .with_num_players(self.num_players)?
            .with_frames(self.frames)
            .start_game())
    }
}
