//! Error types returned by scoring operations.

use std::error::Error;
use std::fmt;
use std::fmt::Display;

use crate::{Frame, PlayerHandle};

/// Describes why a game could not be constructed.
///
/// Carried by [`ScoringError::Configuration`]; converts into it via [`From`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConfigurationKind {
    /// A game needs at least one player.
    ZeroPlayers,
}

impl Display for ConfigurationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPlayers => write!(f, "the number of players must be at least 1"),
        }
    }
}

impl From<ConfigurationKind> for ScoringError {
    fn from(kind: ConfigurationKind) -> Self {
        Self::Configuration { kind }
    }
}

/// This enum contains all error messages this library can return. Scoring functions return a [`ScoringResult`].
///
/// None of these errors are retryable: scoring is a pure function of its input,
/// so the same input fails the same way every time.
///
/// [`ScoringResult`]: crate::ScoringResult
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScoringError {
    /// The game was constructed with invalid parameters.
    Configuration {
        /// Further specifies which parameter was invalid.
        kind: ConfigurationKind,
    },
    /// Two spare frames followed each other within one continued turn.
    DataIntegrity {
        /// The offending (second) spare frame.
        frame: Frame,
        /// Position of the offending frame in the frame sequence.
        position: usize,
        /// The player whose turn contained both spares.
        player: PlayerHandle,
    },
    /// A player handle outside of `0..num_players` was used.
    InvalidPlayerHandle {
        /// The player handle that was invalid.
        handle: PlayerHandle,
        /// The number of players in the game.
        num_players: usize,
    },
    /// Game input could not be deserialized.
    Serialization {
        /// A description of what failed to deserialize.
        context: String,
    },
}

impl Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::Configuration { kind } => {
                write!(f, "Invalid configuration: {}", kind)
            }
            ScoringError::DataIntegrity {
                frame,
                position,
                player,
            } => {
                write!(
                    f,
                    "Frame {} at index {} is a spare directly after another spare in player {}'s turn, expected a single-roll frame",
                    frame, position, player
                )
            }
            ScoringError::InvalidPlayerHandle {
                handle,
                num_players,
            } => {
                write!(
                    f,
                    "Invalid player handle {}: the game has {} players",
                    handle, num_players
                )
            }
            ScoringError::Serialization { context } => {
                write!(f, "Serialization error: {}", context)
            }
        }
    }
}

impl Error for ScoringError {}
