//! Results of a scored game.

use crate::PlayerHandle;

/// One turn as it was consumed from the frame sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TurnSummary {
    /// The player who played this turn.
    pub player: PlayerHandle,
    /// Index of the first frame of the turn.
    pub first_frame: usize,
    /// Number of frames the turn consumed. Always at least 1.
    pub frames_played: usize,
    /// The player's score after the turn.
    pub score_after: u32,
    /// Set when the frames ran out with bonuses still open; holds the partial
    /// bonus value that was credited.
    pub partial_bonus: Option<u32>,
}

impl TurnSummary {
    /// Index of the frame the next turn starts at.
    #[inline]
    #[must_use]
    pub fn next_frame(&self) -> usize {
        self.first_frame + self.frames_played
    }
}

/// Final scores of a game.
///
/// # Example
///
/// ```
/// use pinfall::{Game, PlayerHandle};
///
/// let card = Game::new([[2, 3], [3, 4], [1, 0]], 2)?.score()?;
/// assert_eq!(card.player_score(PlayerHandle::new(0)), Some(6));
/// assert_eq!(card.player_score(PlayerHandle::new(1)), Some(7));
/// assert_eq!(card.total(), 13);
/// # Ok::<(), pinfall::ScoringError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScoreCard {
    player_scores: Vec<u32>,
    total: u32,
    turns: Vec<TurnSummary>,
}

impl ScoreCard {
    pub(crate) fn new(player_scores: Vec<u32>, turns: Vec<TurnSummary>) -> Self {
        let total = player_scores
            .iter()
            .fold(0u32, |acc, &score| acc.saturating_add(score));
        Self {
            player_scores,
            total,
            turns,
        }
    }

    /// Sum of all players' scores.
    #[inline]
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Scores in player handle order.
    #[must_use]
    pub fn player_scores(&self) -> &[u32] {
        &self.player_scores
    }

    /// Score of one player, or `None` if the handle is not part of the game.
    #[must_use]
    pub fn player_score(&self, handle: PlayerHandle) -> Option<u32> {
        self.player_scores.get(handle.as_usize()).copied()
    }

    /// Every turn in the order it was played.
    #[must_use]
    pub fn turns(&self) -> &[TurnSummary] {
        &self.turns
    }

    /// Turns played by one player.
    pub fn turns_of(&self, handle: PlayerHandle) -> impl Iterator<Item = &TurnSummary> {
        self.turns.iter().filter(move |turn| turn.player == handle)
    }

    /// Serializes the score card to a JSON string.
    ///
    /// Returns `None` if serialization fails (which should not happen).
    #[cfg(feature = "json")]
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// Serializes the score card to a pretty-printed JSON string.
    #[cfg(feature = "json")]
    #[must_use]
    pub fn to_json_pretty(&self) -> Option<String> {
        serde_json::to_string_pretty(self).ok()
    }
}
