//! Construction of [`Game`]s.

use std::sync::Arc;

use crate::error::ConfigurationKind;
use crate::game::scorer::Game;
use crate::players::PlayerRegistry;
use crate::telemetry::{self, ScoringViolation, ViolationObserver};
use crate::{Frame, ScoringError};

/// Default number of players when none is configured.
pub const DEFAULT_PLAYERS: usize = 2;

/// The [`GameBuilder`] builds [`Game`]s.
///
/// After setting all appropriate values, use [`GameBuilder::start_game`] to
/// consume the builder and create the game.
///
/// # Example
///
/// ```
/// use pinfall::GameBuilder;
///
/// let game = GameBuilder::new()
///     .with_num_players(2)?
///     .add_frame([2, 3])
///     .add_frame([4, 6])
///     .add_frame([10])
///     .add_frame([1, 2])
///     .add_frame([4, 3])
///     .start_game();
///
/// assert_eq!(game.total_score()?, 48);
/// # Ok::<(), pinfall::ScoringError>(())
/// ```
#[must_use = "GameBuilder must be consumed by calling start_game"]
pub struct GameBuilder {
    num_players: usize,
    frames: Vec<Frame>,
    /// Optional observer for scoring violations.
    violation_observer: Option<Arc<dyn ViolationObserver>>,
}

impl std::fmt::Debug for GameBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Destructure to ensure all fields are included when new fields are added.
        let Self {
            num_players,
            frames,
            violation_observer,
        } = self;

        f.debug_struct("GameBuilder")
            .field("num_players", num_players)
            .field("frames", frames)
            .field("has_violation_observer", &violation_observer.is_some())
            .finish()
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    /// Construct a new builder with two players and no frames.
    pub fn new() -> Self {
        Self {
            num_players: DEFAULT_PLAYERS,
            frames: Vec::new(),
            violation_observer: None,
        }
    }

    /// Change the number of players. Default is 2.
    ///
    /// A rejected count is reported to the violation observer set so far.
    ///
    /// # Errors
    /// - Returns [`Configuration`] with [`ConfigurationKind::ZeroPlayers`] if `num_players` is 0.
    ///
    /// [`Configuration`]: ScoringError::Configuration
    pub fn with_num_players(mut self, num_players: usize) -> Result<Self, ScoringError> {
        if num_players == 0 {
            let err: ScoringError = ConfigurationKind::ZeroPlayers.into();
            telemetry::report(
                self.violation_observer.as_ref(),
                &ScoringViolation::from_error(&err, concat!(file!(), ":", line!())),
            );
            return Err(err);
        }
        self.num_players = num_players;
        Ok(self)
    }

    /// Replaces the frame sequence.
    pub fn with_frames<F>(mut self, frames: impl IntoIterator<Item = F>) -> Self
    where
        F: Into<Frame>,
    {
        self.frames = frames.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one frame to the frame sequence.
    pub fn add_frame(mut self, frame: impl Into<Frame>) -> Self {
        self.frames.push(frame.into());
        self
    }

    /// Sets an observer that receives scoring violations.
    ///
    /// Without an observer, violations are logged through
    /// [`TracingObserver`](crate::telemetry::TracingObserver).
    pub fn with_violation_observer(mut self, observer: Arc<dyn ViolationObserver>) -> Self {
        self.violation_observer = Some(observer);
        self
    }

    /// Consumes the builder and creates the game.
    pub fn start_game(self) -> Game {
        let Self {
            num_players,
            frames,
            violation_observer,
        } = self;
        Game::from_parts(frames, PlayerRegistry::new(num_players), violation_observer)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::telemetry::{CollectingObserver, ViolationKind, ViolationSeverity};

    #[test]
    fn defaults_to_two_players() {
        let game = GameBuilder::new().start_game();
        assert_eq!(game.num_players(), DEFAULT_PLAYERS);
        assert!(game.frames().is_empty());
    }

    #[test]
    fn zero_players_is_rejected() {
        let err = GameBuilder::new().with_num_players(0).unwrap_err();
        assert_eq!(
            err,
            ScoringError::Configuration {
                kind: ConfigurationKind::ZeroPlayers
            }
        );
    }

    #[test]
    fn zero_players_is_reported_to_the_configured_observer() {
        let observer = Arc::new(CollectingObserver::new());
        let result = GameBuilder::new()
            .with_violation_observer(observer.clone())
            .with_num_players(0);

        assert!(result.is_err());
        let violations = observer.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::Configuration);
        assert_eq!(violations[0].severity, ViolationSeverity::Warning);
    }

    #[test]
    fn with_frames_replaces_and_add_frame_appends() {
        let game = GameBuilder::new()
            .add_frame([1, 1])
            .with_frames([[2, 3], [3, 4]])
            .add_frame([10])
            .start_game();
        assert_eq!(
            game.frames(),
            &[Frame::from([2, 3]), Frame::from([3, 4]), Frame::from([10])]
        );
    }

    #[test]
    fn debug_hides_observer() {
        let builder = GameBuilder::new()
            .with_violation_observer(Arc::new(CollectingObserver::new()));
        let text = format!("{:?}", builder);
        assert!(text.contains("has_violation_observer: true"), "{text}");
    }
}
