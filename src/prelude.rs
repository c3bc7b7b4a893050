//! Convenient re-exports for common usage.
//!
//! ```rust
//! use pinfall::prelude::*;
//!
//! let card = GameBuilder::new()
//!     .with_num_players(1)?
//!     .add_frame([10])
//!     .add_frame([3, 4])
//!     .start_game()
//!     .score()?;
//! assert_eq!(card.total(), 24);
//! # Ok::<(), ScoringError>(())
//! ```

// Game construction and scoring
pub use crate::game::builder::GameBuilder;
pub use crate::game::input::GameInput;
pub use crate::game::score_card::{ScoreCard, TurnSummary};
pub use crate::game::scorer::Game;

// Fundamental types and constants
pub use crate::{Frame, FrameKind, PlayerHandle, ALL_PINS};

// Error handling
pub use crate::{ConfigurationKind, ScoringError, ScoringResult};
