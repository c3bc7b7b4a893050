//! Reporting of scoring problems to observers.
//!
//! Every error a game hits while being built or scored is also turned into a
//! [`ScoringViolation`] and handed to the game's [`ViolationObserver`]. Games
//! without an observer log through [`TracingObserver`]. Invariant checks (debug
//! builds, or the `paranoid` feature) report through the same path.
//!
//! A report never replaces the returned error.
//!
//! # Example
//!
//! ```
//! use pinfall::telemetry::{CollectingObserver, ViolationKind};
//! use pinfall::{Frame, GameBuilder, PlayerHandle};
//! use std::sync::Arc;
//!
//! let observer = Arc::new(CollectingObserver::new());
//! let game = GameBuilder::new()
//!     .with_violation_observer(observer.clone())
//!     .with_num_players(1)?
//!     .with_frames([[5, 5], [5, 5]])
//!     .start_game();
//!
//! assert!(game.total_score().is_err());
//! let reported = observer.for_player(PlayerHandle::new(0));
//! assert_eq!(reported[0].kind, ViolationKind::DataIntegrity);
//! assert_eq!(reported[0].frame, Some(Frame::from([5, 5])));
//! # Ok::<(), pinfall::ScoringError>(())
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Frame, PlayerHandle, ScoringError};

/// How bad a violation is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// A game was refused before any frame was scored.
    Warning,
    /// Scoring stopped because the frame sequence cannot be scored.
    Error,
    /// Engine state broke an invariant. This is a bug in pinfall.
    Critical,
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ViolationKind {
    /// Two spares back to back within one player's turn.
    DataIntegrity,
    /// The player count or the game input was rejected.
    Configuration,
    /// A ledger or registry invariant check failed.
    Invariant,
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::DataIntegrity => "data_integrity",
            Self::Configuration => "configuration",
            Self::Invariant => "invariant",
        })
    }
}

/// A scoring problem, located in the frame sequence where possible.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ScoringViolation {
    /// How bad it is.
    pub severity: ViolationSeverity,
    /// What went wrong.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
    /// Source location that reported it (file:line).
    pub location: &'static str,
    /// The player whose turn was being scored.
    pub player: Option<PlayerHandle>,
    /// Index of the offending frame in the frame sequence.
    pub position: Option<usize>,
    /// The offending frame.
    pub frame: Option<Frame>,
}

impl ScoringViolation {
    fn unlocated(
        severity: ViolationSeverity,
        kind: ViolationKind,
        message: String,
        location: &'static str,
    ) -> Self {
        Self {
            severity,
            kind,
            message,
            location,
            player: None,
            position: None,
            frame: None,
        }
    }

    /// Describes an error returned by the builder or the scorer.
    ///
    /// # Example
    ///
    /// ```
    /// use pinfall::telemetry::{ScoringViolation, ViolationKind, ViolationSeverity};
    /// use pinfall::{Frame, PlayerHandle, ScoringError};
    ///
    /// let err = ScoringError::DataIntegrity {
    ///     frame: Frame::from([3, 7]),
    ///     position: 4,
    ///     player: PlayerHandle::new(1),
    /// };
    /// let violation = ScoringViolation::from_error(&err, "scorer.rs:1");
    /// assert_eq!(violation.severity, ViolationSeverity::Error);
    /// assert_eq!(violation.kind, ViolationKind::DataIntegrity);
    /// assert_eq!(violation.position, Some(4));
    /// assert_eq!(violation.message, err.to_string());
    /// ```
    #[must_use]
    pub fn from_error(err: &ScoringError, location: &'static str) -> Self {
        let message = err.to_string();
        match err {
            ScoringError::Configuration { .. } | ScoringError::Serialization { .. } => {
                Self::unlocated(
                    ViolationSeverity::Warning,
                    ViolationKind::Configuration,
                    message,
                    location,
                )
            },
            ScoringError::DataIntegrity {
                frame,
                position,
                player,
            } => Self {
                player: Some(*player),
                position: Some(*position),
                frame: Some(frame.clone()),
                ..Self::unlocated(
                    ViolationSeverity::Error,
                    ViolationKind::DataIntegrity,
                    message,
                    location,
                )
            },
            // The walker only hands out handles from its own registry.
            ScoringError::InvalidPlayerHandle { handle, .. } => Self {
                player: Some(*handle),
                ..Self::unlocated(
                    ViolationSeverity::Critical,
                    ViolationKind::Invariant,
                    message,
                    location,
                )
            },
        }
    }

    /// Describes a failed invariant check made at `stage` of scoring.
    #[must_use]
    pub fn broken_invariant(
        violation: &InvariantViolation,
        stage: &str,
        location: &'static str,
    ) -> Self {
        Self {
            player: violation.player,
            ..Self::unlocated(
                ViolationSeverity::Critical,
                ViolationKind::Invariant,
                format!("{} ({})", violation, stage),
                location,
            )
        }
    }
}

impl std::fmt::Display for ScoringViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} at {}: {}",
            self.severity, self.kind, self.location, self.message
        )
    }
}

/// Receives scoring violations.
///
/// With the `sync-send` feature, observers must be `Send + Sync`.
///
/// # Example
///
/// ```
/// use pinfall::telemetry::{ScoringViolation, ViolationObserver};
///
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct CountingObserver {
///     count: AtomicUsize,
/// }
///
/// impl ViolationObserver for CountingObserver {
///     fn on_violation(&self, _violation: &ScoringViolation) {
///         self.count.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
#[cfg(feature = "sync-send")]
pub trait ViolationObserver: Send + Sync {
    /// Called once per violation.
    fn on_violation(&self, violation: &ScoringViolation);
}

/// Receives scoring violations.
#[cfg(not(feature = "sync-send"))]
pub trait ViolationObserver {
    /// Called once per violation.
    fn on_violation(&self, violation: &ScoringViolation);
}

/// Logs violations through `tracing`: warnings at `WARN`, everything else at `ERROR`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ViolationObserver for TracingObserver {
    fn on_violation(&self, violation: &ScoringViolation) {
        let ScoringViolation {
            severity,
            kind,
            message,
            location,
            player,
            position,
            frame,
        } = violation;
        let player = player.map(PlayerHandle::as_usize);
        let rolls = frame.as_ref().map(Frame::rolls);

        if *severity == ViolationSeverity::Warning {
            tracing::warn!(%kind, location, ?player, ?position, ?rolls, "{}", message);
        } else {
            tracing::error!(%severity, %kind, location, ?player, ?position, ?rolls, "{}", message);
        }
    }
}

/// Keeps every violation it receives. Mostly useful in tests.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    violations: Mutex<Vec<ScoringViolation>>,
}

impl CollectingObserver {
    /// Creates an observer with nothing collected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything collected so far, in report order.
    #[must_use]
    pub fn violations(&self) -> Vec<ScoringViolation> {
        self.violations.lock().clone()
    }

    /// Number of violations collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.lock().len()
    }

    /// `true` if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.lock().is_empty()
    }

    /// `true` if a violation of `kind` was reported.
    #[must_use]
    pub fn has_violation(&self, kind: ViolationKind) -> bool {
        self.violations.lock().iter().any(|v| v.kind == kind)
    }

    /// Violations raised during `player`'s turns.
    #[must_use]
    pub fn for_player(&self, player: PlayerHandle) -> Vec<ScoringViolation> {
        self.violations
            .lock()
            .iter()
            .filter(|v| v.player == Some(player))
            .cloned()
            .collect()
    }
}

impl ViolationObserver for CollectingObserver {
    fn on_violation(&self, violation: &ScoringViolation) {
        self.violations.lock().push(violation.clone());
    }
}

/// Hands `violation` to `observer`, or logs it through [`TracingObserver`].
pub fn report(observer: Option<&Arc<dyn ViolationObserver>>, violation: &ScoringViolation) {
    match observer {
        Some(observer) => observer.on_violation(violation),
        None => TracingObserver.on_violation(violation),
    }
}

// ==========================================
// Runtime Invariant Checking
// ==========================================

/// An internal invariant that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Type whose invariant broke.
    pub type_name: &'static str,
    /// The invariant, stated as what went wrong.
    pub invariant: &'static str,
    /// Values that show the breakage.
    pub details: Option<String>,
    /// Owner of the broken state, when it belongs to one player.
    pub player: Option<PlayerHandle>,
}

impl InvariantViolation {
    /// Creates a violation of `invariant` on `type_name`.
    #[must_use]
    pub fn new(type_name: &'static str, invariant: &'static str) -> Self {
        Self {
            type_name,
            invariant,
            details: None,
            player: None,
        }
    }

    /// Attaches diagnostic values.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attributes the broken state to `player`.
    #[must_use]
    pub fn for_player(mut self, player: PlayerHandle) -> Self {
        self.player = Some(player);
        self
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.type_name, self.invariant)?;
        if let Some(player) = self.player {
            write!(f, " for player {}", player)?;
        }
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Types whose internal state can be checked at runtime.
pub trait InvariantChecker {
    /// Returns the first broken invariant, if any.
    fn check_invariants(&self) -> Result<(), InvariantViolation>;
}

/// Checks `$target`'s invariants and reports a failure to `$observer` as a
/// critical [`ViolationKind::Invariant`] violation.
///
/// Compiled in for debug builds and with the `paranoid` feature; a no-op otherwise.
#[macro_export]
#[cfg(any(debug_assertions, feature = "paranoid"))]
macro_rules! debug_check_invariants {
    ($observer:expr, $target:expr, $stage:literal) => {{
        use $crate::telemetry::InvariantChecker as _;
        if let Err(violation) = $target.check_invariants() {
            $crate::telemetry::report(
                $observer,
                &$crate::telemetry::ScoringViolation::broken_invariant(
                    &violation,
                    $stage,
                    concat!(file!(), ":", line!()),
                ),
            );
        }
    }};
}

/// No-op version for release builds without the `paranoid` feature.
#[macro_export]
#[cfg(not(any(debug_assertions, feature = "paranoid")))]
macro_rules! debug_check_invariants {
    ($observer:expr, $target:expr, $stage:literal) => {{}};
}
