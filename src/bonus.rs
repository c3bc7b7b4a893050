//! Deferred strike and spare bonuses.
//!
//! A strike or spare cannot be credited when it is played: its value depends on
//! rolls that come later. Each one becomes a [`PendingBonus`] in the player's
//! [`BonusLedger`], which is fed every roll the player makes afterwards and
//! credits the bonus as soon as enough rolls are known.
//!
//! Every pending bonus sees the same roll stream. Two strikes pending at once
//! both receive the next roll; rolls are not split between entries.

use smallvec::SmallVec;
use tracing::trace;

use crate::error::ScoringError;
use crate::frame::{Frame, FrameKind, RollVec};
use crate::telemetry::{InvariantChecker, InvariantViolation};
use crate::{PlayerHandle, ALL_PINS};

/// Which kind of frame a pending bonus belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingKind {
    /// Resolves once it holds 3 values: the strike itself plus the next two rolls.
    Strike,
    /// Resolves once it holds 2 values: the spare's 10 plus the next roll.
    Spare,
}

impl PendingKind {
    /// Number of accumulated values at which a bonus of this kind resolves.
    #[inline]
    #[must_use]
    pub const fn required_len(self) -> usize {
        match self {
            Self::Strike => 3,
            Self::Spare => 2,
        }
    }
}

/// A bonus calculation still waiting for rolls.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PendingBonus {
    kind: PendingKind,
    accumulated: RollVec,
}

impl PendingBonus {
    /// Starts a strike bonus, seeded with the strike frame's own rolls.
    #[must_use]
    pub fn strike(frame: &Frame) -> Self {
        Self {
            kind: PendingKind::Strike,
            accumulated: RollVec::from_slice(frame.rolls()),
        }
    }

    /// Starts a spare bonus, seeded with a single 10 however the spare was split.
    #[must_use]
    pub fn spare() -> Self {
        let mut accumulated = RollVec::new();
        accumulated.push(ALL_PINS);
        Self {
            kind: PendingKind::Spare,
            accumulated,
        }
    }

    /// The kind of frame this bonus belongs to.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> PendingKind {
        self.kind
    }

    /// Values collected so far, starting with the seed.
    #[inline]
    #[must_use]
    pub fn accumulated(&self) -> &[u32] {
        &self.accumulated
    }

    /// Sum of the values collected so far.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.accumulated
            .iter()
            .fold(0, |acc, &pins| acc.saturating_add(pins))
    }

    /// Returns `true` once the bonus holds as many values as its kind requires.
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.accumulated.len() >= self.kind.required_len()
    }

    /// Appends a roll if the bonus is not yet complete.
    ///
    /// Returns `true` if this roll completed the bonus.
    fn push(&mut self, pins: u32) -> bool {
        if self.is_complete() {
            return false;
        }
        self.accumulated.push(pins);
        self.is_complete()
    }
}

impl InvariantChecker for PendingBonus {
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.accumulated.len() > self.kind.required_len() {
            return Err(
                InvariantViolation::new("PendingBonus", "accumulated more values than required")
                    .with_details(format!(
                        "kind={:?}, len={}, required={}",
                        self.kind,
                        self.accumulated.len(),
                        self.kind.required_len()
                    )),
            );
        }
        if self.accumulated.is_empty() {
            return Err(InvariantViolation::new(
                "PendingBonus",
                "bonus has no seed value",
            ));
        }
        Ok(())
    }
}

/// Whether the previous frame of the current turn was a spare.
///
/// Only lives for the span of one turn; [`BonusLedger::start_turn`] resets it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SpareMarker {
    /// Turn just started.
    #[default]
    None,
    /// Previous frame was a strike.
    Strike,
    /// Previous frame was a spare.
    Spare,
    /// Previous frame was neither.
    Normal,
}

impl From<FrameKind> for SpareMarker {
    fn from(kind: FrameKind) -> Self {
        match kind {
            FrameKind::Strike => Self::Strike,
            FrameKind::Spare => Self::Spare,
            FrameKind::Normal => Self::Normal,
        }
    }
}

/// A player's queue of pending bonuses.
///
/// Strikes and spares are kept in separate queues, each in the order they were
/// played.
#[derive(Debug, Clone, Default)]
pub struct BonusLedger {
    strikes: SmallVec<[PendingBonus; 4]>,
    spares: SmallVec<[PendingBonus; 2]>,
    marker: SpareMarker,
}

impl BonusLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the per-turn spare marker.
    pub fn start_turn(&mut self) {
        self.marker = SpareMarker::None;
    }

    /// The classification of the previous frame in this turn.
    #[must_use]
    pub fn marker(&self) -> SpareMarker {
        self.marker
    }

    /// Feeds each roll, in order, to every pending bonus.
    ///
    /// Bonuses that become complete are removed and their value is returned
    /// as the amount to credit. A completed bonus never sees later rolls.
    pub fn feed(&mut self, rolls: &[u32]) -> u32 {
        let mut credited = 0u32;
        for &pins in rolls {
            credited = credited
                .saturating_add(Self::feed_queue(&mut self.strikes, pins))
                .saturating_add(Self::feed_queue(&mut self.spares, pins));
        }
        credited
    }

    fn feed_queue<A>(queue: &mut SmallVec<A>, pins: u32) -> u32
    where
        A: smallvec::Array<Item = PendingBonus>,
    {
        let mut credited = 0u32;
        queue.retain(|bonus| {
            if bonus.push(pins) {
                let value = bonus.value();
                trace!(kind = ?bonus.kind(), accumulated = ?bonus.accumulated(), value, "bonus resolved");
                credited = credited.saturating_add(value);
                false
            } else {
                true
            }
        });
        credited
    }

    /// Classifies a frame that was just fed and opens a bonus for it if it is a
    /// strike or spare.
    ///
    /// A spare directly after another spare within the same turn is rejected
    /// and nothing is enqueued.
    pub fn classify_and_enqueue(
        &mut self,
        frame: &Frame,
        position: usize,
        player: PlayerHandle,
    ) -> Result<FrameKind, ScoringError> {
        let kind = frame.kind();
        match kind {
            FrameKind::Strike => self.strikes.push(PendingBonus::strike(frame)),
            FrameKind::Spare => {
                if self.marker == SpareMarker::Spare {
                    return Err(ScoringError::DataIntegrity {
                        frame: frame.clone(),
                        position,
                        player,
                    });
                }
                self.spares.push(PendingBonus::spare());
            },
            FrameKind::Normal => {},
        }
        self.marker = kind.into();
        Ok(kind)
    }

    /// Returns `true` if any strike or spare bonus is still waiting for rolls.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.strikes.is_empty() || !self.spares.is_empty()
    }

    /// Number of pending bonuses of both kinds.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.strikes.len() + self.spares.len()
    }

    /// Iterates over pending bonuses, strikes first.
    pub fn pending(&self) -> impl Iterator<Item = &PendingBonus> {
        self.strikes.iter().chain(self.spares.iter())
    }

    /// Sum of whatever every pending bonus has accumulated so far.
    ///
    /// Used when the frame sequence runs out before the bonuses can complete.
    /// The bonuses stay in the ledger.
    #[must_use]
    pub fn drain_partial(&self) -> u32 {
        self.pending()
            .fold(0, |acc, bonus| acc.saturating_add(bonus.value()))
    }
}

impl InvariantChecker for BonusLedger {
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for bonus in self.pending() {
            bonus.check_invariants()?;
            if bonus.is_complete() {
                return Err(InvariantViolation::new(
                    "BonusLedger",
                    "completed bonus left in the ledger",
                )
                .with_details(format!("{:?}", bonus)));
            }
        }
        if let Some(bonus) = self.strikes.iter().find(|b| b.kind() != PendingKind::Strike) {
            return Err(
                InvariantViolation::new("BonusLedger", "non-strike bonus in strike queue")
                    .with_details(format!("{:?}", bonus)),
            );
        }
        if let Some(bonus) = self.spares.iter().find(|b| b.kind() != PendingKind::Spare) {
            return Err(
                InvariantViolation::new("BonusLedger", "non-spare bonus in spare queue")
                    .with_details(format!("{:?}", bonus)),
            );
        }
        Ok(())
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

    const P0: PlayerHandle = PlayerHandle::new(0);

    fn enqueue(ledger: &mut BonusLedger, rolls: &[u32]) -> FrameKind {
        ledger
            .classify_and_enqueue(&Frame::from(rolls), 0, P0)
            .unwrap()
    }

    // ==========================================
    // PendingBonus
    // ==========================================

    #[test]
    fn strike_needs_two_more_rolls() {
        let mut bonus = PendingBonus::strike(&Frame::from([10]));
        assert!(!bonus.push(3));
        assert!(bonus.push(4));
        assert_eq!(bonus.value(), 17);
        assert!(bonus.check_invariants().is_ok());
    }

    #[test]
    fn spare_is_seeded_with_ten() {
        let mut bonus = PendingBonus::spare();
        assert_eq!(bonus.accumulated(), &[10]);
        assert!(bonus.push(7));
        assert_eq!(bonus.value(), 17);
    }

    #[test]
    fn complete_bonus_ignores_further_rolls() {
        let mut bonus = PendingBonus::spare();
        assert!(bonus.push(1));
        assert!(!bonus.push(9));
        assert_eq!(bonus.accumulated(), &[10, 1]);
    }

    #[test]
    fn required_lengths() {
        assert_eq!(PendingKind::Strike.required_len(), 3);
        assert_eq!(PendingKind::Spare.required_len(), 2);
    }

    // ==========================================
    // BonusLedger
    // ==========================================

    #[test]
    fn normal_frame_enqueues_nothing() {
        let mut ledger = BonusLedger::new();
        assert_eq!(enqueue(&mut ledger, &[2, 3]), FrameKind::Normal);
        assert!(!ledger.has_pending());
        assert_eq!(ledger.marker(), SpareMarker::Normal);
    }

    #[test]
    fn spare_resolves_on_next_roll() {
        let mut ledger = BonusLedger::new();
        enqueue(&mut ledger, &[4, 6]);
        assert!(ledger.has_pending());
        assert_eq!(ledger.feed(&[3, 2]), 13);
        assert!(!ledger.has_pending());
    }

    #[test]
    fn two_strikes_share_the_roll_stream() {
        let mut ledger = BonusLedger::new();
        enqueue(&mut ledger, &[10]);
        assert_eq!(ledger.feed(&[10]), 0);
        enqueue(&mut ledger, &[10]);
        assert_eq!(ledger.pending_len(), 2);

        // 1 completes the first strike (10+10+1) and extends the second.
        assert_eq!(ledger.feed(&[1]), 21);
        assert_eq!(ledger.pending_len(), 1);
        assert_eq!(ledger.feed(&[2]), 13);
        assert!(!ledger.has_pending());
        assert!(ledger.check_invariants().is_ok());
    }

    #[test]
    fn strike_and_spare_resolve_independently() {
        let mut ledger = BonusLedger::new();
        enqueue(&mut ledger, &[10]);
        // The spare's own rolls complete the strike before the spare is classified.
        assert_eq!(ledger.feed(&[4, 6]), 20);
        enqueue(&mut ledger, &[4, 6]);
        assert_eq!(ledger.feed(&[1]), 11);
        assert!(!ledger.has_pending());
    }

    #[test]
    fn back_to_back_spares_are_rejected() {
        let mut ledger = BonusLedger::new();
        enqueue(&mut ledger, &[5, 5]);
        ledger.feed(&[5, 5]);
        let err = ledger
            .classify_and_enqueue(&Frame::from([5, 5]), 1, P0)
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::DataIntegrity {
                frame: Frame::from([5, 5]),
                position: 1,
                player: P0,
            }
        );
        assert!(!ledger.has_pending());
    }

    #[test]
    fn spare_marker_is_cleared_by_normal_frame_and_new_turn() {
        let mut ledger = BonusLedger::new();
        enqueue(&mut ledger, &[5, 5]);
        enqueue(&mut ledger, &[]);
        assert_eq!(ledger.marker(), SpareMarker::Normal);
        assert_eq!(enqueue(&mut ledger, &[5, 5]), FrameKind::Spare);

        ledger.start_turn();
        assert_eq!(ledger.marker(), SpareMarker::None);
        assert_eq!(enqueue(&mut ledger, &[3, 7]), FrameKind::Spare);
    }

    #[test]
    fn spare_marker_is_cleared_by_strike() {
        let mut ledger = BonusLedger::new();
        enqueue(&mut ledger, &[5, 5]);
        ledger.feed(&[10]);
        assert_eq!(enqueue(&mut ledger, &[10]), FrameKind::Strike);
        assert_eq!(ledger.marker(), SpareMarker::Strike);
        ledger.feed(&[5, 5]);
        assert_eq!(enqueue(&mut ledger, &[5, 5]), FrameKind::Spare);
        assert_eq!(ledger.marker(), SpareMarker::Spare);
    }

    #[test]
    fn drain_partial_keeps_entries() {
        let mut ledger = BonusLedger::new();
        enqueue(&mut ledger, &[10]);
        ledger.feed(&[3]);
        assert_eq!(ledger.drain_partial(), 13);
        assert_eq!(ledger.pending_len(), 1);
        assert_eq!(ledger.drain_partial(), 13);
    }
}
