//! Frames and their classification.

use smallvec::SmallVec;

use crate::ALL_PINS;

/// Rolls of one frame. Frames hold 1-3 rolls in practice, so they stay inline.
pub type RollVec = SmallVec<[u32; 3]>;

/// One turn-segment of the frame sequence: the pin counts knocked down by each roll.
///
/// Frames are read-only input to the scorer. No bowling legality is checked here;
/// any list of non-negative pin counts is a frame.
///
/// # Examples
///
/// ```
/// use pinfall::{Frame, FrameKind};
///
/// let strike = Frame::from([10]);
/// let spare = Frame::from([4, 6]);
/// let open = Frame::from([2, 3]);
///
/// assert_eq!(strike.kind(), FrameKind::Strike);
/// assert_eq!(spare.kind(), FrameKind::Spare);
/// assert_eq!(open.kind(), FrameKind::Normal);
/// assert_eq!(open.pin_sum(), 5);
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct Frame(RollVec);

impl Frame {
    /// Creates a new `Frame` from its rolls.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Frame(rolls.into_iter().collect())
    }

    /// Returns the rolls of this frame in order.
    #[inline]
    #[must_use]
    pub fn rolls(&self) -> &[u32] {
        &self.0
    }

    /// Returns the number of rolls in this frame.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the frame has no rolls.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total pins knocked down in this frame.
    #[must_use]
    pub fn pin_sum(&self) -> u32 {
        self.0.iter().fold(0, |acc, &pins| acc.saturating_add(pins))
    }

    /// Classifies the frame by its roll count and pin sum.
    ///
    /// A single roll of all pins is a strike, two rolls summing to all pins a spare.
    /// Everything else is normal, including a three-roll frame summing to 10.
    #[must_use]
    pub fn kind(&self) -> FrameKind {
        match (self.len(), self.pin_sum()) {
            (1, ALL_PINS) => FrameKind::Strike,
            (2, ALL_PINS) => FrameKind::Spare,
            _ => FrameKind::Normal,
        }
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.rolls())
    }
}

impl<const N: usize> From<[u32; N]> for Frame {
    #[inline]
    fn from(rolls: [u32; N]) -> Self {
        Frame::new(rolls)
    }
}

impl From<Vec<u32>> for Frame {
    #[inline]
    fn from(rolls: Vec<u32>) -> Self {
        Frame(RollVec::from_vec(rolls))
    }
}

impl From<&[u32]> for Frame {
    #[inline]
    fn from(rolls: &[u32]) -> Self {
        Frame(RollVec::from_slice(rolls))
    }
}

/// How a frame was classified when it was played.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameKind {
    /// A single roll knocking down all pins.
    Strike,
    /// Two rolls together knocking down all pins.
    Spare,
    /// Any other frame. Its pin sum is credited only when the frame closes
    /// the turn, i.e. leaves no bonus pending.
    Normal,
}

impl FrameKind {
    /// Returns a string representation suitable for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strike => "strike",
            Self::Spare => "spare",
            Self::Normal => "normal",
        }
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
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

    #[test]
    fn single_ten_is_strike() {
        assert_eq!(Frame::from([10]).kind(), FrameKind::Strike);
    }

    #[test]
    fn two_rolls_to_ten_is_spare_regardless_of_split() {
        assert_eq!(Frame::from([4, 6]).kind(), FrameKind::Spare);
        assert_eq!(Frame::from([0, 10]).kind(), FrameKind::Spare);
        assert_eq!(Frame::from([9, 1]).kind(), FrameKind::Spare);
    }

    #[test]
    fn three_rolls_to_ten_is_normal() {
        assert_eq!(Frame::from([3, 3, 4]).kind(), FrameKind::Normal);
    }

    #[test]
    fn short_and_empty_frames_are_normal() {
        assert_eq!(Frame::from([1]).kind(), FrameKind::Normal);
        assert_eq!(Frame::default().kind(), FrameKind::Normal);
        assert_eq!(Frame::default().pin_sum(), 0);
        assert!(Frame::default().is_empty());
    }

    #[test]
    fn conversions_keep_roll_order() {
        let from_vec = Frame::from(vec![2, 3]);
        let from_slice = Frame::from(&[2, 3][..]);
        assert_eq!(from_vec, from_slice);
        assert_eq!(from_vec.rolls(), &[2, 3]);
        assert_eq!(from_vec.len(), 2);
    }

    #[test]
    fn display_lists_rolls() {
        assert_eq!(Frame::from([5, 5]).to_string(), "[5, 5]");
    }

    #[test]
    fn frame_serializes_as_plain_list() {
        let json = serde_json::to_string(&Frame::from([4, 6])).unwrap();
        assert_eq!(json, "[4,6]");
        let back: Frame = serde_json::from_str("[10]").unwrap();
        assert_eq!(back, Frame::from([10]));
    }
}
