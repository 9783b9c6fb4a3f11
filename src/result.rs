//! Scoring events reported back from moves.

use alloc::vec::Vec;

use crate::hand::Seat;
use crate::play::PlayScore;
use crate::score::HandScore;

/// Where a batch of points came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreSource {
    /// The cut card was a Jack (two for his heels, to the dealer).
    Heels,
    /// Points pegged during the play.
    Pegging(PlayScore),
    /// A player's hand count.
    Hand(HandScore),
    /// The dealer's crib count.
    Crib(HandScore),
}

/// Points awarded to one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreEvent {
    /// Who scored.
    pub seat: Seat,
    /// How many points.
    pub points: u8,
    /// Why.
    pub source: ScoreSource,
}

/// Result of applying a single move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    /// Scoring events in the order they were applied.
    pub events: Vec<ScoreEvent>,
    /// Set when one of the events won the game.
    pub winner: Option<Seat>,
}

impl MoveOutcome {
    /// Total points awarded to `seat` by this move.
    #[must_use]
    pub fn points_for(&self, seat: Seat) -> u16 {
        self.events
            .iter()
            .filter(|event| event.seat == seat)
            .map(|event| u16::from(event.points))
            .sum()
    }
}
