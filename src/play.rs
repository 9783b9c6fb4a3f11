//! Play-phase (pegging) sequence and scoring.

use core::fmt;

use alloc::vec::Vec;
use tracing::{debug, instrument};

use crate::card::{Card, Rank};
use crate::error::PlayError;
use crate::hand::Seat;

/// The running total may never exceed this.
pub const MAX_COUNT: u8 = 31;

/// Longest run that can be formed in one count.
const MAX_RUN: usize = 7;

/// Why points were pegged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayReason {
    /// The running total reached 15.
    Fifteen,
    /// The running total reached 31.
    ThirtyOne,
    /// The last two cards share a rank.
    Pair,
    /// The last three cards share a rank.
    PairRoyal,
    /// The last four cards share a rank.
    DoublePairRoyal,
    /// The trailing cards form a run of the given length.
    Run(u8),
    /// Neither player could play; the last player pegs one.
    Go,
    /// The final card of the play phase.
    LastCard,
}

impl PlayReason {
    /// Points awarded for this reason.
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::Fifteen | Self::ThirtyOne | Self::Pair => 2,
            Self::PairRoyal => 6,
            Self::DoublePairRoyal => 12,
            Self::Run(len) => len,
            Self::Go | Self::LastCard => 1,
        }
    }
}

impl fmt::Display for PlayReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifteen => write!(f, "fifteen for 2"),
            Self::ThirtyOne => write!(f, "thirty-one for 2"),
            Self::Pair => write!(f, "pair for 2"),
            Self::PairRoyal => write!(f, "pair royal for 6"),
            Self::DoublePairRoyal => write!(f, "double pair royal for 12"),
            Self::Run(len) => write!(f, "run of {len} for {len}"),
            Self::Go => write!(f, "go for 1"),
            Self::LastCard => write!(f, "last card for 1"),
        }
    }
}

/// Points pegged by a single play or go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayScore {
    /// Total points.
    pub points: u8,
    /// Every reason that contributed, in scoring order.
    pub reasons: Vec<PlayReason>,
}

impl PlayScore {
    fn add(&mut self, reason: PlayReason) {
        self.points += reason.points();
        self.reasons.push(reason);
    }
}

/// A card laid down during the play phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Play {
    /// Who played it.
    pub seat: Seat,
    /// The card played.
    pub card: Card,
}

/// All cards played this hand, with the running total of the current count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "StoredSequence", into = "StoredSequence")
)]
pub struct PlaySequence {
    plays: Vec<Play>,
    /// Index into `plays` where the current count began.
    count_start: usize,
    total: u8,
}

impl PlaySequence {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            plays: Vec::new(),
            count_start: 0,
            total: 0,
        }
    }

    /// Returns the running total of the current count.
    #[must_use]
    pub const fn total(&self) -> u8 {
        self.total
    }

    /// Returns every card played this hand, in order.
    #[must_use]
    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    /// Returns the cards played since the count last reset.
    #[must_use]
    pub fn current_count(&self) -> &[Play] {
        &self.plays[self.count_start..]
    }

    /// Returns who played the most recent card of the current count.
    #[must_use]
    pub fn last_player(&self) -> Option<Seat> {
        self.current_count().last().map(|play| play.seat)
    }

    /// Returns whether `card` fits under 31 on the current total.
    #[must_use]
    pub const fn can_play(&self, card: Card) -> bool {
        matches!(self.total.checked_add(card.point_value()), Some(next) if next <= MAX_COUNT)
    }

    /// Plays `card` for `seat` and returns the points pegged.
    ///
    /// Reaching 31 scores and then starts a new count.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::ExceedsThirtyOne`] if the card does not fit, or
    /// [`PlayError::AlreadyPlayed`] if it is already in the sequence. The
    /// sequence is unchanged on error.
    #[instrument(level = "debug", skip(self), fields(total = self.total))]
    pub fn play(&mut self, seat: Seat, card: Card) -> Result<PlayScore, PlayError> {
        if self.plays.iter().any(|play| play.card == card) {
            return Err(PlayError::AlreadyPlayed(card));
        }
        if !self.can_play(card) {
            return Err(PlayError::ExceedsThirtyOne {
                total: self.total,
                card,
            });
        }

        self.plays.push(Play { seat, card });
        self.total += card.point_value();

        let mut score = PlayScore::default();
        if self.total == 15 {
            score.add(PlayReason::Fifteen);
        }
        if self.total == MAX_COUNT {
            score.add(PlayReason::ThirtyOne);
        }
        if let Some(reason) = self.trailing_kind() {
            score.add(reason);
        }
        if let Some(len) = self.trailing_run() {
            score.add(PlayReason::Run(len));
        }

        debug!(total = self.total, points = score.points, "card played");
        if self.total == MAX_COUNT {
            self.reset_count();
        }
        Ok(score)
    }

    /// Ends the current count because neither player can play.
    ///
    /// The last player of the count pegs one for the go. Returns `None` when
    /// the count is empty (for example right after 31).
    pub fn go(&mut self) -> Option<(Seat, PlayScore)> {
        self.close_count(PlayReason::Go)
    }

    /// Ends the play phase, pegging one for the last card unless the count
    /// already closed on 31.
    pub fn last_card(&mut self) -> Option<(Seat, PlayScore)> {
        self.close_count(PlayReason::LastCard)
    }

    fn close_count(&mut self, reason: PlayReason) -> Option<(Seat, PlayScore)> {
        let seat = self.last_player()?;
        let mut score = PlayScore::default();
        if self.total < MAX_COUNT {
            score.add(reason);
        }
        debug!(?seat, ?reason, total = self.total, "count closed");
        self.reset_count();
        Some((seat, score))
    }

    fn reset_count(&mut self) {
        self.count_start = self.plays.len();
        self.total = 0;
    }

    /// Pair, pair royal, or double pair royal at the end of the count.
    fn trailing_kind(&self) -> Option<PlayReason> {
        let count = self.current_count();
        let rank = count.last()?.card.rank;
        let same = count
            .iter()
            .rev()
            .take_while(|play| play.card.rank == rank)
            .count();
        match same {
            0 | 1 => None,
            2 => Some(PlayReason::Pair),
            3 => Some(PlayReason::PairRoyal),
            _ => Some(PlayReason::DoublePairRoyal),
        }
    }

    /// Longest trailing window, bounded by the current count, that sorts into a run.
    fn trailing_run(&self) -> Option<u8> {
        let count = self.current_count();
        let longest = count.len().min(MAX_RUN);
        (3..=longest).rev().find_map(|len| {
            let mut ranks: Vec<Rank> = count[count.len() - len..]
                .iter()
                .map(|play| play.card.rank)
                .collect();
            ranks.sort_unstable();
            ranks
                .windows(2)
                .all(|pair| pair[1].number() == pair[0].number() + 1)
                .then_some(len as u8)
        })
    }
}

/// Stored form of a [`PlaySequence`], checked when loaded.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct StoredSequence {
    plays: Vec<Play>,
    count_start: usize,
    total: u8,
}

#[cfg(feature = "serde")]
impl From<PlaySequence> for StoredSequence {
    fn from(sequence: PlaySequence) -> Self {
        Self {
            plays: sequence.plays,
            count_start: sequence.count_start,
            total: sequence.total,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<StoredSequence> for PlaySequence {
    type Error = PlayError;

    fn try_from(stored: StoredSequence) -> Result<Self, Self::Error> {
        let Some(count) = stored.plays.get(stored.count_start..) else {
            return Err(PlayError::CorruptSequence);
        };
        let sum: u32 = count
            .iter()
            .map(|play| u32::from(play.card.point_value()))
            .sum();
        if stored.total > MAX_COUNT || sum != u32::from(stored.total) {
            return Err(PlayError::CorruptSequence);
        }
        for (i, play) in stored.plays.iter().enumerate() {
            if let Some(again) = stored.plays[i + 1..].iter().find(|p| p.card == play.card) {
                return Err(PlayError::AlreadyPlayed(again.card));
            }
        }
        Ok(Self {
            plays: stored.plays,
            count_start: stored.count_start,
            total: stored.total,
        })
    }
}

/// Adds `card` to `sequence` for `seat` and returns the points pegged.
///
/// # Errors
///
/// See [`PlaySequence::play`].
pub fn score_play(
    sequence: &mut PlaySequence,
    seat: Seat,
    card: Card,
) -> Result<PlayScore, PlayError> {
    sequence.play(seat, card)
}
