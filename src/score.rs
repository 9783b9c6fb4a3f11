//! Hand and crib counting.
//!
//! A hand is always counted together with the cut card. The five categories
//! are scored independently and summed:
//!
//! | Category | Points |
//! |----------|--------|
//! | Fifteens | 2 for every combination of two or more cards totalling 15 |
//! | Pairs    | 2 for every pair of same-rank cards |
//! | Runs     | length of the longest run, times the multiplicity of its ranks |
//! | Flush    | 4 for a four-card hand flush, 5 if the cut matches; crib needs all 5 |
//! | Nobs     | 1 for the Jack of the cut card's suit |

use core::fmt;

use alloc::vec::Vec;
use tracing::{debug, instrument};

use crate::card::{Card, Rank};
use crate::error::HandError;
use crate::hand::{HAND_SIZE, Hand};

const SCORING_SET: usize = HAND_SIZE + 1;

/// A hand-count scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreCategory {
    /// Combinations totalling 15.
    Fifteens,
    /// Pairs, pair royals, and double pair royals.
    Pairs,
    /// Runs of three or more.
    Runs,
    /// Four or five cards of one suit.
    Flush,
    /// Jack matching the cut card's suit.
    Nobs,
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fifteens => "fifteens",
            Self::Pairs => "pairs",
            Self::Runs => "runs",
            Self::Flush => "flush",
            Self::Nobs => "nobs",
        })
    }
}

/// The count of a hand or crib.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandScore {
    /// Total points.
    pub points: u8,
    /// Points per category, in category order. Zero categories are omitted.
    pub breakdown: Vec<(ScoreCategory, u8)>,
}

impl HandScore {
    /// Returns the points scored for `category`.
    #[must_use]
    pub fn category(&self, category: ScoreCategory) -> u8 {
        self.breakdown
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, points)| *points)
    }

    fn push(&mut self, category: ScoreCategory, points: u8) {
        if points > 0 {
            self.points += points;
            self.breakdown.push((category, points));
        }
    }
}

/// Counts a hand (or, with `is_crib`, the crib) against the cut card.
///
/// # Errors
///
/// Returns [`HandError::CutInHand`] if the cut card is one of the hand's cards.
///
/// # Example
///
/// ```
/// use cribrs::{Card, Hand, Rank, Suit, score_hand};
///
/// let hand = Hand::new([
///     Card::new(Suit::Spades, Rank::Five),
///     Card::new(Suit::Clubs, Rank::Five),
///     Card::new(Suit::Diamonds, Rank::Five),
///     Card::new(Suit::Hearts, Rank::Jack),
/// ])
/// .unwrap();
/// let score = score_hand(&hand, Card::new(Suit::Hearts, Rank::Five), false).unwrap();
/// assert_eq!(score.points, 29);
/// ```
#[instrument(level = "debug", skip(hand), fields(hand = ?hand.cards()))]
pub fn score_hand(hand: &Hand, cut: Card, is_crib: bool) -> Result<HandScore, HandError> {
    if hand.contains(&cut) {
        return Err(HandError::CutInHand(cut));
    }

    let held = hand.cards();
    let mut all = [cut; SCORING_SET];
    all[..HAND_SIZE].copy_from_slice(held);

    let mut score = HandScore::default();
    score.push(ScoreCategory::Fifteens, fifteens(&all));
    score.push(ScoreCategory::Pairs, pairs(&all));
    score.push(ScoreCategory::Runs, runs(&all));
    score.push(ScoreCategory::Flush, flush(held, cut, is_crib));
    score.push(ScoreCategory::Nobs, nobs(held, cut));

    debug!(points = score.points, "counted hand");
    Ok(score)
}

/// 2 points per subset of two or more cards summing to 15.
fn fifteens(cards: &[Card; SCORING_SET]) -> u8 {
    let mut points = 0;
    for mask in 1u32..(1 << SCORING_SET) {
        if mask.count_ones() < 2 {
            continue;
        }
        let sum: u8 = cards
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, card)| card.point_value())
            .sum();
        if sum == 15 {
            points += 2;
        }
    }
    points
}

/// 2 points per unordered pair of same-rank cards.
fn pairs(cards: &[Card]) -> u8 {
    let mut points = 0;
    for (i, a) in cards.iter().enumerate() {
        for b in &cards[i + 1..] {
            if a.rank == b.rank {
                points += 2;
            }
        }
    }
    points
}

/// Longest run of three or more, multiplied by duplicate ranks inside it.
fn runs(cards: &[Card]) -> u8 {
    let mut counts = [0u8; Rank::King as usize + 2];
    for card in cards {
        counts[card.rank.number() as usize] += 1;
    }

    let mut best_len = 0;
    let mut best_points = 0;
    let mut len = 0;
    let mut ways = 1;
    // counts[0] and counts[14] are always zero and terminate stretches.
    for &count in &counts[1..] {
        if count == 0 {
            if len >= 3 && len > best_len {
                best_len = len;
                best_points = len * ways;
            }
            len = 0;
            ways = 1;
        } else {
            len += 1;
            ways *= count;
        }
    }
    best_points
}

fn flush(held: &[Card; HAND_SIZE], cut: Card, is_crib: bool) -> u8 {
    let suit = held[0].suit;
    if held.iter().any(|card| card.suit != suit) {
        return 0;
    }
    if cut.suit == suit {
        5
    } else if is_crib {
        0
    } else {
        4
    }
}

fn nobs(held: &[Card; HAND_SIZE], cut: Card) -> u8 {
    u8::from(
        held.iter()
            .any(|card| card.rank == Rank::Jack && card.suit == cut.suit),
    )
}
