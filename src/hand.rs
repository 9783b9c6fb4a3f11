//! Player seats and four-card hands.

use crate::card::Card;
use crate::error::HandError;

/// Cards kept in a hand after discarding, and the size of the crib.
pub const HAND_SIZE: usize = 4;

/// One of the two players at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Seat {
    /// The first player.
    Player1,
    /// The second player.
    Player2,
}

impl Seat {
    /// Returns the opponent's seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }

    /// Index into per-seat arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Player1 => 0,
            Self::Player2 => 1,
        }
    }
}

/// Four distinct cards counted together with the cut: a player's hand or the crib.
///
/// With the `serde` feature a hand is stored as its array of cards and
/// checked again when loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "[Card; HAND_SIZE]", into = "[Card; HAND_SIZE]")
)]
pub struct Hand {
    cards: [Card; HAND_SIZE],
}

impl Hand {
    /// Creates a hand, rejecting duplicate cards.
    ///
    /// # Errors
    ///
    /// Returns [`HandError::DuplicateCard`] if a card appears twice.
    pub fn new(cards: [Card; HAND_SIZE]) -> Result<Self, HandError> {
        for (i, card) in cards.iter().enumerate() {
            if cards[i + 1..].contains(card) {
                return Err(HandError::DuplicateCard(*card));
            }
        }
        Ok(Self { cards })
    }

    /// Creates a hand from a slice, which must hold exactly four distinct cards.
    ///
    /// # Errors
    ///
    /// Returns [`HandError::WrongCardCount`] or [`HandError::DuplicateCard`].
    pub fn from_slice(cards: &[Card]) -> Result<Self, HandError> {
        let cards: [Card; HAND_SIZE] = cards
            .try_into()
            .map_err(|_| HandError::WrongCardCount(cards.len()))?;
        Self::new(cards)
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub const fn cards(&self) -> &[Card; HAND_SIZE] {
        &self.cards
    }

    /// Returns whether the hand holds `card`.
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}

impl TryFrom<&[Card]> for Hand {
    type Error = HandError;

    fn try_from(cards: &[Card]) -> Result<Self, Self::Error> {
        Self::from_slice(cards)
    }
}

impl TryFrom<[Card; HAND_SIZE]> for Hand {
    type Error = HandError;

    fn try_from(cards: [Card; HAND_SIZE]) -> Result<Self, Self::Error> {
        Self::new(cards)
    }
}

impl From<Hand> for [Card; HAND_SIZE] {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}
