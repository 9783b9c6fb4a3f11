//! Deck construction, shuffling, and dealing.

use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::DealError;

/// Cards dealt to each player before discarding.
pub const DEAL_SIZE: usize = 6;

/// Cards consumed by a deal: two hands plus the cut.
pub const CARDS_PER_DEAL: usize = DEAL_SIZE * 2 + 1;

/// An ordered deck of cards. Index 0 is the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates an unshuffled 52-card deck in suit then rank order.
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(suit, rank));
            }
        }
        Self { cards }
    }

    /// Creates a fresh deck shuffled with `rng`.
    ///
    /// The shuffle is Fisher–Yates, so every permutation is equally likely
    /// given a uniform source.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.cards.shuffle(rng);
        deck
    }

    /// Creates a shuffled deck from a seed. Equal seeds give equal decks.
    #[must_use]
    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    /// Wraps an arbitrary card order, e.g. a stacked deck for a replay.
    #[must_use]
    pub const fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Returns the cards from top to bottom.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// The result of splitting a deck for one hand of play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// Six cards for player 1.
    pub hand1: Vec<Card>,
    /// Six cards for player 2.
    pub hand2: Vec<Card>,
    /// The starter, revealed after both players discard.
    pub cut: Card,
    /// Everything left over.
    pub stock: Vec<Card>,
}

/// Splits `deck` into two six-card hands, the cut card, and the stock.
///
/// # Errors
///
/// Returns [`DealError::InsufficientCards`] if the deck holds fewer than
/// [`CARDS_PER_DEAL`] cards.
#[instrument(skip(deck), fields(cards = deck.len()))]
pub fn deal(deck: Deck) -> Result<Deal, DealError> {
    if deck.len() < CARDS_PER_DEAL {
        return Err(DealError::InsufficientCards {
            needed: CARDS_PER_DEAL,
            available: deck.len(),
        });
    }

    let mut cards = deck.cards;
    let stock = cards.split_off(CARDS_PER_DEAL);
    let cut = cards[DEAL_SIZE * 2];
    let hand2 = cards[DEAL_SIZE..DEAL_SIZE * 2].to_vec();
    cards.truncate(DEAL_SIZE);

    debug!(%cut, stock = stock.len(), "dealt hands");
    Ok(Deal {
        hand1: cards,
        hand2,
        cut,
        stock,
    })
}
