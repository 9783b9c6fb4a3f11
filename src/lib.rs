//! A two-player cribbage engine with optional `no_std` support.
//!
//! The scoring functions are pure: [`score_hand`] counts a hand or crib
//! against the cut card, [`PlaySequence::play`] pegs cards during the play,
//! and [`check_win`] reports a winner. [`GameState`] strings them together
//! into a deal / discard / play / count state machine driven by [`Move`]s,
//! and [`Game`] wraps one state behind a lock with its own shuffling RNG.
//!
//! # Example
//!
//! ```
//! use cribrs::{Card, Hand, Rank, Suit, score_hand};
//!
//! let hand = Hand::new([
//!     Card::new(Suit::Hearts, Rank::Four),
//!     Card::new(Suit::Clubs, Rank::Five),
//!     Card::new(Suit::Spades, Rank::Six),
//!     Card::new(Suit::Hearts, Rank::King),
//! ])
//! .unwrap();
//! let score = score_hand(&hand, Card::new(Suit::Diamonds, Rank::Two), false).unwrap();
//! // 4-5-6 run for 3, 4+5+6 and 5+K for fifteen-4.
//! assert_eq!(score.points, 7);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod board;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod moves;
pub mod options;
pub mod play;
pub mod result;
pub mod score;
mod sync;

// Re-export main types
pub use board::{GameScore, WINNING_SCORE, check_win};
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use deck::{CARDS_PER_DEAL, DEAL_SIZE, Deal, Deck, deal};
pub use error::{
    CardParseError, DealError, HandError, MoveError, PlayError, ValidationError,
};
pub use game::{CountPhase, DiscardPhase, Game, GameState, Phase, PlayPhase};
pub use hand::{HAND_SIZE, Hand, Seat};
pub use moves::{Action, Move, validate_move};
pub use options::GameOptions;
pub use play::{MAX_COUNT, Play, PlayReason, PlayScore, PlaySequence, score_play};
pub use result::{MoveOutcome, ScoreEvent, ScoreSource};
pub use score::{HandScore, ScoreCategory, score_hand};
