//! Error types for engine operations.

use alloc::vec::Vec;

use thiserror::Error;

use crate::card::Card;

/// Errors that can occur when parsing a card id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardParseError {
    /// The trailing suit letter is missing or unknown.
    #[error("card id has no valid suit letter")]
    InvalidSuit,
    /// The rank part is not one of A, 2-10, J, Q, K.
    #[error("card id has no valid rank")]
    InvalidRank,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// Not enough cards in the deck to fill both hands and the cut.
    #[error("not enough cards in the deck: needed {needed}, found {available}")]
    InsufficientCards {
        /// Cards required for a deal.
        needed: usize,
        /// Cards actually present.
        available: usize,
    },
}

/// Errors raised for malformed hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandError {
    /// A hand must hold exactly four cards.
    #[error("a hand holds 4 cards, got {0}")]
    WrongCardCount(usize),
    /// The same card appears twice.
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    /// The cut card is also in the hand.
    #[error("cut card {0} is already in the hand")]
    CutInHand(Card),
}

/// Errors that can occur when adding a card to the play sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayError {
    /// The card would push the running total past 31.
    #[error("playing {card} on {total} would exceed 31")]
    ExceedsThirtyOne {
        /// Running total before the play.
        total: u8,
        /// The rejected card.
        card: Card,
    },
    /// The card was already played this hand.
    #[error("card {0} has already been played")]
    AlreadyPlayed(Card),
    /// A stored sequence does not add up.
    #[error("stored play sequence is inconsistent")]
    CorruptSequence,
}

/// A single reason a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    /// The move names a different game.
    #[error("move is for another game")]
    WrongGame,
    /// The player email is not seated at this game.
    #[error("player is not part of this game")]
    UnknownPlayer,
    /// The game is over.
    #[error("game is already finished")]
    GameOver,
    /// The action is not accepted in the current phase.
    #[error("action is not allowed in the current phase")]
    WrongPhase,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// The player has already discarded to the crib.
    #[error("player has already discarded")]
    AlreadyDiscarded,
    /// `play-card` needs a card id.
    #[error("play-card requires a cardId")]
    MissingCardId,
    /// `discard` needs exactly two card ids.
    #[error("discard requires exactly 2 cardIds, got {0}")]
    WrongDiscardCount(usize),
    /// `cardId` was sent with an action that does not take a single card.
    #[error("cardId is only accepted with play-card")]
    UnexpectedCardId,
    /// `cardIds` was sent with an action other than `discard`.
    #[error("cardIds is only accepted with discard")]
    UnexpectedCardIds,
    /// The same card was named twice in a discard.
    #[error("discard names the same card twice")]
    DuplicateDiscard,
    /// A card id could not be parsed.
    #[error("unknown card id {0:?}")]
    UnknownCard(alloc::string::String),
    /// The player does not hold the card.
    #[error("card {0} is not in the player's hand")]
    CardNotInHand(Card),
    /// Playing the card would exceed 31.
    #[error("card {card} cannot be played on {total}")]
    CardNotPlayable {
        /// The card named by the move.
        card: Card,
        /// Current running total.
        total: u8,
    },
    /// `go` was declared while a legal play exists.
    #[error("player holds a playable card and cannot go")]
    MustPlay,
}

/// Errors that can occur when applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The move failed validation; the state was not changed.
    #[error("invalid move: {0:?}")]
    Invalid(Vec<ValidationError>),
    /// Dealing the next hand failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// The play sequence rejected the card.
    #[error(transparent)]
    Play(#[from] PlayError),
    /// A kept hand or the crib was malformed.
    #[error(transparent)]
    Hand(#[from] HandError),
}
