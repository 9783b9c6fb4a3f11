//! Client moves and their validation.
//!
//! A [`Move`] mirrors the JSON body clients already send:
//!
//! ```json
//! { "gameId": "g1", "playerEmail": "a@example.com", "action": "play-card", "cardId": "5H" }
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use tracing::instrument;

use crate::card::Card;
use crate::error::ValidationError;
use crate::game::{GameState, Phase};

/// The action a move performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Action {
    /// Lay a card during the play.
    #[cfg_attr(feature = "serde", serde(alias = "play"))]
    PlayCard,
    /// Put two cards in the crib.
    Discard,
    /// Count a hand (and the crib, for the dealer).
    Count,
    /// Declare that no card can be played.
    Go,
}

/// A request from a player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Move {
    /// The game this move is for.
    pub game_id: String,
    /// The player making the move.
    pub player_email: String,
    /// What to do.
    pub action: Action,
    /// Card to play, for [`Action::PlayCard`].
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub card_id: Option<String>,
    /// Cards to discard, for [`Action::Discard`].
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub card_ids: Option<Vec<String>>,
}

impl Move {
    fn new(game_id: impl Into<String>, player_email: impl Into<String>, action: Action) -> Self {
        Self {
            game_id: game_id.into(),
            player_email: player_email.into(),
            action,
            card_id: None,
            card_ids: None,
        }
    }

    /// Builds a `play-card` move.
    #[must_use]
    pub fn play_card(
        game_id: impl Into<String>,
        player_email: impl Into<String>,
        card: Card,
    ) -> Self {
        Self {
            card_id: Some(alloc::format!("{card}")),
            ..Self::new(game_id, player_email, Action::PlayCard)
        }
    }

    /// Builds a `discard` move.
    #[must_use]
    pub fn discard(
        game_id: impl Into<String>,
        player_email: impl Into<String>,
        cards: [Card; 2],
    ) -> Self {
        Self {
            card_ids: Some(cards.iter().map(|card| alloc::format!("{card}")).collect()),
            ..Self::new(game_id, player_email, Action::Discard)
        }
    }

    /// Builds a `count` move.
    #[must_use]
    pub fn count(game_id: impl Into<String>, player_email: impl Into<String>) -> Self {
        Self::new(game_id, player_email, Action::Count)
    }

    /// Builds a `go` move.
    #[must_use]
    pub fn go(game_id: impl Into<String>, player_email: impl Into<String>) -> Self {
        Self::new(game_id, player_email, Action::Go)
    }

    /// Parses the card ids the action uses: `cardId` for `play-card`,
    /// `cardIds` for `discard`, none otherwise.
    ///
    /// # Errors
    ///
    /// Returns one [`ValidationError::UnknownCard`] per id that does not parse.
    pub fn cards(&self) -> Result<Vec<Card>, Vec<ValidationError>> {
        let ids: &[String] = match self.action {
            Action::PlayCard => self.card_id.as_slice(),
            Action::Discard => self.card_ids.as_deref().unwrap_or_default(),
            Action::Count | Action::Go => &[],
        };
        let mut cards = Vec::new();
        let mut errors = Vec::new();
        for id in ids {
            match id.parse() {
                Ok(card) => cards.push(card),
                Err(_) => errors.push(ValidationError::UnknownCard(id.clone())),
            }
        }
        if errors.is_empty() {
            Ok(cards)
        } else {
            Err(errors)
        }
    }
}

/// Checks `mv` against `state` and returns every problem found.
///
/// An empty list means the move can be applied. This never fails; callers
/// inspect the list.
#[must_use]
#[instrument(level = "debug", skip(state), fields(phase = state.phase.name()))]
pub fn validate_move(mv: &Move, state: &GameState) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if mv.game_id != state.game_id {
        errors.push(ValidationError::WrongGame);
    }
    let seat = state.seat_of(&mv.player_email);
    if seat.is_none() {
        errors.push(ValidationError::UnknownPlayer);
    }

    match mv.action {
        Action::PlayCard => {
            if mv.card_id.is_none() {
                errors.push(ValidationError::MissingCardId);
            }
            if mv.card_ids.is_some() {
                errors.push(ValidationError::UnexpectedCardIds);
            }
        }
        Action::Discard => {
            if mv.card_id.is_some() {
                errors.push(ValidationError::UnexpectedCardId);
            }
            let count = mv.card_ids.as_ref().map_or(0, Vec::len);
            if count != 2 {
                errors.push(ValidationError::WrongDiscardCount(count));
            }
        }
        Action::Count | Action::Go => {
            if mv.card_id.is_some() {
                errors.push(ValidationError::UnexpectedCardId);
            }
            if mv.card_ids.is_some() {
                errors.push(ValidationError::UnexpectedCardIds);
            }
        }
    }

    let cards = mv.cards().unwrap_or_else(|bad| {
        errors.extend(bad);
        Vec::new()
    });
    // Aliases such as `TH` and `10H` name the same card.
    if mv.action == Action::Discard && matches!(cards[..], [first, second] if first == second) {
        errors.push(ValidationError::DuplicateDiscard);
    }

    let Some(seat) = seat else {
        return errors;
    };
    let i = seat.index();

    match (&state.phase, mv.action) {
        (Phase::Finished { .. }, _) => errors.push(ValidationError::GameOver),
        (Phase::Discard(discard), Action::Discard) => {
            if discard.discarded[i] {
                errors.push(ValidationError::AlreadyDiscarded);
            }
            for card in cards {
                if !discard.hands[i].contains(&card) {
                    errors.push(ValidationError::CardNotInHand(card));
                }
            }
        }
        (Phase::Play(play), Action::PlayCard) => {
            if play.turn != seat {
                errors.push(ValidationError::NotYourTurn);
            }
            if let Some(&card) = cards.first() {
                if !play.remaining[i].contains(&card) {
                    errors.push(ValidationError::CardNotInHand(card));
                } else if !play.sequence.can_play(card) {
                    errors.push(ValidationError::CardNotPlayable {
                        card,
                        total: play.sequence.total(),
                    });
                }
            }
        }
        (Phase::Play(play), Action::Go) => {
            if play.turn != seat {
                errors.push(ValidationError::NotYourTurn);
            }
            if play.can_play(seat) {
                errors.push(ValidationError::MustPlay);
            }
        }
        (Phase::Count(count), Action::Count) => {
            if count.next != seat {
                errors.push(ValidationError::NotYourTurn);
            }
        }
        _ => errors.push(ValidationError::WrongPhase),
    }

    errors
}
