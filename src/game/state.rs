//! Game state types and the move dispatcher.

use alloc::string::String;
use alloc::vec::Vec;

use rand::Rng;
use tracing::{info, instrument, warn};

use crate::board::GameScore;
use crate::card::{Card, Rank};
use crate::deck::{self, Deck};
use crate::error::{DealError, MoveError, ValidationError};
use crate::hand::{Hand, Seat};
use crate::moves::{Action, Move, validate_move};
use crate::options::GameOptions;
use crate::play::PlaySequence;
use crate::result::{MoveOutcome, ScoreEvent, ScoreSource};

/// Both players are discarding into the crib.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscardPhase {
    /// Cards held by each seat (six, then four after discarding).
    pub hands: [Vec<Card>; 2],
    /// Discards collected so far.
    pub crib: Vec<Card>,
    /// The starter; not revealed until both players have discarded.
    pub cut: Card,
    /// Which seats have discarded.
    pub discarded: [bool; 2],
}

/// Cards are being pegged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayPhase {
    /// The four cards each seat kept, for counting later.
    pub hands: [Hand; 2],
    /// Cards each seat has not yet played.
    pub remaining: [Vec<Card>; 2],
    /// The dealer's crib.
    pub crib: Hand,
    /// The starter.
    pub cut: Card,
    /// Cards played so far and the running total.
    pub sequence: PlaySequence,
    /// Seat to act.
    pub turn: Seat,
    /// Seats that have said go in the current count.
    pub passed: [bool; 2],
}

impl PlayPhase {
    /// Returns whether `seat` holds a card that fits under 31.
    #[must_use]
    pub fn can_play(&self, seat: Seat) -> bool {
        self.remaining[seat.index()]
            .iter()
            .any(|&card| self.sequence.can_play(card))
    }

    /// A seat is out of the current count once it has said go or has no cards.
    pub(super) fn is_out(&self, seat: Seat) -> bool {
        self.passed[seat.index()] || self.remaining[seat.index()].is_empty()
    }
}

/// Hands and crib are being counted: pone first, then the dealer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CountPhase {
    /// The four cards each seat kept.
    pub hands: [Hand; 2],
    /// The dealer's crib.
    pub crib: Hand,
    /// The starter.
    pub cut: Card,
    /// Seat whose count is due.
    pub next: Seat,
}

/// Where a game is in the deal / discard / play / count cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for the next deal.
    Waiting,
    /// Players are discarding to the crib.
    Discard(DiscardPhase),
    /// Cards are being pegged.
    Play(PlayPhase),
    /// Hands are being counted.
    Count(CountPhase),
    /// Someone reached the target score.
    Finished {
        /// The winning seat.
        winner: Seat,
    },
}

impl Phase {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Discard(_) => "discard",
            Self::Play(_) => "play",
            Self::Count(_) => "count",
            Self::Finished { .. } => "finished",
        }
    }
}

/// The full state of one game, passed by value between engine calls.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Identifier clients send with each move.
    pub game_id: String,
    /// Player emails, indexed by [`Seat::index`].
    pub players: [String; 2],
    /// Cumulative scores.
    pub scores: GameScore,
    /// Who deals (and owns the crib) this hand.
    pub dealer: Seat,
    /// Rule options.
    pub options: GameOptions,
    /// Current phase.
    pub phase: Phase,
}

impl GameState {
    /// Creates a game waiting for its first deal. Player 1 deals first.
    #[must_use]
    pub fn new(
        game_id: impl Into<String>,
        player1: impl Into<String>,
        player2: impl Into<String>,
        options: GameOptions,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            players: [player1.into(), player2.into()],
            scores: GameScore::new(),
            dealer: Seat::Player1,
            options,
            phase: Phase::Waiting,
        }
    }

    /// Returns the seat for a player email.
    #[must_use]
    pub fn seat_of(&self, email: &str) -> Option<Seat> {
        [Seat::Player1, Seat::Player2]
            .into_iter()
            .find(|seat| self.players[seat.index()] == email)
    }

    /// Returns the non-dealer, who leads the play and counts first.
    #[must_use]
    pub const fn pone(&self) -> Seat {
        self.dealer.other()
    }

    /// Returns the winner once the game is finished.
    #[must_use]
    pub const fn winner(&self) -> Option<Seat> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Returns the cards `seat` currently holds.
    #[must_use]
    pub fn held(&self, seat: Seat) -> &[Card] {
        match &self.phase {
            Phase::Discard(discard) => discard.hands[seat.index()].as_slice(),
            Phase::Play(play) => play.remaining[seat.index()].as_slice(),
            Phase::Count(count) => count.hands[seat.index()].cards().as_slice(),
            Phase::Waiting | Phase::Finished { .. } => &[],
        }
    }

    /// Returns the cut card once it has been revealed.
    #[must_use]
    pub const fn cut(&self) -> Option<Card> {
        match &self.phase {
            Phase::Play(play) => Some(play.cut),
            Phase::Count(count) => Some(count.cut),
            _ => None,
        }
    }

    /// Shuffles a fresh deck with `rng` and deals the next hand.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::InvalidState`] unless the game is waiting for a deal.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DealError> {
        self.deal_from(Deck::shuffled(rng))
    }

    /// Deals the next hand from a caller-supplied deck.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::InvalidState`] unless the game is waiting for a
    /// deal, or [`DealError::InsufficientCards`] if the deck is too small.
    #[instrument(skip(self, deck), fields(game = %self.game_id, dealer = ?self.dealer))]
    pub fn deal_from(&mut self, deck: Deck) -> Result<(), DealError> {
        if self.phase != Phase::Waiting {
            return Err(DealError::InvalidState);
        }

        let dealt = deck::deal(deck)?;
        self.phase = Phase::Discard(DiscardPhase {
            hands: [dealt.hand1, dealt.hand2],
            crib: Vec::new(),
            cut: dealt.cut,
            discarded: [false; 2],
        });
        info!("hand dealt");
        Ok(())
    }

    /// Validates and applies a move.
    ///
    /// The state is only changed when the whole move succeeds. Every scoring
    /// event is checked for a win as it is applied, and the game moves to
    /// [`Phase::Finished`] at once when the target is reached.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Invalid`] with every validation failure if the
    /// move is not legal in the current state.
    #[instrument(skip(self), fields(game = %self.game_id, phase = self.phase.name()))]
    pub fn apply(&mut self, mv: &Move) -> Result<MoveOutcome, MoveError> {
        let errors = validate_move(mv, self);
        if !errors.is_empty() {
            warn!(?errors, "move rejected");
            return Err(MoveError::Invalid(errors));
        }
        let seat = self
            .seat_of(&mv.player_email)
            .ok_or_else(|| MoveError::Invalid(alloc::vec![ValidationError::UnknownPlayer]))?;
        let cards = mv.cards().map_err(MoveError::Invalid)?;

        let mut next = self.clone();
        let mut outcome = MoveOutcome::default();
        let phase = core::mem::replace(&mut next.phase, Phase::Waiting);
        next.phase = match (phase, mv.action) {
            (Phase::Discard(discard), Action::Discard) => {
                next.discard(discard, seat, &cards, &mut outcome)?
            }
            (Phase::Play(play), Action::PlayCard) => {
                next.play_card(play, seat, &cards, &mut outcome)?
            }
            (Phase::Play(play), Action::Go) => next.go(play, seat, &mut outcome),
            (Phase::Count(count), Action::Count) => next.count(count, seat, &mut outcome)?,
            _ => return Err(MoveError::Invalid(alloc::vec![ValidationError::WrongPhase])),
        };

        if let Some(winner) = outcome.winner {
            info!(?winner, scores = ?next.scores, "game won");
        }
        *self = next;
        Ok(outcome)
    }

    /// Applies a scoring event and returns the winner if it ended the game.
    pub(super) fn award(
        &mut self,
        outcome: &mut MoveOutcome,
        seat: Seat,
        points: u8,
        source: ScoreSource,
    ) -> Option<Seat> {
        let winner = self.scores.award(seat, points, self.options.target_score);
        outcome.events.push(ScoreEvent {
            seat,
            points,
            source,
        });
        outcome.winner = winner;
        winner
    }

    /// Two for his heels when the cut is a Jack.
    pub(super) fn heels(&mut self, cut: Card, outcome: &mut MoveOutcome) -> Option<Seat> {
        if cut.rank == Rank::Jack {
            self.award(outcome, self.dealer, 2, ScoreSource::Heels)
        } else {
            None
        }
    }
}
