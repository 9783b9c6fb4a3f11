//! Game state machine and session management.

use alloc::string::String;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument};

use crate::card::Card;
use crate::error::{DealError, MoveError};
use crate::hand::Seat;
use crate::moves::Move;
use crate::options::GameOptions;
use crate::result::MoveOutcome;
use crate::sync::Mutex;

mod count;
mod discard;
mod pegging;
pub mod state;

pub use state::{CountPhase, DiscardPhase, GameState, Phase, PlayPhase};

struct Session {
    state: GameState,
    rng: ChaCha8Rng,
}

impl Session {
    fn deal_if_waiting(&mut self) -> Result<(), DealError> {
        if self.state.phase == Phase::Waiting {
            self.state.deal(&mut self.rng)?;
        }
        Ok(())
    }
}

/// A single cribbage game between two players.
///
/// The game owns its [`GameState`] and the RNG used for shuffling behind one
/// lock, so concurrent requests for the same game are applied one at a time.
/// A fresh deck is shuffled for every deal.
pub struct Game {
    session: Mutex<Session>,
}

impl Game {
    /// Creates a new game with the given seed and deals the first hand.
    ///
    /// # Errors
    ///
    /// Returns the [`DealError`] if the first hand cannot be dealt.
    ///
    /// # Example
    ///
    /// ```
    /// use cribrs::{Game, GameOptions, Seat};
    ///
    /// let game = Game::new(GameOptions::default(), "g1", "a@example.com", "b@example.com", 42)?;
    /// assert_eq!(game.held(Seat::Player1).len(), 6);
    /// # Ok::<(), cribrs::DealError>(())
    /// ```
    pub fn new(
        options: GameOptions,
        game_id: impl Into<String>,
        player1: impl Into<String>,
        player2: impl Into<String>,
        seed: u64,
    ) -> Result<Self, DealError> {
        Self::from_state(GameState::new(game_id, player1, player2, options), seed)
    }

    /// Resumes a game from a stored state. A waiting state is dealt at once.
    ///
    /// # Errors
    ///
    /// Returns the [`DealError`] if a waiting state cannot be dealt.
    pub fn from_state(state: GameState, seed: u64) -> Result<Self, DealError> {
        let mut session = Session {
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        session.deal_if_waiting()?;
        Ok(Self {
            session: Mutex::new(session),
        })
    }

    /// Validates and applies a move, dealing the next hand when one finishes.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::Invalid`] if the move is illegal; the game is left
    /// unchanged.
    #[instrument(skip(self), fields(action = ?mv.action))]
    pub fn submit(&self, mv: &Move) -> Result<MoveOutcome, MoveError> {
        let mut session = self.session.lock();
        let outcome = session.state.apply(mv)?;
        session.deal_if_waiting()?;
        debug!(phase = session.state.phase.name(), "move applied");
        Ok(outcome)
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> GameState {
        self.session.lock().state.clone()
    }

    /// Returns the cards `seat` currently holds.
    pub fn held(&self, seat: Seat) -> Vec<Card> {
        self.session.lock().state.held(seat).to_vec()
    }

    /// Returns the winner once the game is finished.
    pub fn winner(&self) -> Option<Seat> {
        self.session.lock().state.winner()
    }

    /// Consumes the game and returns its state for storage.
    pub fn into_state(self) -> GameState {
        self.session.into_inner().state
    }
}
