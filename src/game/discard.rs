use tracing::{debug, info};

use crate::card::Card;
use crate::error::{MoveError, ValidationError};
use crate::hand::{Hand, Seat};
use crate::play::PlaySequence;
use crate::result::MoveOutcome;

use super::state::{DiscardPhase, GameState, Phase, PlayPhase};

impl GameState {
    /// Moves two cards from `seat`'s hand to the crib.
    ///
    /// Once both seats have discarded the cut is revealed (scoring his heels
    /// for a Jack) and the pone leads the play.
    pub(super) fn discard(
        &mut self,
        mut phase: DiscardPhase,
        seat: Seat,
        cards: &[Card],
        outcome: &mut MoveOutcome,
    ) -> Result<Phase, MoveError> {
        let hand = &mut phase.hands[seat.index()];
        for card in cards {
            let Some(pos) = hand.iter().position(|held| held == card) else {
                return Err(MoveError::Invalid(alloc::vec![
                    ValidationError::CardNotInHand(*card)
                ]));
            };
            phase.crib.push(hand.remove(pos));
        }
        phase.discarded[seat.index()] = true;
        debug!(?seat, "discarded to crib");

        if !phase.discarded.iter().all(|&done| done) {
            return Ok(Phase::Discard(phase));
        }

        let [first, second] = phase.hands;
        let hands = [Hand::from_slice(&first)?, Hand::from_slice(&second)?];
        let crib = Hand::from_slice(&phase.crib)?;
        let cut = phase.cut;
        info!(%cut, "cut revealed");

        if let Some(winner) = self.heels(cut, outcome) {
            return Ok(Phase::Finished { winner });
        }

        Ok(Phase::Play(PlayPhase {
            remaining: [first, second],
            hands,
            crib,
            cut,
            sequence: PlaySequence::new(),
            turn: self.pone(),
            passed: [false; 2],
        }))
    }
}
