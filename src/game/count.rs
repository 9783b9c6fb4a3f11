use tracing::info;

use crate::error::MoveError;
use crate::hand::Seat;
use crate::result::{MoveOutcome, ScoreSource};
use crate::score::score_hand;

use super::state::{CountPhase, GameState, Phase};

impl GameState {
    /// Counts `seat`'s hand; the dealer's count also takes the crib.
    ///
    /// After the crib the deal passes to the other seat and the game waits for
    /// the next deal.
    pub(super) fn count(
        &mut self,
        phase: CountPhase,
        seat: Seat,
        outcome: &mut MoveOutcome,
    ) -> Result<Phase, MoveError> {
        let hand = score_hand(&phase.hands[seat.index()], phase.cut, false)?;
        let points = hand.points;
        if let Some(winner) = self.award(outcome, seat, points, ScoreSource::Hand(hand)) {
            return Ok(Phase::Finished { winner });
        }

        if seat != self.dealer {
            return Ok(Phase::Count(CountPhase {
                next: self.dealer,
                ..phase
            }));
        }

        let crib = score_hand(&phase.crib, phase.cut, self.options.strict_crib_flush)?;
        let points = crib.points;
        if let Some(winner) = self.award(outcome, seat, points, ScoreSource::Crib(crib)) {
            return Ok(Phase::Finished { winner });
        }

        self.dealer = self.dealer.other();
        info!(scores = ?self.scores, next_dealer = ?self.dealer, "hand complete");
        Ok(Phase::Waiting)
    }
}
