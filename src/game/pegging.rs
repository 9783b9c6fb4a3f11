use alloc::vec::Vec;

use tracing::{debug, info};

use crate::card::Card;
use crate::error::{MoveError, ValidationError};
use crate::hand::Seat;
use crate::result::{MoveOutcome, ScoreSource};

use super::state::{CountPhase, GameState, Phase, PlayPhase};

impl GameState {
    /// Pegs `seat`'s card and passes the turn on.
    pub(super) fn play_card(
        &mut self,
        mut phase: PlayPhase,
        seat: Seat,
        cards: &[Card],
        outcome: &mut MoveOutcome,
    ) -> Result<Phase, MoveError> {
        let Some(&card) = cards.first() else {
            return Err(MoveError::Invalid(alloc::vec![
                ValidationError::MissingCardId
            ]));
        };

        let score = phase.sequence.play(seat, card)?;
        phase.remaining[seat.index()].retain(|held| *held != card);
        if phase.sequence.current_count().is_empty() {
            // 31 closes the count.
            phase.passed = [false; 2];
        }

        if score.points > 0 {
            let points = score.points;
            if let Some(winner) = self.award(outcome, seat, points, ScoreSource::Pegging(score)) {
                return Ok(Phase::Finished { winner });
            }
        }

        Ok(self.settle(phase, seat, outcome))
    }

    /// Records that `seat` cannot play in the current count.
    pub(super) fn go(
        &mut self,
        mut phase: PlayPhase,
        seat: Seat,
        outcome: &mut MoveOutcome,
    ) -> Phase {
        debug!(?seat, total = phase.sequence.total(), "go");
        phase.passed[seat.index()] = true;
        self.settle(phase, seat, outcome)
    }

    /// Decides who acts next after `actor` played or said go.
    ///
    /// The opponent acts if still in the count, otherwise `actor` continues.
    /// When neither can, the count closes with a go point for the last player
    /// and the seat after them leads the next count.
    fn settle(&mut self, mut phase: PlayPhase, actor: Seat, outcome: &mut MoveOutcome) -> Phase {
        if phase.remaining.iter().all(Vec::is_empty) {
            return self.finish_play(phase, outcome);
        }

        let other = actor.other();
        if !phase.is_out(other) {
            phase.turn = other;
            return Phase::Play(phase);
        }
        if !phase.is_out(actor) {
            phase.turn = actor;
            return Phase::Play(phase);
        }

        let mut last = actor;
        if let Some((seat, score)) = phase.sequence.go() {
            last = seat;
            if score.points > 0 {
                let points = score.points;
                if let Some(winner) =
                    self.award(outcome, seat, points, ScoreSource::Pegging(score))
                {
                    return Phase::Finished { winner };
                }
            }
        }

        phase.passed = [false; 2];
        phase.turn = if phase.remaining[last.other().index()].is_empty() {
            last
        } else {
            last.other()
        };
        Phase::Play(phase)
    }

    /// All eight cards are out: peg the last card and move to counting.
    fn finish_play(&mut self, mut phase: PlayPhase, outcome: &mut MoveOutcome) -> Phase {
        if self.options.last_card_point {
            if let Some((seat, score)) = phase.sequence.last_card() {
                if score.points > 0 {
                    let points = score.points;
                    if let Some(winner) =
                        self.award(outcome, seat, points, ScoreSource::Pegging(score))
                    {
                        return Phase::Finished { winner };
                    }
                }
            }
        }

        info!(scores = ?self.scores, "play finished");
        Phase::Count(CountPhase {
            hands: phase.hands,
            crib: phase.crib,
            cut: phase.cut,
            next: self.pone(),
        })
    }
}
