//! Cumulative scores and win detection.

use crate::hand::Seat;

/// Points needed to win a standard game.
pub const WINNING_SCORE: u16 = 121;

/// The two players' cumulative scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameScore {
    /// Player 1's score.
    pub player1: u16,
    /// Player 2's score.
    pub player2: u16,
}

impl GameScore {
    /// Creates a score of 0 to 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            player1: 0,
            player2: 0,
        }
    }

    /// Returns the score for `seat`.
    #[must_use]
    pub const fn get(&self, seat: Seat) -> u16 {
        match seat {
            Seat::Player1 => self.player1,
            Seat::Player2 => self.player2,
        }
    }

    /// Adds `points` to `seat` and reports a winner if `target` was reached.
    ///
    /// Callers pass every scoring event through here so that a win is
    /// detected in the same call that applies the points.
    pub fn award(&mut self, seat: Seat, points: u8, target: u16) -> Option<Seat> {
        let score = match seat {
            Seat::Player1 => &mut self.player1,
            Seat::Player2 => &mut self.player2,
        };
        *score = score.saturating_add(u16::from(points));
        check_win(self, target)
    }
}

/// Returns the seat that has reached `target`, if any. Player 1 is checked first.
#[must_use]
pub const fn check_win(score: &GameScore, target: u16) -> Option<Seat> {
    if score.player1 >= target {
        Some(Seat::Player1)
    } else if score.player2 >= target {
        Some(Seat::Player2)
    } else {
        None
    }
}
