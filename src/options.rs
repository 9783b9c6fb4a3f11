//! Game configuration options.

use crate::board::WINNING_SCORE;

/// Configuration options for a cribbage game.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use cribrs::GameOptions;
///
/// let options = GameOptions::default()
///     .with_target_score(61)
///     .with_last_card_point(false);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOptions {
    /// Points needed to win (121 for a standard game, 61 for a short one).
    pub target_score: u16,
    /// Whether a crib flush needs the cut card to match as well.
    pub strict_crib_flush: bool,
    /// Whether the final card of the play phase pegs one.
    pub last_card_point: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            target_score: WINNING_SCORE,
            strict_crib_flush: true,
            last_card_point: true,
        }
    }
}

impl GameOptions {
    /// Sets the winning score.
    ///
    /// # Example
    ///
    /// ```
    /// use cribrs::GameOptions;
    ///
    /// let options = GameOptions::default().with_target_score(61);
    /// assert_eq!(options.target_score, 61);
    /// ```
    #[must_use]
    pub const fn with_target_score(mut self, target: u16) -> Self {
        self.target_score = target;
        self
    }

    /// Sets whether the crib needs a five-card flush.
    ///
    /// With `false` the crib follows the same flush rule as a hand.
    ///
    /// # Example
    ///
    /// ```
    /// use cribrs::GameOptions;
    ///
    /// let options = GameOptions::default().with_strict_crib_flush(false);
    /// assert!(!options.strict_crib_flush);
    /// ```
    #[must_use]
    pub const fn with_strict_crib_flush(mut self, strict: bool) -> Self {
        self.strict_crib_flush = strict;
        self
    }

    /// Sets whether the last card of the play pegs one.
    ///
    /// # Example
    ///
    /// ```
    /// use cribrs::GameOptions;
    ///
    /// let options = GameOptions::default().with_last_card_point(false);
    /// assert!(!options.last_card_point);
    /// ```
    #[must_use]
    pub const fn with_last_card_point(mut self, enabled: bool) -> Self {
        self.last_card_point = enabled;
        self
    }
}
