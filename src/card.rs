//! Card types, point values, and card ids.

use core::fmt;
use core::str::FromStr;

use crate::error::CardParseError;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];

    const fn letter(self) -> char {
        match self {
            Self::Hearts => 'H',
            Self::Diamonds => 'D',
            Self::Clubs => 'C',
            Self::Spades => 'S',
        }
    }
}

/// Card rank. Aces are always low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    /// Ace.
    Ace = 1,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Rank {
    /// All thirteen ranks from Ace to King.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the rank for a number in `1..=13`.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        if n >= 1 && n <= 13 {
            Some(Self::ALL[(n - 1) as usize])
        } else {
            None
        }
    }

    /// Position used for run adjacency (Ace = 1, King = 13).
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Value counted toward fifteens and the running total.
    #[must_use]
    pub const fn point_value(self) -> u8 {
        match self {
            Self::Jack | Self::Queen | Self::King => 10,
            _ => self as u8,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "alloc::string::String", try_from = "alloc::string::String")
)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card.
    pub rank: Rank,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Returns the card's counting value (A = 1, face cards = 10).
    #[must_use]
    pub const fn point_value(self) -> u8 {
        self.rank.point_value()
    }
}

/// Card ids are the rank label followed by the suit letter, e.g. `10S` or `JC`.
impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.letter())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('H') => Suit::Hearts,
            Some('D') => Suit::Diamonds,
            Some('C') => Suit::Clubs,
            Some('S') => Suit::Spades,
            _ => return Err(CardParseError::InvalidSuit),
        };
        let rank = match chars.as_str() {
            "A" | "a" | "1" => Rank::Ace,
            "J" | "j" => Rank::Jack,
            "Q" | "q" => Rank::Queen,
            "K" | "k" => Rank::King,
            "T" | "t" => Rank::Ten,
            digits => digits
                .parse::<u8>()
                .ok()
                .filter(|n| (2..=10).contains(n))
                .and_then(Rank::from_number)
                .ok_or(CardParseError::InvalidRank)?,
        };
        Ok(Self::new(suit, rank))
    }
}

#[cfg(feature = "serde")]
impl From<Card> for alloc::string::String {
    fn from(card: Card) -> Self {
        alloc::string::ToString::to_string(&card)
    }
}

#[cfg(feature = "serde")]
impl TryFrom<alloc::string::String> for Card {
    type Error = CardParseError;

    fn try_from(id: alloc::string::String) -> Result<Self, Self::Error> {
        id.parse()
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
