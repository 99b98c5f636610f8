//! Card values: suit, rank, and the immutable `Card` record.
//!
//! Chkobba uses a 40-card deck: Ace through Seven plus Jack, Queen and King
//! in four suits. For sum arithmetic the Jack, Queen and King count 8, 9
//! and 10.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within a deck (0..40).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Diamonds,
    Hearts,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Diamonds, Suit::Hearts, Suit::Clubs, Suit::Spades];

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Diamonds => "Diamonds",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

/// Card rank. The discriminant is the value used in capture sums.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Jack = 8,
    Queen = 9,
    King = 10,
}

impl Rank {
    pub const ALL: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Rank for a numeric value in 1..=10.
    #[must_use]
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// Jack, Queen or King.
    #[must_use]
    pub const fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// An immutable playing card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// The Seven of Diamonds carries its own round point.
    pub const PRIZE_SUIT: Suit = Suit::Diamonds;
    pub const PRIZE_RANK: Rank = Rank::Seven;
    /// Rank tracked for the sevens majority.
    pub const SPECIAL_RANK: Rank = Rank::Seven;

    #[must_use]
    pub const fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self { id, suit, rank }
    }

    /// Value used in capture sums.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.rank.value()
    }

    #[must_use]
    pub const fn is_face(&self) -> bool {
        self.rank.is_face()
    }

    #[must_use]
    pub fn is_diamond(&self) -> bool {
        self.suit == Suit::Diamonds
    }

    #[must_use]
    pub fn is_seven(&self) -> bool {
        self.rank == Self::SPECIAL_RANK
    }

    /// Whether this is the Seven of Diamonds.
    #[must_use]
    pub fn is_prize(&self) -> bool {
        self.suit == Self::PRIZE_SUIT && self.rank == Self::PRIZE_RANK
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}
