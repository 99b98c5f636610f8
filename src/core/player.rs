//! Seats and per-seat data.
//!
//! ## Seat
//!
//! Chkobba is strictly two-handed: the human and the computer opponent.
//!
//! ## SeatMap
//!
//! Exactly one value per seat, indexable by `Seat`.
//!
//! ## PlayerState
//!
//! A seat's hand, captured pile and chkobba count for the current round.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use crate::cards::{Card, CardId};

/// One side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Human,
    Npc,
}

impl Seat {
    /// Both seats, human first.
    pub const ALL: [Seat; 2] = [Seat::Human, Seat::Npc];

    /// The opposing seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::Human => Seat::Npc,
            Seat::Npc => Seat::Human,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Human => write!(f, "human"),
            Seat::Npc => write!(f, "npc"),
        }
    }
}

/// One value per seat.
///
/// ```
/// use chkobba_engine::core::{Seat, SeatMap};
///
/// let mut totals: SeatMap<u32> = SeatMap::with_value(0);
/// totals[Seat::Npc] += 3;
/// assert_eq!(totals[Seat::Human], 0);
/// assert_eq!(totals[Seat::Npc], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    human: T,
    npc: T,
}

impl<T> SeatMap<T> {
    /// Build a map from a factory called once per seat.
    pub fn new(mut factory: impl FnMut(Seat) -> T) -> Self {
        Self {
            human: factory(Seat::Human),
            npc: factory(Seat::Npc),
        }
    }

    /// Every seat gets a clone of `value`.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            human: value.clone(),
            npc: value,
        }
    }

    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        match seat {
            Seat::Human => &self.human,
            Seat::Npc => &self.npc,
        }
    }

    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        match seat {
            Seat::Human => &mut self.human,
            Seat::Npc => &mut self.npc,
        }
    }

    /// Iterate over (Seat, &T) pairs, human first.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        [(Seat::Human, &self.human), (Seat::Npc, &self.npc)].into_iter()
    }

    /// Apply `f` to both values.
    pub fn map<U>(&self, mut f: impl FnMut(Seat, &T) -> U) -> SeatMap<U> {
        SeatMap {
            human: f(Seat::Human, &self.human),
            npc: f(Seat::Npc, &self.npc),
        }
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

/// Hand storage. A hand never holds more than three cards in play.
pub type Hand = SmallVec<[Card; 3]>;

/// A seat's cards and bonuses for the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub hand: Hand,
    /// Cards won this round. Order is irrelevant.
    pub captured: Vec<Card>,
    /// Table-clearing captures this round.
    pub chkobbas: u32,
}

impl PlayerState {
    /// Empty hand, empty pile, no chkobbas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a card in hand by id.
    #[must_use]
    pub fn hand_card(&self, id: CardId) -> Option<Card> {
        self.hand.iter().copied().find(|c| c.id == id)
    }

    /// Remove a card from hand, returning it if present.
    pub fn take_from_hand(&mut self, id: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(pos))
    }

    /// Total cards held in hand and pile.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.captured.len()
    }
}
