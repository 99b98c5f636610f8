//! Card counting for the expert opponent.
//!
//! The tracker splits the deck into cards the seat has seen (both captured
//! piles, the table and its own hand) and cards it has not (the deck and
//! the other hand). It answers two questions: how close each seat is to a
//! scoring majority that is still winnable, and whether an unseen card of
//! some value is still out there.

use rustc_hash::FxHashSet;

use crate::cards::{Card, CardId, DECK_SIZE};
use crate::core::{GameState, Seat};
use crate::rules::scoring::{PileTally, SEVENS_THRESHOLD};

/// A scoring category tracked for majorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Cards,
    Diamonds,
    Sevens,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Cards, Category::Diamonds, Category::Sevens];

    /// How many of `cards` fall in this category.
    #[must_use]
    pub fn count(self, cards: &[Card]) -> usize {
        match self {
            Category::Cards => cards.len(),
            Category::Diamonds => cards.iter().filter(|c| c.is_diamond()).count(),
            Category::Sevens => cards.iter().filter(|c| c.is_seven()).count(),
        }
    }

    fn of(self, tally: &PileTally) -> usize {
        match self {
            Category::Cards => tally.cards,
            Category::Diamonds => tally.diamonds,
            Category::Sevens => tally.sevens,
        }
    }

    /// Holdings that secure the point outright.
    #[must_use]
    pub fn threshold(self) -> usize {
        match self {
            Category::Cards => DECK_SIZE / 2 + 1,
            Category::Diamonds => 10 / 2 + 1,
            Category::Sevens => SEVENS_THRESHOLD,
        }
    }
}

/// What a seat knows about the cards in play.
#[derive(Clone, Debug)]
pub struct CardTracker {
    mine: PileTally,
    theirs: PileTally,
    unseen: Vec<Card>,
    /// Cards in neither captured pile: still up for grabs this round.
    open: Vec<Card>,
}

impl CardTracker {
    /// Observe `state` from `seat`'s side of the table. `deck` is the full
    /// deck the game was dealt from.
    #[must_use]
    pub fn observe(state: &GameState, seat: Seat, deck: &[Card]) -> Self {
        let captured: FxHashSet<CardId> = state
            .players
            .iter()
            .flat_map(|(_, p)| p.captured.iter().map(|c| c.id))
            .collect();

        let mut seen: FxHashSet<CardId> = FxHashSet::default();
        let visible = state
            .table
            .iter()
            .chain(state.players[seat].hand.iter())
            .chain(state.players[Seat::Human].captured.iter())
            .chain(state.players[Seat::Npc].captured.iter());
        seen.extend(visible.map(|c| c.id));

        Self {
            mine: PileTally::of(&state.players[seat].captured),
            theirs: PileTally::of(&state.players[seat.other()].captured),
            unseen: deck.iter().filter(|c| !seen.contains(&c.id)).copied().collect(),
            open: deck.iter().filter(|c| !captured.contains(&c.id)).copied().collect(),
        }
    }

    /// Cards neither on the table, in our hand, nor in a captured pile.
    #[must_use]
    pub fn unseen(&self) -> &[Card] {
        &self.unseen
    }

    /// Unseen cards with the given value.
    #[must_use]
    pub fn unseen_with_value(&self, value: u32) -> usize {
        self.unseen
            .iter()
            .filter(|c| u32::from(c.value()) == value)
            .count()
    }

    /// Cards of `category` not yet in either captured pile.
    #[must_use]
    pub fn remaining(&self, category: Category) -> usize {
        category.count(&self.open)
    }

    /// Our and the opponent's holdings in a category.
    #[must_use]
    pub fn holdings(&self, category: Category) -> (usize, usize) {
        (category.of(&self.mine), category.of(&self.theirs))
    }

    /// Progress toward a majority from winning `gained` more cards in
    /// `category`: 0.0 when it does not help, 1.0 when it secures the point.
    ///
    /// A majority that can no longer be reached with the cards left open is
    /// worth nothing. Otherwise partial progress counts for more as the
    /// open cards run short, up to half again when every one is needed.
    #[must_use]
    pub fn majority_progress(&self, category: Category, gained: usize) -> f64 {
        if gained == 0 {
            return 0.0;
        }
        let (mine, theirs) = self.holdings(category);
        let threshold = category.threshold();
        if mine >= threshold || theirs >= threshold {
            return 0.0;
        }

        let needed = threshold - mine;
        let open = self.remaining(category);
        if open < needed {
            return 0.0;
        }
        if gained >= needed {
            return 1.0;
        }

        let scarcity = needed as f64 / open as f64;
        (gained as f64 / needed as f64) * (0.5 + 0.5 * scarcity)
    }
}
