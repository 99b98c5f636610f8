//! Card primitives the engine consumes but does not own.
//!
//! The state machine never builds, shuffles or formats cards itself. It
//! goes through [`CardPrimitives`], so a host can swap in its own deck
//! source or eligibility rules, and tests can rig the shuffle.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, Rank, Suit};
use crate::core::rng::GameRng;

/// Number of cards in a Chkobba deck.
pub const DECK_SIZE: usize = 40;

/// Build the 40-card deck in suit-major order.
///
/// Ids are `suit_index * 10 + (value - 1)`, so the Seven of Diamonds is
/// `CardId(6)`.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for (suit_idx, &suit) in Suit::ALL.iter().enumerate() {
        for &rank in &Rank::ALL {
            let id = CardId::new((suit_idx * Rank::ALL.len()) as u8 + rank.value() - 1);
            deck.push(Card::new(id, suit, rank));
        }
    }
    deck
}

/// Which table-clearing captures award a chkobba.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChkobbaRule {
    /// Jack, Queen and King may score a chkobba.
    pub face_cards_count: bool,
    /// Clearing the table with the last card of the round scores.
    pub final_play_counts: bool,
}

impl Default for ChkobbaRule {
    fn default() -> Self {
        Self {
            face_cards_count: true,
            final_play_counts: false,
        }
    }
}

/// Facts about a table-clearing capture that eligibility may depend on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClearContext {
    /// No cards remain in the deck or in either hand after this play.
    pub final_play: bool,
}

/// Deck construction, shuffling, formatting and card predicates.
pub trait CardPrimitives {
    /// A complete, unshuffled deck of [`DECK_SIZE`] cards.
    fn build_deck(&self) -> Vec<Card> {
        standard_deck()
    }

    /// Shuffle `deck` in place.
    fn shuffle(&mut self, deck: &mut [Card], rng: &mut GameRng) {
        rng.shuffle(deck);
    }

    /// Human-readable card name for logs.
    fn display_name(&self, card: &Card) -> String {
        format!("{} of {}", rank_name(card.rank), card.suit.name())
    }

    /// Whether clearing the table with `card` awards a chkobba.
    fn can_complete_chkobba(&self, card: &Card, ctx: ClearContext) -> bool;

    /// High cards the opponent prefers to shed.
    fn is_face(&self, card: &Card) -> bool {
        card.is_face()
    }
}

fn rank_name(rank: Rank) -> &'static str {
    match rank {
        Rank::Ace => "Ace",
        Rank::Two => "Two",
        Rank::Three => "Three",
        Rank::Four => "Four",
        Rank::Five => "Five",
        Rank::Six => "Six",
        Rank::Seven => "Seven",
        Rank::Jack => "Jack",
        Rank::Queen => "Queen",
        Rank::King => "King",
    }
}

/// Standard deck with a configurable [`ChkobbaRule`].
#[derive(Clone, Debug, Default)]
pub struct StandardCards {
    rule: ChkobbaRule,
}

impl StandardCards {
    #[must_use]
    pub fn new(rule: ChkobbaRule) -> Self {
        Self { rule }
    }

    #[must_use]
    pub fn rule(&self) -> ChkobbaRule {
        self.rule
    }
}

impl CardPrimitives for StandardCards {
    fn can_complete_chkobba(&self, card: &Card, ctx: ClearContext) -> bool {
        if ctx.final_play && !self.rule.final_play_counts {
            return false;
        }
        self.rule.face_cards_count || !card.is_face()
    }
}
