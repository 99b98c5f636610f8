//! Round scoring.
//!
//! At the end of a round each seat can earn four one-point awards from its
//! captured pile plus one point per chkobba:
//!
//! - **Cards**: a strict majority of the deck (21 of 40)
//! - **Diamonds**: more diamonds than the opponent
//! - **Prize**: holding the Seven of Diamonds
//! - **Sevens**: at least three sevens and more than the opponent

use serde::{Deserialize, Serialize};

use crate::cards::{Card, DECK_SIZE};
use crate::core::{PlayerState, Seat, SeatMap};

/// Fewest sevens that can win the sevens point.
pub const SEVENS_THRESHOLD: usize = 3;

/// One seat's score for a finished round. Never mutated after computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub cards: u32,
    pub diamonds: u32,
    pub prize: u32,
    pub sevens: u32,
    pub chkobbas: u32,
    pub total: u32,
}

impl RoundScore {
    fn new(cards: bool, diamonds: bool, prize: bool, sevens: bool, chkobbas: u32) -> Self {
        let (cards, diamonds, prize, sevens) = (
            u32::from(cards),
            u32::from(diamonds),
            u32::from(prize),
            u32::from(sevens),
        );
        Self {
            cards,
            diamonds,
            prize,
            sevens,
            chkobbas,
            total: cards + diamonds + prize + sevens + chkobbas,
        }
    }
}

/// Tallies of the scoring categories in a captured pile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PileTally {
    pub cards: usize,
    pub diamonds: usize,
    pub sevens: usize,
    pub prize: bool,
}

impl PileTally {
    #[must_use]
    pub fn of(pile: &[Card]) -> Self {
        pile.iter().fold(Self::default(), |mut t, card| {
            t.cards += 1;
            t.diamonds += usize::from(card.is_diamond());
            t.sevens += usize::from(card.is_seven());
            t.prize |= card.is_prize();
            t
        })
    }
}

/// Score both seats from their captured piles and chkobba counts.
#[must_use]
pub fn score_round(players: &SeatMap<PlayerState>) -> SeatMap<RoundScore> {
    let tallies = players.map(|_, p| PileTally::of(&p.captured));

    players.map(|seat, player| {
        let mine = tallies[seat];
        let theirs = tallies[seat.other()];
        RoundScore::new(
            mine.cards > DECK_SIZE / 2,
            mine.diamonds > theirs.diamonds,
            mine.prize,
            mine.sevens >= SEVENS_THRESHOLD && mine.sevens > theirs.sevens,
            player.chkobbas,
        )
    })
}

/// Seat holding strictly more of a category, if any.
#[must_use]
pub fn leader(counts: SeatMap<usize>) -> Option<Seat> {
    let (human, npc) = (counts[Seat::Human], counts[Seat::Npc]);
    match human.cmp(&npc) {
        std::cmp::Ordering::Greater => Some(Seat::Human),
        std::cmp::Ordering::Less => Some(Seat::Npc),
        std::cmp::Ordering::Equal => None,
    }
}
