//! Game state: zones, turn bookkeeping and cumulative scores.
//!
//! ## Zones
//!
//! - `deck`: face-down stack, the top card is the last element
//! - `table`: shared face-up cards
//! - each seat's `hand` and `captured` pile (in `PlayerState`)
//!
//! Every one of the 40 card ids lives in exactly one zone.
//!
//! ## Ownership
//!
//! `GameState` is a single owned value. Only the state machine mutates it;
//! hosts read it through `Chkobba::state()`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::MoveRecord;
use super::config::GameConfig;
use super::player::{PlayerState, Seat, SeatMap};
use crate::cards::{Card, CardId};

/// Where the game is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Dealing,
    Playing,
    RoundEnd,
    /// Terminal.
    GameEnd,
}

/// Complete game state.
///
/// Cloning is cheap enough for lookahead: the history is an `im` vector
/// and every other zone holds at most 40 `Copy` cards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    // === Zones ===
    pub deck: Vec<Card>,
    pub table: Vec<Card>,
    pub players: SeatMap<PlayerState>,

    // === Turn Bookkeeping ===
    pub current_player: Seat,
    pub dealer: Seat,
    /// Seat that made the most recent capture this round.
    pub last_capture: Option<Seat>,
    /// Round number, starting at 1.
    pub round: u32,
    pub phase: Phase,

    // === Scores ===
    pub totals: SeatMap<u32>,
    pub target_score: u32,

    // === Human Selection ===
    /// Card the human is considering.
    pub selected_card: Option<CardId>,
    /// Valid captures for `selected_card`.
    pub pending_captures: Vec<Vec<Card>>,

    /// Every move played this game.
    pub history: Vector<MoveRecord>,
}

impl GameState {
    /// Empty state for a new game: no cards dealt, round 1, dealing phase.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let dealer = config.first_dealer;
        Self {
            deck: Vec::new(),
            table: Vec::new(),
            players: SeatMap::default(),
            current_player: dealer.other(),
            dealer,
            last_capture: None,
            round: 1,
            phase: Phase::Dealing,
            totals: SeatMap::with_value(0),
            target_score: config.target_score,
            selected_card: None,
            pending_captures: Vec::new(),
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player(&self, seat: Seat) -> &PlayerState {
        &self.players[seat]
    }

    /// Sum of the table's card values.
    #[must_use]
    pub fn table_value(&self) -> u32 {
        self.table.iter().map(|c| u32::from(c.value())).sum()
    }

    /// Cards not yet played this round: deck plus both hands.
    #[must_use]
    pub fn cards_in_play(&self) -> usize {
        self.deck.len() + self.players.iter().map(|(_, p)| p.hand.len()).sum::<usize>()
    }

    /// Cards across every zone. Always 40 once a round has been dealt.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.table.len()
            + self
                .players
                .iter()
                .map(|(_, p)| p.card_count())
                .sum::<usize>()
    }

    /// Both hands are empty.
    #[must_use]
    pub fn hands_empty(&self) -> bool {
        self.players.iter().all(|(_, p)| p.hand.is_empty())
    }

    /// Moves played in the current round.
    pub fn round_history(&self) -> impl Iterator<Item = &MoveRecord> {
        let round = self.round;
        self.history.iter().filter(move |r| r.round == round)
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected_card = None;
        self.pending_captures.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_deck, Rank, Suit};

    #[test]
    fn test_new_state() {
        let state = GameState::new(&GameConfig::default());
        assert_eq!(state.round, 1);
        assert_eq!(state.phase, Phase::Dealing);
        assert_eq!(state.dealer, Seat::Npc);
        assert_eq!(state.current_player, Seat::Human);
        assert_eq!(state.total_cards(), 0);
        assert_eq!(state.target_score, 21);
        assert!(state.hands_empty());
    }

    #[test]
    fn test_counts_across_zones() {
        let mut state = GameState::new(&GameConfig::default());
        let mut deck = standard_deck();
        state.table = deck.drain(..4).collect();
        state.players[Seat::Human].hand.extend(deck.drain(..3));
        state.players[Seat::Npc].captured.extend(deck.drain(..5));
        state.deck = deck;

        assert_eq!(state.total_cards(), 40);
        assert_eq!(state.cards_in_play(), 28 + 3);
        assert!(!state.hands_empty());
    }

    #[test]
    fn test_table_value() {
        let mut state = GameState::new(&GameConfig::default());
        state.table = vec![
            Card::new(CardId(2), Suit::Diamonds, Rank::Three),
            Card::new(CardId(19), Suit::Hearts, Rank::King),
        ];
        assert_eq!(state.table_value(), 13);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = GameState::new(&GameConfig::default());
        state.deck = standard_deck();
        let snapshot = state.clone();

        state.deck.pop();
        assert_eq!(snapshot.deck.len(), 40);
        assert_eq!(state.deck.len(), 39);
    }
}
