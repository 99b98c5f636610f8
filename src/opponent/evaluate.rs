//! Move scoring shared by every difficulty.
//!
//! Each card in hand yields one candidate. A card that can capture is
//! paired with its best combination and scored as a capture; any other
//! card is scored as a drop. The scoring depth decides how much of the
//! game the valuation looks at:
//!
//! - `Basic`: the cards themselves (count, prize, sevens, diamonds)
//! - `Trends`: plus majorities already leaning our way, and drops that
//!   leave a single-card clear
//! - `Counting`: plus card counting toward majorities, unseen-card checks
//!   on clear risks, and endgame table pressure

use crate::cards::{Card, CardPrimitives, ClearContext};
use crate::core::{GameState, Move, Seat};
use crate::rules::capture::{find_valid_captures, table_value};
use crate::rules::scoring::leader;

use super::config::OpponentConfig;
use super::memory::{CardTracker, Category};

/// How far the valuation looks beyond the cards on offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScoringDepth {
    Basic,
    Trends,
    Counting,
}

/// A scored move.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub card: Card,
    /// Best combination for a capture, `None` for a drop.
    pub capture: Option<Vec<Card>>,
    pub score: f64,
}

impl Candidate {
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// The move this candidate plays.
    #[must_use]
    pub fn to_move(&self) -> Move {
        match &self.capture {
            Some(combo) => {
                let ids: Vec<_> = combo.iter().map(|c| c.id).collect();
                Move::capture(self.card.id, &ids)
            }
            None => Move::drop(self.card.id),
        }
    }
}

/// Score every card in `seat`'s hand, in hand order.
pub fn score_candidates<P: CardPrimitives + ?Sized>(
    state: &GameState,
    seat: Seat,
    cards: &P,
    config: &OpponentConfig,
    depth: ScoringDepth,
) -> Vec<Candidate> {
    let scorer = Scorer::new(state, seat, cards, config, depth);

    state.players[seat]
        .hand
        .iter()
        .map(|card| {
            let mut best: Option<(Vec<Card>, f64)> = None;
            for combo in find_valid_captures(card, &state.table) {
                let score = scorer.capture_score(card, &combo);
                if best.as_ref().map_or(true, |(_, top)| score > *top) {
                    best = Some((combo, score));
                }
            }

            match best {
                Some((combo, score)) => Candidate {
                    card: *card,
                    capture: Some(combo),
                    score,
                },
                None => Candidate {
                    card: *card,
                    capture: None,
                    score: scorer.drop_score(card),
                },
            }
        })
        .collect()
}

struct Scorer<'a, P: ?Sized> {
    state: &'a GameState,
    cards: &'a P,
    config: &'a OpponentConfig,
    depth: ScoringDepth,
    /// Categories where we hold strictly more than the opponent.
    trending: Vec<Category>,
    tracker: Option<CardTracker>,
}

impl<'a, P: CardPrimitives + ?Sized> Scorer<'a, P> {
    fn new(
        state: &'a GameState,
        seat: Seat,
        cards: &'a P,
        config: &'a OpponentConfig,
        depth: ScoringDepth,
    ) -> Self {
        let trending = Category::ALL
            .into_iter()
            .filter(|&cat| leader(state.players.map(|_, p| cat.count(&p.captured))) == Some(seat))
            .collect();

        let tracker = (depth == ScoringDepth::Counting)
            .then(|| CardTracker::observe(state, seat, &cards.build_deck()));

        Self {
            state,
            cards,
            config,
            depth,
            trending,
            tracker,
        }
    }

    /// Value of winning `won` (played card included).
    fn valuation(&self, won: &[Card]) -> f64 {
        let cfg = self.config;
        let sevens = Category::Sevens.count(won) as f64;
        let diamonds = Category::Diamonds.count(won) as f64;
        let prize = if won.iter().any(Card::is_prize) { 1.0 } else { 0.0 };

        let mut value = cfg.card_weight * won.len() as f64
            + cfg.prize_weight * prize
            + cfg.seven_weight * sevens
            + cfg.diamond_weight * diamonds;

        if self.depth >= ScoringDepth::Trends {
            let trend: usize = self.trending.iter().map(|cat| cat.count(won)).sum();
            value += cfg.trend_weight * trend as f64;
        }

        if let Some(tracker) = &self.tracker {
            let progress: f64 = Category::ALL
                .iter()
                .map(|&cat| tracker.majority_progress(cat, cat.count(won)))
                .sum();
            value += cfg.counting_weight * progress;
        }

        value
    }

    fn capture_score(&self, card: &Card, combo: &[Card]) -> f64 {
        let mut won = Vec::with_capacity(combo.len() + 1);
        won.push(*card);
        won.extend_from_slice(combo);

        let mut score = self.config.capture_base + self.valuation(&won);

        if combo.len() == self.state.table.len() {
            // The played card is the last one left anywhere.
            let ctx = ClearContext {
                final_play: self.state.cards_in_play() == 1,
            };
            if self.cards.can_complete_chkobba(card, ctx) {
                score += self.config.chkobba_bonus;
            }
        }
        score
    }

    fn drop_score(&self, card: &Card) -> f64 {
        let cfg = self.config;
        let mut score = -self.valuation(std::slice::from_ref(card));

        if self.cards.is_face(card) {
            score += cfg.face_drop_bonus;
        }

        if self.depth >= ScoringDepth::Trends {
            let after = table_value(&self.state.table) + u32::from(card.value());
            let clearable = (1..=10).contains(&after);
            // With counting, a clear is only a threat if a matching card is unaccounted for.
            let threatened = match &self.tracker {
                Some(tracker) => clearable && tracker.unseen_with_value(after) > 0,
                None => clearable,
            };
            if threatened {
                score -= cfg.easy_clear_penalty;
            }
        }

        if self.tracker.is_some()
            && self.state.deck.len() <= cfg.endgame_deck_threshold
            && self.state.table.len() >= cfg.large_table_size
        {
            score -= cfg.endgame_table_penalty;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_deck, StandardCards};
    use crate::core::GameConfig;

    fn deck_card(id: u8) -> Card {
        standard_deck()[usize::from(id)]
    }

    fn state_with(table: &[u8], hand: &[u8]) -> GameState {
        let mut state = GameState::new(&GameConfig::default());
        state.table = table.iter().map(|&i| deck_card(i)).collect();
        state.players[Seat::Npc].hand = hand.iter().map(|&i| deck_card(i)).collect();
        // Keep the round from looking like its final play.
        state.deck = vec![deck_card(39)];
        state
    }

    fn score(state: &GameState, depth: ScoringDepth) -> Vec<Candidate> {
        let config = OpponentConfig::default();
        score_candidates(state, Seat::Npc, &StandardCards::default(), &config, depth)
    }

    // Ids: suit * 10 + value - 1. Diamonds 0..10, Hearts 10..20,
    // Clubs 20..30, Spades 30..40.

    #[test]
    fn test_capture_outscores_drop() {
        // Table: 3♥ 4♥. Hand: 7♣ (captures), K♣ (drops).
        let state = state_with(&[12, 13], &[26, 29]);
        let candidates = score(&state, ScoringDepth::Basic);

        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].is_capture());
        assert!(!candidates[1].is_capture());
        assert!(candidates[0].score > candidates[1].score);
    }

    #[test]
    fn test_best_combination_prefers_prize() {
        // Table: 7♦ (prize), 3♥, 4♥. Hand: 7♣ can take 7♦ or 3♥+4♥.
        let state = state_with(&[6, 12, 13], &[26]);
        let candidates = score(&state, ScoringDepth::Basic);

        let combo = candidates[0].capture.as_ref().unwrap();
        assert_eq!(combo.len(), 1);
        assert!(combo[0].is_prize());
    }

    #[test]
    fn test_chkobba_bonus() {
        // Table: 3♥ 4♥. 7♣ clears it; 7♠ on a table with an extra ace does not.
        let clear = state_with(&[12, 13], &[26]);
        let partial = state_with(&[12, 13, 20], &[26]);

        let clear_score = score(&clear, ScoringDepth::Basic)[0].score;
        let partial_score = score(&partial, ScoringDepth::Basic)[0].score;
        let config = OpponentConfig::default();
        assert!((clear_score - partial_score - config.chkobba_bonus).abs() < 1e-9);
    }

    #[test]
    fn test_dropping_prize_is_heavily_penalized() {
        // Table: K♥. Hand: 7♦ (prize), 6♣. Neither captures.
        let state = state_with(&[19], &[6, 25]);
        let candidates = score(&state, ScoringDepth::Basic);

        assert!(!candidates[0].is_capture() && !candidates[1].is_capture());
        assert!(candidates[0].score < candidates[1].score - 100.0);
    }

    #[test]
    fn test_easy_clear_penalty_only_with_trends() {
        // Table: 2♥. Dropping A♣ leaves a total of 3, a single-card clear.
        // Dropping Q♣ leaves 11, which no card clears.
        let state = state_with(&[11], &[20, 28]);

        let basic = score(&state, ScoringDepth::Basic);
        let trends = score(&state, ScoringDepth::Trends);
        let config = OpponentConfig::default();

        assert!((basic[0].score - trends[0].score - config.easy_clear_penalty).abs() < 1e-9);
        assert!((basic[1].score - trends[1].score).abs() < 1e-9);
    }

    #[test]
    fn test_counting_skips_penalty_when_all_matching_cards_seen() {
        // Table: 2♥. Dropping A♣ makes 3; every three is already visible.
        let mut state = state_with(&[11], &[20]);
        state.players[Seat::Human].captured =
            vec![deck_card(2), deck_card(12), deck_card(22), deck_card(32)];

        let trends = score(&state, ScoringDepth::Trends);
        let counting = score(&state, ScoringDepth::Counting);
        assert!(counting[0].score > trends[0].score);
    }

    #[test]
    fn test_trend_bonus_for_leading_category() {
        // Npc already leads diamonds 2-0; capturing a diamond is worth more
        // with trends on.
        let mut state = state_with(&[2], &[22]);
        state.players[Seat::Npc].captured = vec![deck_card(0), deck_card(1)];

        let basic = score(&state, ScoringDepth::Basic)[0].score;
        let trends = score(&state, ScoringDepth::Trends)[0].score;
        assert!(trends > basic);
    }

    #[test]
    fn test_no_chkobba_bonus_on_last_play() {
        // Deck and human hand empty: 7♣ is the last card of the round.
        let mut last = state_with(&[12, 13], &[26]);
        last.deck.clear();
        let with_deck = state_with(&[12, 13], &[26]);

        let last_score = score(&last, ScoringDepth::Basic)[0].score;
        let mid_score = score(&with_deck, ScoringDepth::Basic)[0].score;
        let config = OpponentConfig::default();
        assert!((mid_score - last_score - config.chkobba_bonus).abs() < 1e-9);
    }

    #[test]
    fn test_to_move() {
        let state = state_with(&[12, 13], &[26, 29]);
        let candidates = score(&state, ScoringDepth::Basic);

        let capture = candidates[0].to_move();
        assert_eq!(capture.card, deck_card(26).id);
        assert_eq!(capture.captured.len(), 2);
        assert!(candidates[1].to_move().is_drop());
    }
}
