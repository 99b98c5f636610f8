//! Computer opponent.
//!
//! Every difficulty scores the same candidate list (one per card in hand)
//! and hands it to a [`SelectionPolicy`]. The opponent only reads game
//! state; moves are applied by [`crate::rules::Chkobba`].
//!
//! ```
//! use chkobba_engine::core::{GameConfig, GameRng, Seat};
//! use chkobba_engine::opponent::{Difficulty, Opponent};
//! use chkobba_engine::rules::Chkobba;
//!
//! let mut rng = GameRng::new(7);
//! let mut game = Chkobba::standard(GameConfig::default()).unwrap();
//! game.start_new_game(&mut rng).unwrap();
//!
//! let npc = Opponent::new(Difficulty::Expert);
//! let choice = npc
//!     .choose_move(game.state(), Seat::Human, game.primitives(), &mut rng)
//!     .unwrap();
//! assert!(game.state().players[Seat::Human].hand.contains(&choice.card));
//! ```

pub mod config;
pub mod difficulty;
pub mod evaluate;
pub mod memory;
pub mod policy;

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::cards::CardPrimitives;
use crate::core::{GameRng, GameState, Seat};

pub use config::OpponentConfig;
pub use difficulty::Difficulty;
pub use evaluate::{score_candidates, Candidate, ScoringDepth};
pub use memory::{CardTracker, Category};
pub use policy::{ranked, BiasedRandom, Greedy, NearOptimal, SelectionPolicy};

/// A computer player.
pub struct Opponent {
    difficulty: Difficulty,
    config: OpponentConfig,
    policy: Box<dyn SelectionPolicy>,
}

impl Opponent {
    /// Opponent with default weights and the tier's policy.
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            config: OpponentConfig::default(),
            policy: difficulty.policy(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: OpponentConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the selection policy, keeping the tier's scoring depth.
    #[must_use]
    pub fn with_policy(mut self, policy: Box<dyn SelectionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &OpponentConfig {
        &self.config
    }

    /// Scored candidates for `seat`, one per card in hand.
    pub fn candidates<P: CardPrimitives + ?Sized>(
        &self,
        state: &GameState,
        seat: Seat,
        cards: &P,
    ) -> Vec<Candidate> {
        score_candidates(state, seat, cards, &self.config, self.difficulty.scoring_depth())
    }

    /// Pick a move for `seat`. `None` when the hand is empty.
    pub fn choose_move<P: CardPrimitives + ?Sized>(
        &self,
        state: &GameState,
        seat: Seat,
        cards: &P,
        rng: &mut GameRng,
    ) -> Option<Candidate> {
        let mut candidates = self.candidates(state, seat, cards);
        let idx = self.policy.select(&candidates, rng)?;
        if idx >= candidates.len() {
            return None;
        }
        let choice = candidates.swap_remove(idx);

        debug!(
            difficulty = %self.difficulty,
            card = %choice.card,
            capture = choice.is_capture(),
            score = choice.score,
            "opponent chose move"
        );
        Some(choice)
    }

    /// A random delay within the tier's thinking range.
    pub fn thinking_time(&self, rng: &mut GameRng) -> Duration {
        Duration::from_millis(rng.gen_range_inclusive(self.difficulty.thinking_range_ms()))
    }
}

impl fmt::Debug for Opponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opponent")
            .field("difficulty", &self.difficulty)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_deck, StandardCards};
    use crate::core::GameConfig;

    fn state_with(table: &[u8], hand: &[u8]) -> GameState {
        let deck = standard_deck();
        let mut state = GameState::new(&GameConfig::default());
        state.table = table.iter().map(|&i| deck[usize::from(i)]).collect();
        state.players[Seat::Npc].hand = hand.iter().map(|&i| deck[usize::from(i)]).collect();
        state.deck = vec![deck[39]];
        state
    }

    #[test]
    fn test_empty_hand_yields_none() {
        let state = state_with(&[0], &[]);
        let mut rng = GameRng::new(1);
        for d in Difficulty::ALL {
            let npc = Opponent::new(d);
            assert!(npc
                .choose_move(&state, Seat::Npc, &StandardCards::default(), &mut rng)
                .is_none());
        }
    }

    #[test]
    fn test_expert_takes_prize() {
        // Table: 7♦ and 3♥ 4♥. Hand: 7♣ and K♠.
        let state = state_with(&[6, 12, 13], &[26, 39]);
        let npc = Opponent::new(Difficulty::Expert);
        let mut rng = GameRng::new(3);

        let choice = npc
            .choose_move(&state, Seat::Npc, &StandardCards::default(), &mut rng)
            .unwrap();
        assert_eq!(choice.card.id.raw(), 26);
        assert!(choice.capture.unwrap()[0].is_prize());
    }

    #[test]
    fn test_thinking_time_in_range() {
        let mut rng = GameRng::new(5);
        for d in Difficulty::ALL {
            let npc = Opponent::new(d);
            let range = d.thinking_range_ms();
            for _ in 0..50 {
                let ms = npc.thinking_time(&mut rng).as_millis() as u64;
                assert!(range.contains(&ms));
            }
        }
    }

    #[test]
    fn test_with_policy_overrides_tier() {
        // Easy normally plays randomly; with a greedy policy it always
        // takes the capture.
        let state = state_with(&[12, 13], &[26, 39]);
        let npc = Opponent::new(Difficulty::Easy).with_policy(Box::new(Greedy));
        let mut rng = GameRng::new(8);
        for _ in 0..20 {
            let choice = npc
                .choose_move(&state, Seat::Npc, &StandardCards::default(), &mut rng)
                .unwrap();
            assert!(choice.is_capture());
        }
    }

    #[test]
    fn test_debug_skips_policy() {
        let text = format!("{:?}", Opponent::new(Difficulty::Hard));
        assert!(text.contains("Hard"));
    }
}
