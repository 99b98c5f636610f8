//! Opponent scoring weights.

use serde::{Deserialize, Serialize};

/// Weights for the move-scoring function.
///
/// Capture scores start at `capture_base` so any capture outranks any
/// drop; drops are scored as the negative of what they hand over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentConfig {
    /// Flat bonus for capturing at all.
    pub capture_base: f64,

    /// Per card won (the played card included).
    pub card_weight: f64,

    /// Seven of Diamonds.
    pub prize_weight: f64,

    /// Per seven won.
    pub seven_weight: f64,

    /// Per diamond won.
    pub diamond_weight: f64,

    /// Emptying the table with an eligible card.
    pub chkobba_bonus: f64,

    /// Per card won in a category the opponent already leads.
    /// Hard and Expert only.
    pub trend_weight: f64,

    /// Leaving a table a single card could clear. Hard and Expert only.
    pub easy_clear_penalty: f64,

    /// Preference for shedding face cards when dropping.
    pub face_drop_bonus: f64,

    /// Scale of the card-counting bonus for closing in on a majority.
    /// Expert only.
    pub counting_weight: f64,

    /// Dropping onto a large table late in the round. Expert only.
    pub endgame_table_penalty: f64,

    /// Deck size at or below which the round counts as late.
    pub endgame_deck_threshold: usize,

    /// Table size at or above which the table counts as large.
    pub large_table_size: usize,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            capture_base: 100.0,
            card_weight: 10.0,
            prize_weight: 150.0,
            seven_weight: 30.0,
            diamond_weight: 8.0,
            chkobba_bonus: 200.0,
            trend_weight: 12.0,
            easy_clear_penalty: 60.0,
            face_drop_bonus: 5.0,
            counting_weight: 40.0,
            endgame_table_penalty: 25.0,
            endgame_deck_threshold: 6,
            large_table_size: 4,
        }
    }
}

impl OpponentConfig {
    #[must_use]
    pub fn with_capture_base(mut self, base: f64) -> Self {
        self.capture_base = base;
        self
    }

    #[must_use]
    pub fn with_chkobba_bonus(mut self, bonus: f64) -> Self {
        self.chkobba_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_prize_weight(mut self, weight: f64) -> Self {
        self.prize_weight = weight;
        self
    }
}
