//! Game configuration.
//!
//! `GameConfig` fixes the table rules for one game: target score, deal
//! sizes, the initial redeal cap, who deals first and which clearing
//! captures score a chkobba.

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::player::Seat;
use crate::cards::{ChkobbaRule, DECK_SIZE};

/// Table rules for a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cumulative score that ends the game.
    pub target_score: u32,

    /// Cards dealt to each player per hand.
    pub hand_size: usize,

    /// Cards dealt face-up to the table at the start of a round.
    pub initial_table_size: usize,

    /// Maximum shuffles when the initial table is clearable by one card.
    /// After this many attempts the last deal stands.
    pub max_deal_attempts: u32,

    /// Dealer of the first round. The other seat leads.
    pub first_dealer: Seat,

    /// Which table-clearing captures score a chkobba. Applied by
    /// `Chkobba::standard`; custom primitives carry their own rule.
    pub chkobba_rule: ChkobbaRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: 21,
            hand_size: 3,
            initial_table_size: 4,
            max_deal_attempts: 100,
            first_dealer: Seat::Npc,
            chkobba_rule: ChkobbaRule::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_target_score(mut self, target: u32) -> Self {
        self.target_score = target;
        self
    }

    #[must_use]
    pub fn with_first_dealer(mut self, dealer: Seat) -> Self {
        self.first_dealer = dealer;
        self
    }

    #[must_use]
    pub fn with_max_deal_attempts(mut self, attempts: u32) -> Self {
        self.max_deal_attempts = attempts;
        self
    }

    #[must_use]
    pub fn with_chkobba_rule(mut self, rule: ChkobbaRule) -> Self {
        self.chkobba_rule = rule;
        self
    }

    /// Reject configurations the state machine cannot run.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.target_score == 0 {
            return Err(EngineError::InvalidConfig("target_score must be positive".into()));
        }
        if self.hand_size == 0 {
            return Err(EngineError::InvalidConfig("hand_size must be positive".into()));
        }
        if self.initial_table_size == 0 {
            return Err(EngineError::InvalidConfig(
                "initial_table_size must be positive".into(),
            ));
        }
        if self.max_deal_attempts == 0 {
            return Err(EngineError::InvalidConfig(
                "max_deal_attempts must be positive".into(),
            ));
        }
        // The deck must divide evenly into full hands after the table deal.
        let after_table = DECK_SIZE
            .checked_sub(self.initial_table_size)
            .ok_or_else(|| EngineError::InvalidConfig("initial table exceeds the deck".into()))?;
        if after_table % (2 * self.hand_size) != 0 {
            return Err(EngineError::InvalidConfig(format!(
                "{after_table} cards cannot be dealt in hands of {}",
                self.hand_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.target_score, 21);
        assert_eq!(config.hand_size, 3);
        assert_eq!(config.initial_table_size, 4);
        assert_eq!(config.max_deal_attempts, 100);
        assert_eq!(config.first_dealer, Seat::Npc);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_target_score(11)
            .with_first_dealer(Seat::Human)
            .with_max_deal_attempts(5);

        assert_eq!(config.target_score, 11);
        assert_eq!(config.first_dealer, Seat::Human);
        assert_eq!(config.max_deal_attempts, 5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(GameConfig::default().with_target_score(0).validate().is_err());

        let uneven = GameConfig {
            hand_size: 4,
            ..GameConfig::default()
        };
        assert!(matches!(uneven.validate(), Err(EngineError::InvalidConfig(_))));

        let oversized = GameConfig {
            initial_table_size: 41,
            ..GameConfig::default()
        };
        assert!(oversized.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_target_score(31);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
