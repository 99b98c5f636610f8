//! Difficulty tiers.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::evaluate::ScoringDepth;
use super::policy::{BiasedRandom, Greedy, NearOptimal, SelectionPolicy};

/// Opponent strength. Each tier pairs a scoring depth with a selection policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    #[must_use]
    pub fn scoring_depth(self) -> ScoringDepth {
        match self {
            Difficulty::Easy | Difficulty::Medium => ScoringDepth::Basic,
            Difficulty::Hard => ScoringDepth::Trends,
            Difficulty::Expert => ScoringDepth::Counting,
        }
    }

    /// The default policy for this tier.
    #[must_use]
    pub fn policy(self) -> Box<dyn SelectionPolicy> {
        match self {
            Difficulty::Easy => Box::new(BiasedRandom { random_chance: 0.7 }),
            Difficulty::Medium => Box::new(NearOptimal { second_best_chance: 0.2 }),
            Difficulty::Hard => Box::new(NearOptimal { second_best_chance: 0.05 }),
            Difficulty::Expert => Box::new(Greedy),
        }
    }

    /// Simulated thinking time in milliseconds. Presentation only; the
    /// engine never sleeps.
    #[must_use]
    pub fn thinking_range_ms(self) -> RangeInclusive<u64> {
        match self {
            Difficulty::Easy => 500..=1000,
            Difficulty::Medium => 800..=1500,
            Difficulty::Hard => 1000..=2000,
            Difficulty::Expert => 1200..=2500,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}
