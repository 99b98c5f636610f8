//! Selection policies over scored candidates.
//!
//! Scoring is shared; what differs between difficulties is how a move is
//! picked from the scored list:
//! - `BiasedRandom`: mostly random, leaning toward captures (Easy)
//! - `NearOptimal`: the best move, occasionally the runner-up (Medium, Hard)
//! - `Greedy`: always the best move (Expert)
//!
//! Ties always go to the candidate that comes first.

use std::cmp::Ordering;

use crate::core::GameRng;

use super::evaluate::Candidate;

/// Picks one candidate index from a scored list.
pub trait SelectionPolicy: Send + Sync {
    /// Index of the chosen candidate, `None` only for an empty list.
    fn select(&self, candidates: &[Candidate], rng: &mut GameRng) -> Option<usize>;
}

/// Candidate indices from best to worst score, stable on ties.
#[must_use]
pub fn ranked(candidates: &[Candidate]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        candidates[b]
            .score
            .partial_cmp(&candidates[a].score)
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Random play that prefers captures some of the time.
#[derive(Clone, Debug)]
pub struct BiasedRandom {
    /// Chance of a uniform pick over every candidate.
    pub random_chance: f64,
}

impl SelectionPolicy for BiasedRandom {
    fn select(&self, candidates: &[Candidate], rng: &mut GameRng) -> Option<usize> {
        if candidates.is_empty() {
            return None;
        }
        if rng.chance(self.random_chance) {
            return rng.pick_index(candidates.len());
        }

        let captures: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_capture())
            .map(|(i, _)| i)
            .collect();
        match rng.choose(&captures) {
            Some(&idx) => Some(idx),
            None => rng.pick_index(candidates.len()),
        }
    }
}

/// Best move, with a chance of settling for the second best.
#[derive(Clone, Debug)]
pub struct NearOptimal {
    pub second_best_chance: f64,
}

impl SelectionPolicy for NearOptimal {
    fn select(&self, candidates: &[Candidate], rng: &mut GameRng) -> Option<usize> {
        let order = ranked(candidates);
        match order.as_slice() {
            [] => None,
            [only] => Some(*only),
            [best, second, ..] => {
                if rng.chance(self.second_best_chance) {
                    Some(*second)
                } else {
                    Some(*best)
                }
            }
        }
    }
}

/// Strictly the highest score.
#[derive(Clone, Debug, Default)]
pub struct Greedy;

impl SelectionPolicy for Greedy {
    fn select(&self, candidates: &[Candidate], _rng: &mut GameRng) -> Option<usize> {
        ranked(candidates).first().copied()
    }
}
