//! Capture resolution: which table subsets a played card can take.
//!
//! A card captures any set of table cards whose values sum to its own
//! value. The search is a backtracking walk over the table in order, each
//! step only considering cards after the last one picked, so every subset
//! is produced once and never as a reordering of another. Values are
//! positive, so a branch stops as soon as its sum reaches the target.

use crate::cards::Card;

/// Every subset of `table` whose values sum to `played.value()`.
///
/// Subsets keep table order. Empty when the card must be dropped.
#[must_use]
pub fn find_valid_captures(played: &Card, table: &[Card]) -> Vec<Vec<Card>> {
    let mut results = Vec::new();
    let mut current = Vec::with_capacity(table.len());
    search(table, 0, u32::from(played.value()), 0, &mut current, &mut results);
    results
}

fn search(
    table: &[Card],
    start: usize,
    target: u32,
    sum: u32,
    current: &mut Vec<Card>,
    out: &mut Vec<Vec<Card>>,
) {
    for (idx, card) in table.iter().enumerate().skip(start) {
        let next = sum + u32::from(card.value());
        current.push(*card);
        if next == target {
            out.push(current.clone());
        } else if next < target {
            search(table, idx + 1, target, next, current, out);
        }
        current.pop();
    }
}

/// Whether `played` captures anything on `table`.
#[must_use]
pub fn has_capture(played: &Card, table: &[Card]) -> bool {
    fn any(table: &[Card], remaining: u32) -> bool {
        table.iter().enumerate().any(|(idx, card)| {
            let v = u32::from(card.value());
            v == remaining || (v < remaining && any(&table[idx + 1..], remaining - v))
        })
    }
    any(table, u32::from(played.value()))
}

/// Sum of card values.
#[must_use]
pub fn table_value(cards: &[Card]) -> u32 {
    cards.iter().map(|c| u32::from(c.value())).sum()
}
