//! Capture resolver verification.
//!
//! The resolver is checked against an exhaustive bitmask enumeration on
//! small tables drawn from a real deck.

use chkobba_engine::cards::{standard_deck, Card, CardId};
use chkobba_engine::rules::{find_valid_captures, has_capture, table_value};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

fn ids(cards: &[Card]) -> Vec<CardId> {
    let mut ids: Vec<CardId> = cards.iter().map(|c| c.id).collect();
    ids.sort();
    ids
}

/// Every subset of `table` whose values sum to the played card.
fn brute_force(played: &Card, table: &[Card]) -> FxHashSet<Vec<CardId>> {
    let target = u32::from(played.value());
    (1u32..(1 << table.len()))
        .map(|mask| {
            table
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect::<Vec<_>>()
        })
        .filter(|subset| table_value(subset) == target)
        .map(|subset| ids(&subset))
        .collect()
}

/// A played card plus a table of up to eight other distinct cards.
fn deal() -> impl Strategy<Value = (Card, Vec<Card>)> {
    Just(standard_deck())
        .prop_shuffle()
        .prop_flat_map(|deck| (Just(deck), 0usize..=8))
        .prop_map(|(deck, n)| (deck[0], deck[1..=n].to_vec()))
}

proptest! {
    /// Property: the resolver finds exactly the subsets the brute force does.
    #[test]
    fn prop_matches_brute_force((played, table) in deal()) {
        let found: Vec<Vec<CardId>> = find_valid_captures(&played, &table)
            .iter()
            .map(|combo| ids(combo))
            .collect();
        let unique: FxHashSet<Vec<CardId>> = found.iter().cloned().collect();

        prop_assert_eq!(unique.len(), found.len(), "combinations must be unique");
        prop_assert_eq!(unique, brute_force(&played, &table));
    }

    /// Property: every combination sums to the played card and only uses
    /// table cards.
    #[test]
    fn prop_combinations_are_valid((played, table) in deal()) {
        let on_table: FxHashSet<CardId> = table.iter().map(|c| c.id).collect();
        for combo in find_valid_captures(&played, &table) {
            prop_assert!(!combo.is_empty());
            prop_assert_eq!(table_value(&combo), u32::from(played.value()));
            prop_assert!(combo.iter().all(|c| on_table.contains(&c.id)));
        }
        prop_assert_eq!(
            has_capture(&played, &table),
            !find_valid_captures(&played, &table).is_empty()
        );
    }
}

#[test]
fn test_empty_table_has_no_captures() {
    let deck = standard_deck();
    for card in &deck {
        assert!(find_valid_captures(card, &[]).is_empty());
    }
}

#[test]
fn test_king_takes_pairs_and_single() {
    let deck = standard_deck();
    // K♣ against K♦, 3♥ 7♠, A♣. Ids: suit * 10 + value - 1.
    let king = deck[29];
    let table = vec![deck[9], deck[12], deck[36], deck[20]];

    let combos = find_valid_captures(&king, &table);
    let found: FxHashSet<Vec<CardId>> = combos.iter().map(|c| ids(c)).collect();

    assert_eq!(combos.len(), 2);
    assert!(found.contains(&vec![deck[9].id]));
    assert!(found.contains(&ids(&[deck[12], deck[36]])));
}
