//! Deck construction tests.
//!
//! These tests verify deck composition for every preset:
//! - Size matches the grid
//! - Each identity appears exactly twice
//! - At most one filler card
//! - Shuffling actually moves cards

use memory_match::cards::{Card, DeckBuilder};
use memory_match::core::{DeckPolicy, Difficulty, GameRng};
use memory_match::{Color, Pattern};
use proptest::prelude::*;
use rustc_hash::FxHashMap;

fn identity_counts(deck: &[Card]) -> FxHashMap<(Color, Option<Pattern>), usize> {
    let mut counts = FxHashMap::default();
    for card in deck.iter().filter(|c| !c.is_filler()) {
        *counts.entry(card.identity()).or_insert(0) += 1;
    }
    counts
}

/// Every preset fills its grid exactly.
#[test]
fn test_deck_fills_grid() {
    let builder = DeckBuilder::default();
    let mut rng = GameRng::new(42);

    for difficulty in Difficulty::ALL {
        let deck = builder.build(difficulty, &mut rng);
        let n = difficulty.grid_size();
        assert_eq!(deck.len(), n * n, "{} deck should fill a {}x{} grid", difficulty, n, n);
    }
}

/// Easy: 9 cards, 8 paired plus 1 filler.
#[test]
fn test_easy_composition() {
    let mut rng = GameRng::new(7);
    let deck = DeckBuilder::default().build(Difficulty::Easy, &mut rng);

    assert_eq!(deck.len(), 9);
    assert_eq!(deck.iter().filter(|c| c.is_filler()).count(), 1);
    assert_eq!(deck.iter().filter(|c| !c.is_filler()).count(), 8);

    let filler = deck.iter().find(|c| c.is_filler()).unwrap();
    assert_eq!(filler.pattern, None);
}

/// Without padding, spare cells are left empty.
#[test]
fn test_pairs_only_policy() {
    let builder = DeckBuilder::new(DeckPolicy::PairsOnly);
    let mut rng = GameRng::new(7);

    for difficulty in Difficulty::ALL {
        let deck = builder.build(difficulty, &mut rng);
        assert_eq!(deck.len(), difficulty.number_of_pairs() * 2);
        assert!(deck.iter().all(|c| !c.is_filler()));
    }
}

/// The same builder and RNG give a different order each session.
#[test]
fn test_consecutive_decks_differ() {
    let builder = DeckBuilder::default();
    let mut rng = GameRng::new(42);

    let first = builder.build(Difficulty::Medium, &mut rng);
    let second = builder.build(Difficulty::Medium, &mut rng);

    let order = |deck: &[Card]| deck.iter().map(|c| c.id).collect::<Vec<_>>();
    assert_ne!(order(&first), order(&second));
}

/// The shuffle is almost never the identity permutation.
#[test]
fn test_shuffle_not_identity() {
    let builder = DeckBuilder::default();
    let mut identity_count = 0;

    for seed in 0..50 {
        let mut rng = GameRng::new(seed);
        let deck = builder.build(Difficulty::Medium, &mut rng);
        let in_order = deck
            .iter()
            .enumerate()
            .all(|(i, card)| card.id.raw() as usize == i);
        if in_order {
            identity_count += 1;
        }
    }

    assert_eq!(identity_count, 0);
}

/// Over many shuffles every card visits every position.
#[test]
fn test_shuffle_spreads_positions() {
    let builder = DeckBuilder::default();
    let mut rng = GameRng::new(1234);
    let size = builder.deck_size(Difficulty::Easy);
    let mut seen = vec![vec![false; size]; size];

    for _ in 0..500 {
        let deck = builder.build(Difficulty::Easy, &mut rng);
        for (pos, card) in deck.iter().enumerate() {
            seen[card.id.raw() as usize][pos] = true;
        }
    }

    assert!(seen.iter().all(|row| row.iter().all(|&hit| hit)));
}

proptest! {
    /// Composition holds for any seed and preset.
    #[test]
    fn prop_each_identity_exactly_twice(seed in any::<u64>(), preset in 0usize..3) {
        let difficulty = Difficulty::ALL[preset];
        let mut rng = GameRng::new(seed);
        let deck = DeckBuilder::default().build(difficulty, &mut rng);

        prop_assert_eq!(deck.len(), difficulty.cell_count());

        let counts = identity_counts(&deck);
        prop_assert_eq!(counts.len(), difficulty.number_of_pairs());
        prop_assert!(counts.values().all(|&n| n == 2));
        prop_assert!(deck.iter().filter(|c| c.is_filler()).count() <= 1);
        prop_assert!(deck.iter().all(|c| !c.face_up && !c.matched));
    }
}
