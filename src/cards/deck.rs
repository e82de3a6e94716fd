//! Deck construction.
//!
//! Pair `i` gets color `PALETTE[i]` and pattern `ALL[i % 10]`, so a pair's
//! appearance depends only on its index. Every preset needs at most 24
//! pairs, so no two pairs share a color and equal colors always mean equal
//! patterns. Only positions are random: the finished deck is shuffled
//! uniformly.

use log::trace;

use super::card::{Card, CardId, Color, Pattern};
use crate::core::{DeckPolicy, Difficulty, GameRng};

/// Builds shuffled decks for a difficulty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckBuilder {
    policy: DeckPolicy,
}

impl DeckBuilder {
    #[must_use]
    pub fn new(policy: DeckPolicy) -> Self {
        Self { policy }
    }

    /// Whether a deck for `difficulty` carries a filler card.
    #[must_use]
    pub fn has_filler(&self, difficulty: Difficulty) -> bool {
        self.policy == DeckPolicy::Padded
            && difficulty.cell_count() == difficulty.number_of_pairs() * 2 + 1
    }

    /// Number of cards `build` returns for `difficulty`.
    #[must_use]
    pub fn deck_size(&self, difficulty: Difficulty) -> usize {
        difficulty.number_of_pairs() * 2 + usize::from(self.has_filler(difficulty))
    }

    /// Build a shuffled deck. Every card starts face-down and unmatched.
    pub fn build(&self, difficulty: Difficulty, rng: &mut GameRng) -> Vec<Card> {
        let pairs = difficulty.number_of_pairs();
        debug_assert!(pairs <= Color::PALETTE.len(), "palette too small for {}", difficulty);
        let mut deck = Vec::with_capacity(self.deck_size(difficulty));

        let mut next_id = 0u32;
        let mut alloc_id = || {
            let id = CardId::new(next_id);
            next_id += 1;
            id
        };

        for i in 0..pairs {
            let color = Color::for_index(i);
            let pattern = Pattern::for_index(i);
            deck.push(Card::new(alloc_id(), color, pattern));
            deck.push(Card::new(alloc_id(), color, pattern));
        }

        if self.has_filler(difficulty) {
            deck.push(Card::filler(alloc_id()));
        }

        rng.shuffle(&mut deck);
        trace!("built {} deck of {} cards", difficulty, deck.len());
        deck
    }
}
