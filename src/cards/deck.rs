//! The standard 52-card deck.

use crate::core::DealRng;

use super::{Card, Rank, Suit};

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// A face-down deck in suit-then-rank order.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
        .collect()
}

/// A face-down deck shuffled by `rng`.
#[must_use]
pub fn shuffled_deck(rng: &mut DealRng) -> Vec<Card> {
    let mut deck = standard_deck();
    rng.shuffle(&mut deck);
    deck
}
