//! A single pile of cards.
//!
//! `Pile` is one type for every kind of pile; the kind tag decides which
//! legality rules apply, and those rules live in [`crate::rules`]. The
//! transfer primitives here (`push`, `pop`) never validate.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// What role a pile plays on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    /// Face-down undealt talon cards.
    Stock,
    /// Face-up drawn talon cards.
    Waste,
    /// Same-suit ascending target pile.
    Foundation,
    /// Main play column.
    Tableau,
}

/// An ordered stack of cards, bottom (index 0) to top (last).
///
/// Cards are kept in a persistent vector so that cloning a pile, as undo
/// snapshots do, is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    kind: PileKind,
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(kind: PileKind) -> Self {
        Self {
            kind,
            cards: Vector::new(),
        }
    }

    /// Create a pile holding `cards`, bottom first.
    #[must_use]
    pub fn with_cards(kind: PileKind, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            kind,
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PileKind {
        self.kind
    }

    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.cards.back()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Cards bottom to top.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Index of the card with the given id.
    #[must_use]
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    /// Whether the cards from `from_index` to the top may be lifted together.
    ///
    /// Tableau: every card in the range is face-up. Other kinds: only the top
    /// card may be lifted.
    #[must_use]
    pub fn can_detach_run(&self, from_index: usize) -> bool {
        if from_index >= self.cards.len() {
            return false;
        }
        match self.kind {
            PileKind::Tableau => self.cards.iter().skip(from_index).all(Card::is_face_up),
            _ => from_index + 1 == self.cards.len(),
        }
    }

    /// Copy of the cards from `from_index` to the top.
    #[must_use]
    pub fn run_from(&self, from_index: usize) -> Vector<Card> {
        self.cards.skip(from_index.min(self.cards.len()))
    }

    /// Place cards on top, first element lowest.
    pub fn push(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Remove the top `count` cards (clamped to the pile size), keeping
    /// their order.
    pub fn pop(&mut self, count: usize) -> Vector<Card> {
        let at = self.cards.len().saturating_sub(count);
        self.cards.split_off(at)
    }

    /// Remove every card.
    pub fn take_all(&mut self) -> Vector<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Turn the top card face-up if it is face-down.
    ///
    /// Returns the card if it was flipped.
    pub fn reveal_top(&mut self) -> Option<Card> {
        let top = self.cards.back_mut()?;
        if top.is_face_up() {
            return None;
        }
        top.set_face_up(true);
        Some(*top)
    }

    /// Turn the top card face-down.
    pub fn hide_top(&mut self) {
        if let Some(top) = self.cards.back_mut() {
            top.set_face_up(false);
        }
    }

    /// Number of face-down cards at the bottom of the pile.
    #[must_use]
    pub fn face_down_count(&self) -> usize {
        self.cards.iter().take_while(|c| !c.is_face_up()).count()
    }
}
