//! The full table: foundations, tableau columns and the talon.
//!
//! `Table` is the only owner of piles. It exposes mutable access to
//! foundation and tableau piles; the stock and waste are reachable only
//! through the [`TalonEngine`] so the talon state machine stays consistent.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Rank, DECK_SIZE};
use crate::core::{DrawOption, InvariantViolation};
use crate::rules;
use crate::talon::{ScoringMode, TalonEngine};

use super::{Pile, PileId, PileKind, FOUNDATION_COUNT, TABLEAU_COUNT};

/// Every pile in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    foundations: [Pile; FOUNDATION_COUNT],
    tableau: [Pile; TABLEAU_COUNT],
    talon: TalonEngine,
}

impl Table {
    /// A table with no cards.
    #[must_use]
    pub fn new(draw_mode: DrawOption, scoring_mode: ScoringMode) -> Self {
        Self {
            foundations: std::array::from_fn(|_| Pile::new(PileKind::Foundation)),
            tableau: std::array::from_fn(|_| Pile::new(PileKind::Tableau)),
            talon: TalonEngine::new(draw_mode, scoring_mode),
        }
    }

    /// Replace the contents of a foundation or tableau pile, bottom first.
    ///
    /// Used to lay out specific positions. Returns false for talon piles and
    /// invalid ids.
    pub fn place(&mut self, id: PileId, cards: impl IntoIterator<Item = Card>) -> bool {
        match self.pile_mut(id) {
            Some(pile) => {
                *pile = Pile::with_cards(pile.kind(), cards);
                true
            }
            None => false,
        }
    }

    /// Replace the talon.
    pub fn set_talon(&mut self, talon: TalonEngine) {
        self.talon = talon;
    }

    #[must_use]
    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        match id {
            PileId::Stock => Some(self.talon.stock()),
            PileId::Waste => Some(self.talon.waste()),
            PileId::Foundation(i) => self.foundations.get(usize::from(i)),
            PileId::Tableau(i) => self.tableau.get(usize::from(i)),
        }
    }

    /// Mutable access to a foundation or tableau pile.
    pub fn pile_mut(&mut self, id: PileId) -> Option<&mut Pile> {
        match id {
            PileId::Stock | PileId::Waste => None,
            PileId::Foundation(i) => self.foundations.get_mut(usize::from(i)),
            PileId::Tableau(i) => self.tableau.get_mut(usize::from(i)),
        }
    }

    #[must_use]
    pub fn talon(&self) -> &TalonEngine {
        &self.talon
    }

    pub fn talon_mut(&mut self) -> &mut TalonEngine {
        &mut self.talon
    }

    /// Find which pile holds a card and at what index.
    #[must_use]
    pub fn locate(&self, card: CardId) -> Option<(PileId, usize)> {
        PileId::all().find_map(|id| {
            let pile = self.pile(id)?;
            pile.position(card).map(|index| (id, index))
        })
    }

    /// Total cards on the table.
    #[must_use]
    pub fn card_count(&self) -> usize {
        PileId::all()
            .filter_map(|id| self.pile(id))
            .map(Pile::count)
            .sum()
    }

    /// All four foundations are complete.
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.foundations
            .iter()
            .all(|f| f.count() == Rank::ALL.len())
    }

    /// Check per-pile structure and that no card appears twice.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let mut seen = FxHashSet::default();
        for id in PileId::all() {
            let Some(pile) = self.pile(id) else { continue };
            for card in pile.cards() {
                if !seen.insert(card.id()) {
                    return Err(InvariantViolation::DuplicateCard(card.id()));
                }
            }
            Self::verify_pile(id, pile)?;
        }
        Ok(())
    }

    /// [`Table::verify`] plus the check that exactly one full deck is present.
    pub fn verify_full_deck(&self) -> Result<(), InvariantViolation> {
        self.verify()?;
        match self.card_count() {
            DECK_SIZE => Ok(()),
            n => Err(InvariantViolation::MissingCards(n)),
        }
    }

    fn verify_pile(id: PileId, pile: &Pile) -> Result<(), InvariantViolation> {
        let cards = pile.cards();
        match pile.kind() {
            PileKind::Stock => {
                if cards.iter().any(Card::is_face_up) {
                    return Err(InvariantViolation::FaceUpInStock(id));
                }
            }
            PileKind::Waste => {
                if !cards.iter().all(Card::is_face_up) {
                    return Err(InvariantViolation::FaceDownInPlay(id));
                }
            }
            PileKind::Foundation => {
                if !cards.iter().all(Card::is_face_up) {
                    return Err(InvariantViolation::FaceDownInPlay(id));
                }
                let suit = cards.front().map(|c| c.suit());
                let in_sequence = cards
                    .iter()
                    .enumerate()
                    .all(|(i, c)| Some(c.suit()) == suit && usize::from(c.rank().value()) == i + 1);
                if !in_sequence {
                    return Err(InvariantViolation::FoundationOutOfSequence(id));
                }
            }
            PileKind::Tableau => {
                let run: Vec<Card> = cards.iter().skip(pile.face_down_count()).copied().collect();
                if !run.is_empty() && !rules::can_move_run(&run) {
                    return Err(InvariantViolation::TableauRunBroken(id));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{standard_deck, Suit};

    fn up(rank: Rank, suit: Suit) -> Card {
        Card::face_up(rank, suit)
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(DrawOption::One, ScoringMode::Standard);
        assert_eq!(table.card_count(), 0);
        assert!(table.verify().is_ok());
        assert_eq!(table.verify_full_deck(), Err(InvariantViolation::MissingCards(0)));
        assert!(!table.is_win());
    }

    #[test]
    fn test_place_and_locate() {
        let mut table = Table::new(DrawOption::One, ScoringMode::Standard);
        assert!(table.place(PileId::Tableau(2), [up(Rank::King, Suit::Clubs)]));
        assert!(!table.place(PileId::Waste, [up(Rank::King, Suit::Hearts)]));
        assert!(!table.place(PileId::Tableau(9), []));

        let king = Card::new(Rank::King, Suit::Clubs).id();
        assert_eq!(table.locate(king), Some((PileId::Tableau(2), 0)));
        assert_eq!(table.locate(Card::new(Rank::Ace, Suit::Clubs).id()), None);
    }

    #[test]
    fn test_full_deck_in_stock_verifies() {
        let mut table = Table::new(DrawOption::One, ScoringMode::Standard);
        table.talon_mut().load(standard_deck());
        assert!(table.verify_full_deck().is_ok());
    }

    #[test]
    fn test_duplicate_detected() {
        let mut table = Table::new(DrawOption::One, ScoringMode::Standard);
        table.place(PileId::Tableau(0), [up(Rank::Five, Suit::Hearts)]);
        table.place(PileId::Tableau(1), [up(Rank::Five, Suit::Hearts)]);
        assert_eq!(
            table.verify(),
            Err(InvariantViolation::DuplicateCard(CardId::of(Rank::Five, Suit::Hearts)))
        );
    }

    #[test]
    fn test_foundation_sequence_checked() {
        let mut table = Table::new(DrawOption::One, ScoringMode::Standard);
        table.place(
            PileId::Foundation(0),
            [up(Rank::Ace, Suit::Hearts), up(Rank::Three, Suit::Hearts)],
        );
        assert_eq!(
            table.verify(),
            Err(InvariantViolation::FoundationOutOfSequence(PileId::Foundation(0)))
        );

        table.place(
            PileId::Foundation(0),
            [up(Rank::Ace, Suit::Hearts), up(Rank::Two, Suit::Spades)],
        );
        assert!(table.verify().is_err());
    }

    #[test]
    fn test_tableau_run_checked() {
        let mut table = Table::new(DrawOption::One, ScoringMode::Standard);
        table.place(
            PileId::Tableau(0),
            [
                Card::new(Rank::Two, Suit::Hearts),
                up(Rank::Nine, Suit::Clubs),
                up(Rank::Eight, Suit::Diamonds),
            ],
        );
        assert!(table.verify().is_ok());

        table.place(
            PileId::Tableau(0),
            [up(Rank::Nine, Suit::Clubs), up(Rank::Eight, Suit::Spades)],
        );
        assert_eq!(
            table.verify(),
            Err(InvariantViolation::TableauRunBroken(PileId::Tableau(0)))
        );
    }

    #[test]
    fn test_win() {
        let mut table = Table::new(DrawOption::One, ScoringMode::Standard);
        for (i, suit) in Suit::ALL.iter().enumerate() {
            let pile: Vec<_> = Rank::ALL.iter().map(|&r| up(r, *suit)).collect();
            table.place(PileId::Foundation(i as u8), pile);
        }
        assert!(table.is_win());
        assert!(table.verify_full_deck().is_ok());
    }
}
