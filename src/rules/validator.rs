//! Move legality.
//!
//! Pure functions with no side effects. The `check_*` forms say why a move
//! is illegal; the `can_*` forms are the boolean shorthands.

use crate::cards::{Card, Rank};
use crate::core::MoveRejection;
use crate::piles::{Pile, PileKind};

/// Can `card` be placed on `foundation`?
///
/// An empty foundation takes an Ace; otherwise the card must match the top
/// card's suit and be exactly one rank higher.
pub fn check_foundation(card: &Card, foundation: &Pile) -> Result<(), MoveRejection> {
    if !card.is_face_up() {
        return Err(MoveRejection::PileLocked);
    }
    match foundation.top_card() {
        None if card.rank() == Rank::Ace => Ok(()),
        None => Err(MoveRejection::EmptyFoundationNeedsAce),
        Some(top) if top.suit() != card.suit() => Err(MoveRejection::WrongSuit),
        Some(top) if top.is_adjacent_rank_below(card) => Ok(()),
        Some(_) => Err(MoveRejection::WrongRank),
    }
}

#[must_use]
pub fn can_move_to_foundation(card: &Card, foundation: &Pile) -> bool {
    check_foundation(card, foundation).is_ok()
}

/// Can `run` (bottom card first) be placed on `tableau`?
///
/// An empty column takes a run headed by a King; otherwise the column's top
/// card must be face-up, of the opposite color, and one rank above the run's
/// bottom card.
pub fn check_tableau(run: &[Card], tableau: &Pile) -> Result<(), MoveRejection> {
    let bottom = run.first().ok_or(MoveRejection::RunNotOrdered)?;
    match tableau.top_card() {
        None if bottom.rank() == Rank::King => Ok(()),
        None => Err(MoveRejection::EmptyTableauNeedsKing),
        Some(top) if !top.is_face_up() => Err(MoveRejection::PileLocked),
        Some(top) if !top.is_opposite_color(bottom) => Err(MoveRejection::WrongColor),
        Some(top) if bottom.is_adjacent_rank_below(top) => Ok(()),
        Some(_) => Err(MoveRejection::WrongRank),
    }
}

#[must_use]
pub fn can_move_to_tableau(run: &[Card], tableau: &Pile) -> bool {
    check_tableau(run, tableau).is_ok()
}

/// Is `run` a face-up, strictly descending, alternating-color sequence?
///
/// A single face-up card is a valid run.
pub fn check_run(run: &[Card]) -> Result<(), MoveRejection> {
    if run.is_empty() {
        return Err(MoveRejection::RunNotOrdered);
    }
    if !run.iter().all(Card::is_face_up) {
        return Err(MoveRejection::PileLocked);
    }
    let ordered = run
        .windows(2)
        .all(|pair| pair[0].is_opposite_color(&pair[1]) && pair[1].is_adjacent_rank_below(&pair[0]));
    if ordered {
        Ok(())
    } else {
        Err(MoveRejection::RunNotOrdered)
    }
}

#[must_use]
pub fn can_move_run(run: &[Card]) -> bool {
    check_run(run).is_ok()
}

/// Full check of a lifted run against any destination pile.
///
/// Dispatches on the destination kind: stock and waste never accept cards,
/// foundations take a single card.
pub fn check_move(run: &[Card], dest: &Pile) -> Result<(), MoveRejection> {
    check_run(run)?;
    match dest.kind() {
        PileKind::Stock | PileKind::Waste => Err(MoveRejection::PileLocked),
        PileKind::Foundation => match run {
            [card] => check_foundation(card, dest),
            _ => Err(MoveRejection::MultipleCardsToFoundation),
        },
        PileKind::Tableau => check_tableau(run, dest),
    }
}
