//! Rejection reasons and invariant violations.
//!
//! Illegal moves are ordinary results: they come back to the caller as a
//! [`MoveRejection`] and leave the table untouched. An
//! [`InvariantViolation`] means the table itself is corrupt, which is a
//! programming defect.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::piles::PileId;

/// Why a move was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum MoveRejection {
    /// The target needs a card exactly one rank apart.
    #[display("wrong rank for target pile")]
    WrongRank,

    /// Tableau builds down in alternating colors.
    #[display("tableau needs the opposite color")]
    WrongColor,

    /// Foundations build up in a single suit.
    #[display("foundation needs the same suit")]
    WrongSuit,

    #[display("an empty foundation only accepts an Ace")]
    EmptyFoundationNeedsAce,

    #[display("an empty tableau column only accepts a King")]
    EmptyTableauNeedsKing,

    /// The cards above the picked card do not form a run.
    #[display("cards do not form a descending alternating run")]
    RunNotOrdered,

    /// The source or target cannot be interacted with right now.
    #[display("pile is locked")]
    PileLocked,

    #[display("source and destination are the same pile")]
    SamePile,

    #[display("only a single card can go to a foundation")]
    MultipleCardsToFoundation,

    #[display("card is not on the table")]
    CardNotFound,

    #[display("no game has been dealt")]
    NoGameInProgress,
}

impl std::error::Error for MoveRejection {}

/// A broken table invariant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum InvariantViolation {
    #[display("{} appears more than once", _0)]
    DuplicateCard(CardId),

    #[display("table holds {} cards instead of 52", _0)]
    MissingCards(usize),

    #[display("{} is out of sequence", _0)]
    FoundationOutOfSequence(PileId),

    #[display("face-up cards of {} do not form a run", _0)]
    TableauRunBroken(PileId),

    #[display("{} holds a face-up card", _0)]
    FaceUpInStock(PileId),

    #[display("{} holds a face-down card", _0)]
    FaceDownInPlay(PileId),
}

impl std::error::Error for InvariantViolation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        assert_eq!(
            MoveRejection::EmptyTableauNeedsKing.to_string(),
            "an empty tableau column only accepts a King"
        );
        assert_eq!(MoveRejection::PileLocked.to_string(), "pile is locked");
    }

    #[test]
    fn test_violation_display() {
        let err = InvariantViolation::MissingCards(51);
        assert_eq!(err.to_string(), "table holds 51 cards instead of 52");

        let err = InvariantViolation::FoundationOutOfSequence(PileId::Foundation(2));
        assert_eq!(err.to_string(), "Foundation(2) is out of sequence");
    }

    #[test]
    fn test_rejection_is_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&MoveRejection::WrongRank);
        takes_error(&InvariantViolation::DuplicateCard(CardId(0)));
    }
}
