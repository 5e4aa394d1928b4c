//! Result of a move request.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardRun};
use crate::core::MoveRejection;
use crate::piles::PileId;

/// Whether a move request was carried out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Accepted {
        /// Cards moved, bottom first.
        cards: CardRun,
        from: PileId,
        to: PileId,
        /// The source pile's new top card, if the move turned it face-up.
        revealed: Option<Card>,
    },
    Rejected(MoveRejection),
}

impl MoveOutcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<MoveRejection> {
        match self {
            MoveOutcome::Rejected(reason) => Some(*reason),
            MoveOutcome::Accepted { .. } => None,
        }
    }
}

impl From<MoveRejection> for MoveOutcome {
    fn from(reason: MoveRejection) -> Self {
        MoveOutcome::Rejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_accessors() {
        let rejected = MoveOutcome::from(MoveRejection::WrongRank);
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.rejection(), Some(MoveRejection::WrongRank));

        let accepted = MoveOutcome::Accepted {
            cards: smallvec![],
            from: PileId::Waste,
            to: PileId::Tableau(0),
            revealed: None,
        };
        assert!(accepted.is_accepted());
        assert_eq!(accepted.rejection(), None);
    }

    #[test]
    fn test_outcome_serde() {
        let outcome = MoveOutcome::Rejected(MoveRejection::EmptyTableauNeedsKing);
        let json = serde_json::to_string(&outcome).unwrap();
        let back: MoveOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
