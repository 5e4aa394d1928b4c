//! Pile identifiers.

use serde::{Deserialize, Serialize};

use super::PileKind;

/// Number of tableau columns.
pub const TABLEAU_COUNT: usize = 7;

/// Number of foundation piles.
pub const FOUNDATION_COUNT: usize = 4;

/// Identifies one pile on the table.
///
/// Foundation and tableau indices are 0-based, left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileId {
    Stock,
    Waste,
    Foundation(u8),
    Tableau(u8),
}

impl PileId {
    /// The kind of pile this id names.
    #[must_use]
    pub const fn kind(self) -> PileKind {
        match self {
            PileId::Stock => PileKind::Stock,
            PileId::Waste => PileKind::Waste,
            PileId::Foundation(_) => PileKind::Foundation,
            PileId::Tableau(_) => PileKind::Tableau,
        }
    }

    /// True if the id refers to a pile that exists on a standard table.
    #[must_use]
    pub fn is_valid(self) -> bool {
        match self {
            PileId::Stock | PileId::Waste => true,
            PileId::Foundation(i) => usize::from(i) < FOUNDATION_COUNT,
            PileId::Tableau(i) => usize::from(i) < TABLEAU_COUNT,
        }
    }

    /// Every foundation id, left to right.
    pub fn foundations() -> impl Iterator<Item = PileId> {
        (0..FOUNDATION_COUNT as u8).map(PileId::Foundation)
    }

    /// Every tableau id, left to right.
    pub fn tableaus() -> impl Iterator<Item = PileId> {
        (0..TABLEAU_COUNT as u8).map(PileId::Tableau)
    }

    /// Every pile on the table.
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain(Self::foundations())
            .chain(Self::tableaus())
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PileId::Stock => write!(f, "Stock"),
            PileId::Waste => write!(f, "Waste"),
            PileId::Foundation(i) => write!(f, "Foundation({})", i),
            PileId::Tableau(i) => write!(f, "Tableau({})", i),
        }
    }
}
