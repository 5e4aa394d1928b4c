//! Cards and the deck.
//!
//! - `Card`: rank, suit and face state
//! - `CardId`: stable identity of a card within the deck
//! - `deck`: building and shuffling the 52-card deck

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Color, Rank, Suit};
pub use deck::{shuffled_deck, standard_deck, DECK_SIZE};

use smallvec::SmallVec;

/// Cards lifted together in one move, bottom first.
pub type CardRun = SmallVec<[Card; 4]>;
