//! Piles and the table that owns them.
//!
//! ## Key Types
//!
//! - `Pile`: ordered card stack tagged with its `PileKind`
//! - `PileId`: identifies a pile on the table
//! - `Table`: owns every pile and checks table invariants

pub mod id;
pub mod pile;
pub mod table;

pub use id::{PileId, FOUNDATION_COUNT, TABLEAU_COUNT};
pub use pile::{Pile, PileKind};
pub use table::Table;
