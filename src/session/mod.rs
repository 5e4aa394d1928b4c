//! The game session: the single entry point for player intents.
//!
//! ## Key Types
//!
//! - `GameSession`: owns the table, talon, undo recorder, score and clock
//! - `MoveOutcome`: accepted or rejected result of a move request
//! - `GameEvent`: queued notifications for the presentation layer
//!
//! Every intent runs to completion before the next is accepted. A rejected
//! intent leaves the table untouched.

mod events;
mod game;
mod outcome;

pub use events::GameEvent;
pub use game::GameSession;
pub use outcome::MoveOutcome;
