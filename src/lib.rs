//! # klondike-core
//!
//! Rules engine for Klondike solitaire, with no rendering or input handling.
//!
//! ## Design Principles
//!
//! 1. **Intents In, Events Out**: The presentation layer sends intents
//!    (`attempt_move`, `draw_next`, `undo`) to a `GameSession` and drains
//!    `GameEvent`s to re-render.
//!
//! 2. **One Owner**: The `Table` owns every card. Piles are addressed by
//!    `PileId` and cards by `CardId`; nothing holds references into it.
//!
//! 3. **Rejections Are Values**: An illegal move returns
//!    `MoveOutcome::Rejected` with a reason and leaves the table unchanged.
//!
//! ## Architecture
//!
//! - **Talon State Machine**: Draw and recycle are fused into one
//!   `draw_next` call, so the stock never sits in a half-recycled state.
//!
//! - **Persistent Data Structures**: Piles use `im::Vector`, so an undo
//!   checkpoint can snapshot the whole talon for O(1).
//!
//! - **Deterministic Deals**: `DealRng` (ChaCha8) makes every deal
//!   reproducible from its seed.
//!
//! ## Modules
//!
//! - `core`: RNG, options, clock, error types
//! - `cards`: Cards, card ids and the deck
//! - `piles`: Piles, pile ids and the table
//! - `rules`: Move validation
//! - `talon`: Stock and waste state machine
//! - `undo`: Single-level undo
//! - `scoring`: Standard and Vegas scoring
//! - `session`: The game session

pub mod cards;
pub mod core;
pub mod piles;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod talon;
pub mod undo;

// Re-export commonly used types
pub use crate::core::{
    DealRng,
    DrawOption, ScoringOption, SessionConfig,
    GameClock, SCORING_INTERVAL_SECS,
    InvariantViolation, MoveRejection,
};

pub use crate::cards::{Card, CardId, CardRun, Color, Rank, Suit, DECK_SIZE};

pub use crate::piles::{Pile, PileId, PileKind, Table, FOUNDATION_COUNT, TABLEAU_COUNT};

pub use crate::talon::{CycleState, DrawOutcome, ExposedRun, ScoringMode, TalonEngine, TalonSnapshot, TalonState};

pub use crate::undo::{MovementRecorder, UndoCheckpoint};

pub use crate::scoring::{ScoreEvent, Scoreboard, VEGAS_BUY_IN};

pub use crate::session::{GameEvent, GameSession, MoveOutcome};
