//! Notifications for the presentation layer.
//!
//! The session queues events as intents are processed; the caller drains
//! them with [`GameSession::take_events`](super::GameSession::take_events)
//! and re-renders.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardRun};
use crate::core::MoveRejection;
use crate::piles::PileId;

/// Something the presentation layer may want to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new deal was laid out.
    GameDealt { seed: u64 },

    /// A card was turned face-up, by a draw or by uncovering a tableau card.
    CardRevealed(Card),

    /// Cards were transferred between piles.
    MoveAccepted {
        cards: CardRun,
        from: PileId,
        to: PileId,
    },

    /// A move request was refused; nothing changed.
    MoveRejected(MoveRejection),

    /// The waste was turned back into the stock; carries the new pass count.
    TalonRecycled(u32),

    /// The pass limit was reached; the stock can no longer be drawn from.
    TalonExhausted,

    /// Neither stock nor waste holds any card.
    TalonEmpty,

    /// The last action was reversed.
    Undone,

    ScoreChanged(i32),

    /// All four foundations are complete.
    GameWon,
}
