//! Movement recorder and undo checkpoints.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardRun;
use crate::piles::{PileId, Table};
use crate::talon::TalonSnapshot;

/// Everything needed to reverse one action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoCheckpoint {
    /// Where the cards came from. `Stock` for a draw.
    pub source_pile: PileId,

    /// Where the cards went. `None` for a draw.
    pub dest_pile: Option<PileId>,

    /// Cards moved, bottom first.
    pub moved_cards: CardRun,

    /// Talon before the action, for draws and moves out of the waste.
    pub talon_snapshot: Option<TalonSnapshot>,

    /// The move turned the source pile's new top card face-up.
    pub revealed_source: bool,

    /// Score before the action.
    pub score_before: i32,
}

impl UndoCheckpoint {
    /// Checkpoint for a talon draw.
    #[must_use]
    pub fn draw(talon: TalonSnapshot, drawn: CardRun, score_before: i32) -> Self {
        Self {
            source_pile: PileId::Stock,
            dest_pile: None,
            moved_cards: drawn,
            talon_snapshot: Some(talon),
            revealed_source: false,
            score_before,
        }
    }

    /// Checkpoint for a card transfer between piles.
    #[must_use]
    pub fn transfer(from: PileId, to: PileId, cards: CardRun, score_before: i32) -> Self {
        Self {
            source_pile: from,
            dest_pile: Some(to),
            moved_cards: cards,
            talon_snapshot: None,
            revealed_source: false,
            score_before,
        }
    }

    /// Attach the talon state from before the transfer.
    #[must_use]
    pub fn with_talon(mut self, talon: TalonSnapshot) -> Self {
        self.talon_snapshot = Some(talon);
        self
    }

    /// Mark that the source's new top card was turned face-up.
    #[must_use]
    pub fn with_reveal(mut self, revealed: bool) -> Self {
        self.revealed_source = revealed;
        self
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.dest_pile.is_none()
    }
}

/// Holds at most one undo checkpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecorder {
    checkpoint: Option<UndoCheckpoint>,
}

impl MovementRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `checkpoint`, replacing any previous one.
    pub fn record_move(&mut self, checkpoint: UndoCheckpoint) {
        self.checkpoint = Some(checkpoint);
    }

    #[must_use]
    pub fn checkpoint(&self) -> Option<&UndoCheckpoint> {
        self.checkpoint.as_ref()
    }

    #[must_use]
    pub fn has_checkpoint(&self) -> bool {
        self.checkpoint.is_some()
    }

    /// Drop the checkpoint without reversing it.
    pub fn clear(&mut self) {
        self.checkpoint = None;
    }

    /// Reverse the recorded action on `table` and clear the checkpoint.
    ///
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self, table: &mut Table) -> bool {
        let Some(checkpoint) = self.checkpoint.take() else {
            return false;
        };

        let Some(dest) = checkpoint.dest_pile else {
            debug!("undoing draw");
            return table.talon_mut().undo_last_draw(Some(&checkpoint));
        };

        debug!(from = %checkpoint.source_pile, to = %dest, cards = checkpoint.moved_cards.len(), "undoing move");
        if let Some(pile) = table.pile_mut(dest) {
            let lifted = pile.pop(checkpoint.moved_cards.len());
            debug_assert!(
                lifted.iter().map(|c| c.id()).eq(checkpoint.moved_cards.iter().map(|c| c.id())),
                "destination top does not match the recorded move"
            );
        }

        if let Some(snapshot) = &checkpoint.talon_snapshot {
            table.talon_mut().restore(snapshot);
            return true;
        }

        let Some(source) = table.pile_mut(checkpoint.source_pile) else {
            return false;
        };
        if checkpoint.revealed_source {
            source.hide_top();
        }
        source.push(checkpoint.moved_cards.iter().copied());
        true
    }
}
