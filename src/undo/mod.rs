//! Single-level undo.
//!
//! Only the most recent action can be reversed. Each recorded action
//! overwrites the previous checkpoint, and a successful undo clears it.

mod recorder;

pub use recorder::{MovementRecorder, UndoCheckpoint};
