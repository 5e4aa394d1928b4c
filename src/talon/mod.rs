//! The stock-and-waste subsystem.
//!
//! ## State machine
//!
//! - `Empty`: stock and waste both empty
//! - `Mid`: stock has cards to draw or waste has cards to recycle
//! - `Exhausted`: the pass limit was reached; no further draws
//!
//! A recycle and the draw that follows it happen in one `draw_next` call, so
//! callers never observe a "recycled but nothing drawn" state.

mod engine;

pub use engine::{CycleState, DrawOutcome, ExposedRun, ScoringMode, TalonEngine, TalonSnapshot, TalonState};
