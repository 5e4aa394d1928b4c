//! Score keeping for Standard and Vegas scoring.

mod score;

pub use score::{ScoreEvent, Scoreboard, VEGAS_BUY_IN};
