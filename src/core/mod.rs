//! Core building blocks: deal RNG, options, game clock and error types.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;

pub use clock::{GameClock, SCORING_INTERVAL_SECS};
pub use config::{DrawOption, ScoringOption, SessionConfig};
pub use error::{InvariantViolation, MoveRejection};
pub use rng::DealRng;
