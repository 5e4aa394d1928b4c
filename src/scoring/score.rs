//! Scoreboard.
//!
//! ## Standard
//!
//! | Event                       | Points |
//! |-----------------------------|--------|
//! | Waste to tableau            | +5     |
//! | Waste to foundation         | +10    |
//! | Tableau to foundation       | +10    |
//! | Reveal a tableau card       | +5     |
//! | Foundation to tableau       | -15    |
//! | Recycle, draw one           | -100   |
//! | Recycle, draw three (4th+)  | -20    |
//! | Every 10 seconds            | -2     |
//!
//! The score never drops below zero.
//!
//! ## Vegas
//!
//! The deal costs 52. Each card placed on a foundation pays 5 and each
//! card taken back off one costs 5. The score may go negative.

use serde::{Deserialize, Serialize};

use crate::core::{DrawOption, ScoringOption};
use crate::piles::PileKind;

/// Vegas pay-in per deal.
pub const VEGAS_BUY_IN: i32 = 52;

/// Recycles allowed without penalty in standard draw-three.
const FREE_DRAW_THREE_RECYCLES: u32 = 3;

/// Something that may change the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreEvent {
    /// Cards moved between two piles.
    Transfer { from: PileKind, to: PileKind },
    /// A face-down tableau card was turned up.
    Reveal,
    /// The waste went back to the stock; `pass_count` is the count after.
    Recycle { pass_count: u32 },
    /// A scoring interval of the game clock elapsed.
    TimeTick,
}

/// Current score under one scoring option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    option: ScoringOption,
    draw: DrawOption,
    score: i32,
}

impl Scoreboard {
    /// Opening score for a new deal.
    #[must_use]
    pub fn new(option: ScoringOption, draw: DrawOption) -> Self {
        let score = match option {
            ScoringOption::Standard => 0,
            ScoringOption::Vegas => -VEGAS_BUY_IN,
        };
        Self { option, draw, score }
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn option(&self) -> ScoringOption {
        self.option
    }

    /// Overwrite the score, as undo does.
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Apply an event. Returns true if the score changed.
    pub fn apply(&mut self, event: ScoreEvent) -> bool {
        let before = self.score;
        let delta = match self.option {
            ScoringOption::Standard => self.standard_delta(event),
            ScoringOption::Vegas => Self::vegas_delta(event),
        };
        self.score += delta;
        if self.option == ScoringOption::Standard {
            self.score = self.score.max(0);
        }
        self.score != before
    }

    fn standard_delta(&self, event: ScoreEvent) -> i32 {
        use PileKind::{Foundation, Tableau, Waste};
        match event {
            ScoreEvent::Transfer { from: Waste, to: Tableau } => 5,
            ScoreEvent::Transfer { from: Waste | Tableau, to: Foundation } => 10,
            ScoreEvent::Transfer { from: Foundation, to: Tableau } => -15,
            ScoreEvent::Transfer { .. } => 0,
            ScoreEvent::Reveal => 5,
            ScoreEvent::Recycle { pass_count } => match self.draw {
                DrawOption::One => -100,
                DrawOption::Three if pass_count > FREE_DRAW_THREE_RECYCLES => -20,
                DrawOption::Three => 0,
            },
            ScoreEvent::TimeTick => -2,
        }
    }

    fn vegas_delta(event: ScoreEvent) -> i32 {
        match event {
            ScoreEvent::Transfer { from, to } if from == to => 0,
            ScoreEvent::Transfer { to: PileKind::Foundation, .. } => 5,
            ScoreEvent::Transfer { from: PileKind::Foundation, .. } => -5,
            _ => 0,
        }
    }
}
