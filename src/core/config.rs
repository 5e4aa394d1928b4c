//! Session configuration.
//!
//! The presentation layer picks a draw option and a scoring option. Changes
//! made while a game is in progress are held as pending and only take
//! effect on the next deal.

use serde::{Deserialize, Serialize};

/// How many cards a single draw turns over from the stock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawOption {
    /// Turn one card per draw.
    #[default]
    One,
    /// Turn up to three cards per draw.
    Three,
}

impl DrawOption {
    /// Cards turned over per draw.
    #[must_use]
    pub const fn batch_size(self) -> usize {
        match self {
            DrawOption::One => 1,
            DrawOption::Three => 3,
        }
    }

    /// Passes through the stock allowed under pass-limited scoring.
    #[must_use]
    pub const fn pass_limit(self) -> u32 {
        match self {
            DrawOption::One => 1,
            DrawOption::Three => 3,
        }
    }
}

/// Scoring rules for the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringOption {
    /// Points for moves, penalties for recycling and time.
    #[default]
    Standard,
    /// Pay-in per deal, paid out per foundation card; passes are capped.
    Vegas,
}

/// Complete session configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Draw batch size and recycle fan-out.
    pub draw: DrawOption,

    /// Scoring rules, which also decide whether the talon is pass-limited.
    pub scoring: ScoringOption,
}

impl SessionConfig {
    /// Draw one, standard scoring.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the draw option.
    #[must_use]
    pub fn with_draw(mut self, draw: DrawOption) -> Self {
        self.draw = draw;
        self
    }

    /// Set the scoring option.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringOption) -> Self {
        self.scoring = scoring;
        self
    }

    /// True if the talon caps the number of passes.
    #[must_use]
    pub fn is_pass_limited(&self) -> bool {
        self.scoring == ScoringOption::Vegas
    }
}
