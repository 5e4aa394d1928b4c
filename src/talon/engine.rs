//! Talon engine: draw, recycle and pass counting.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::cards::{Card, CardId};
use crate::core::{DrawOption, ScoringOption};
use crate::piles::{Pile, PileKind};
use crate::undo::UndoCheckpoint;

/// The visible, interactive waste cards (at most three), bottom first.
pub type ExposedRun = SmallVec<[Card; 3]>;

/// Whether the number of passes through the stock is capped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMode {
    #[default]
    Standard,
    /// One pass for draw-one, three passes for draw-three.
    PassLimited,
}

impl From<ScoringOption> for ScoringMode {
    fn from(option: ScoringOption) -> Self {
        match option {
            ScoringOption::Standard => ScoringMode::Standard,
            ScoringOption::Vegas => ScoringMode::PassLimited,
        }
    }
}

/// Talon lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleState {
    #[default]
    Empty,
    Mid,
    Exhausted,
}

/// Result of a single `draw_next` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawOutcome {
    /// Cards were turned onto the waste.
    Revealed {
        /// The new exposed run, bottom first; the last card is the pickable one.
        cards: ExposedRun,
        /// Pass count after the recycle that preceded this draw, if one did.
        recycled: Option<u32>,
    },
    /// The pass limit has been reached. Nothing changed.
    Exhausted,
    /// Neither stock nor waste holds any card.
    Empty,
}

/// Observable talon state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalonState {
    pub draw_mode: DrawOption,
    pub scoring_mode: ScoringMode,
    pub pass_count: u32,
    pub cycle_state: CycleState,
    pub exposed_run: ExposedRun,
}

/// A full copy of the talon for undo.
///
/// Piles are persistent vectors, so taking one is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalonSnapshot(TalonEngine);

impl TalonSnapshot {
    /// Pass count at the time of the snapshot.
    #[must_use]
    pub fn pass_count(&self) -> u32 {
        self.0.pass_count
    }

    /// Cycle state at the time of the snapshot.
    #[must_use]
    pub fn cycle_state(&self) -> CycleState {
        self.0.cycle_state
    }
}

/// Stock and waste piles plus the draw/recycle state machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalonEngine {
    stock: Pile,
    waste: Pile,
    draw_mode: DrawOption,
    scoring_mode: ScoringMode,
    pass_count: u32,
    cycle_state: CycleState,
    /// How many of the top waste cards form the exposed run.
    exposed: usize,
}

impl TalonEngine {
    /// An empty talon.
    #[must_use]
    pub fn new(draw_mode: DrawOption, scoring_mode: ScoringMode) -> Self {
        Self {
            stock: Pile::new(PileKind::Stock),
            waste: Pile::new(PileKind::Waste),
            draw_mode,
            scoring_mode,
            pass_count: 0,
            cycle_state: CycleState::Empty,
            exposed: 0,
        }
    }

    /// Replace the talon with a fresh stock. `cards` is bottom first; every
    /// card is turned face-down.
    pub fn load(&mut self, cards: impl IntoIterator<Item = Card>) {
        let stock = cards.into_iter().map(|mut c| {
            c.set_face_up(false);
            c
        });
        self.stock = Pile::with_cards(PileKind::Stock, stock);
        self.waste = Pile::new(PileKind::Waste);
        self.pass_count = 0;
        self.exposed = 0;
        self.cycle_state = if self.stock.is_empty() {
            CycleState::Empty
        } else {
            CycleState::Mid
        };
    }

    /// Build a talon with explicit stock and waste contents (bottom first).
    ///
    /// Stock cards are turned face-down and waste cards face-up. The top
    /// `min(batch, waste)` waste cards are exposed.
    #[must_use]
    pub fn with_piles(
        draw_mode: DrawOption,
        scoring_mode: ScoringMode,
        stock: impl IntoIterator<Item = Card>,
        waste: impl IntoIterator<Item = Card>,
    ) -> Self {
        let mut talon = Self::new(draw_mode, scoring_mode);
        talon.load(stock);
        talon.waste.push(waste.into_iter().map(|mut c| {
            c.set_face_up(true);
            c
        }));
        talon.exposed = talon.waste.count().min(draw_mode.batch_size());
        talon.settle();
        talon
    }

    #[must_use]
    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    #[must_use]
    pub fn draw_mode(&self) -> DrawOption {
        self.draw_mode
    }

    #[must_use]
    pub fn scoring_mode(&self) -> ScoringMode {
        self.scoring_mode
    }

    #[must_use]
    pub fn pass_count(&self) -> u32 {
        self.pass_count
    }

    #[must_use]
    pub fn cycle_state(&self) -> CycleState {
        self.cycle_state
    }

    /// True once the pass limit has been reached.
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.cycle_state == CycleState::Exhausted
    }

    /// The visible waste cards, bottom first.
    #[must_use]
    pub fn exposed_run(&self) -> ExposedRun {
        let start = self.waste.count() - self.exposed;
        self.waste.cards().iter().skip(start).copied().collect()
    }

    /// Only the top exposed card can be picked up.
    #[must_use]
    pub fn is_pickable(&self, card: CardId) -> bool {
        self.exposed > 0 && self.waste.top_card().is_some_and(|top| top.id() == card)
    }

    #[must_use]
    pub fn state(&self) -> TalonState {
        TalonState {
            draw_mode: self.draw_mode,
            scoring_mode: self.scoring_mode,
            pass_count: self.pass_count,
            cycle_state: self.cycle_state,
            exposed_run: self.exposed_run(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TalonSnapshot {
        TalonSnapshot(self.clone())
    }

    pub fn restore(&mut self, snapshot: &TalonSnapshot) {
        *self = snapshot.0.clone();
    }

    /// Advance the talon by one draw.
    ///
    /// When the stock is empty the waste is first recycled back onto the
    /// stock, reversed so the next pass repeats the same order, and the draw
    /// then proceeds in the same call. Under pass-limited scoring, the recycle
    /// that would reach the cap ends the talon instead; the waste stays where
    /// it is so its exposed cards remain playable.
    pub fn draw_next(&mut self) -> DrawOutcome {
        if self.cycle_state == CycleState::Exhausted {
            debug!("draw ignored, talon exhausted");
            return DrawOutcome::Exhausted;
        }

        let mut recycled = None;
        if self.stock.is_empty() {
            if self.waste.is_empty() {
                self.cycle_state = CycleState::Empty;
                debug!("draw ignored, talon empty");
                return DrawOutcome::Empty;
            }

            self.pass_count += 1;
            if self.scoring_mode == ScoringMode::PassLimited
                && self.pass_count >= self.draw_mode.pass_limit()
            {
                self.cycle_state = CycleState::Exhausted;
                info!(passes = self.pass_count, "talon exhausted");
                return DrawOutcome::Exhausted;
            }

            self.recycle();
            recycled = Some(self.pass_count);
            info!(passes = self.pass_count, "talon recycled");
        }

        let drawn = self.stock.pop(self.draw_mode.batch_size());
        // Top of stock is drawn first and ends up deepest in the waste.
        self.waste.push(drawn.iter().rev().map(|c| {
            let mut c = *c;
            c.set_face_up(true);
            c
        }));
        self.exposed = drawn.len();
        self.cycle_state = CycleState::Mid;

        let cards = self.exposed_run();
        debug!(drawn = cards.len(), stock = self.stock.count(), "talon draw");
        DrawOutcome::Revealed { cards, recycled }
    }

    /// Remove the top waste card for a move elsewhere.
    ///
    /// When the exposed run empties, the next `batch` waste cards become
    /// exposed.
    pub fn take_top(&mut self) -> Option<Card> {
        if self.exposed == 0 {
            return None;
        }
        let card = self.waste.pop(1).pop_back()?;
        self.exposed -= 1;
        if self.exposed == 0 {
            self.exposed = self.waste.count().min(self.draw_mode.batch_size());
        }
        self.settle();
        Some(card)
    }

    /// Restore the talon from the snapshot held by a draw checkpoint.
    ///
    /// Returns false, changing nothing, if there is no checkpoint or it was
    /// not a draw.
    pub fn undo_last_draw(&mut self, checkpoint: Option<&UndoCheckpoint>) -> bool {
        let Some(checkpoint) = checkpoint.filter(|cp| cp.is_draw()) else {
            return false;
        };
        let Some(snapshot) = checkpoint.talon_snapshot.as_ref() else {
            return false;
        };
        self.restore(snapshot);
        true
    }

    fn recycle(&mut self) {
        let waste = self.waste.take_all();
        self.stock.push(waste.iter().rev().map(|c| {
            let mut c = *c;
            c.set_face_up(false);
            c
        }));
        self.exposed = 0;
    }

    fn settle(&mut self) {
        if self.cycle_state != CycleState::Exhausted {
            self.cycle_state = if self.stock.is_empty() && self.waste.is_empty() {
                CycleState::Empty
            } else {
                CycleState::Mid
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    fn spades(n: u8) -> Vec<Card> {
        (1..=n)
            .map(|v| Card::new(Rank::from_value(v).unwrap(), Suit::Spades))
            .collect()
    }

    fn ranks(cards: &[Card]) -> Vec<u8> {
        cards.iter().map(|c| c.rank().value()).collect()
    }

    #[test]
    fn test_load_sets_mid() {
        let mut talon = TalonEngine::new(DrawOption::One, ScoringMode::Standard);
        assert_eq!(talon.cycle_state(), CycleState::Empty);

        talon.load(spades(5));
        assert_eq!(talon.cycle_state(), CycleState::Mid);
        assert_eq!(talon.stock().count(), 5);
        assert!(talon.exposed_run().is_empty());
    }

    #[test]
    fn test_draw_one_takes_top_of_stock() {
        let mut talon = TalonEngine::new(DrawOption::One, ScoringMode::Standard);
        talon.load(spades(5));

        match talon.draw_next() {
            DrawOutcome::Revealed { cards, recycled } => {
                assert_eq!(ranks(&cards), vec![5]);
                assert!(cards[0].is_face_up());
                assert_eq!(recycled, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(talon.stock().count(), 4);
        assert_eq!(talon.waste().count(), 1);
    }

    #[test]
    fn test_draw_three_orders_run() {
        let mut talon = TalonEngine::new(DrawOption::Three, ScoringMode::Standard);
        talon.load(spades(5));

        talon.draw_next();
        // 5 drawn first (deepest), then 4, then 3 on top.
        assert_eq!(ranks(&talon.exposed_run()), vec![5, 4, 3]);
        assert!(talon.is_pickable(Card::new(Rank::Three, Suit::Spades).id()));
        assert!(!talon.is_pickable(Card::new(Rank::Four, Suit::Spades).id()));

        // Only two left: short batch replaces the run.
        talon.draw_next();
        assert_eq!(ranks(&talon.exposed_run()), vec![2, 1]);
        assert!(talon.stock().is_empty());
    }

    #[test]
    fn test_recycle_reproduces_order() {
        let mut talon = TalonEngine::new(DrawOption::One, ScoringMode::Standard);
        talon.load(spades(3));

        let first: Vec<u8> = (0..3)
            .map(|_| talon.draw_next())
            .map(|o| match o {
                DrawOutcome::Revealed { cards, .. } => cards[0].rank().value(),
                other => panic!("unexpected {:?}", other),
            })
            .collect();

        match talon.draw_next() {
            DrawOutcome::Revealed { cards, recycled } => {
                assert_eq!(recycled, Some(1));
                assert_eq!(cards[0].rank().value(), first[0]);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(talon.pass_count(), 1);
        assert_eq!(talon.stock().count(), 2);
        assert!(talon.stock().cards().iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_pass_limit_draw_one() {
        let mut talon = TalonEngine::new(DrawOption::One, ScoringMode::PassLimited);
        talon.load(spades(2));

        talon.draw_next();
        talon.draw_next();
        assert_eq!(talon.draw_next(), DrawOutcome::Exhausted);
        assert!(talon.is_ended());
        assert_eq!(talon.pass_count(), 1);

        // Waste keeps its cards and the top one stays playable.
        assert_eq!(talon.waste().count(), 2);
        assert!(talon.is_pickable(Card::new(Rank::Ace, Suit::Spades).id()));

        let before = talon.clone();
        assert_eq!(talon.draw_next(), DrawOutcome::Exhausted);
        assert_eq!(talon, before);
    }

    #[test]
    fn test_pass_limit_draw_three() {
        let mut talon = TalonEngine::new(DrawOption::Three, ScoringMode::PassLimited);
        talon.load(spades(3));

        talon.draw_next();
        for pass in 1..=2 {
            match talon.draw_next() {
                DrawOutcome::Revealed { recycled, .. } => assert_eq!(recycled, Some(pass)),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(talon.draw_next(), DrawOutcome::Exhausted);
        assert_eq!(talon.pass_count(), 3);
    }

    #[test]
    fn test_empty_talon() {
        let mut talon = TalonEngine::new(DrawOption::One, ScoringMode::Standard);
        talon.load(spades(1));
        talon.draw_next();
        assert!(talon.take_top().is_some());
        assert_eq!(talon.cycle_state(), CycleState::Empty);
        assert_eq!(talon.draw_next(), DrawOutcome::Empty);
    }

    #[test]
    fn test_take_top_refills_exposed_run() {
        let mut talon = TalonEngine::new(DrawOption::Three, ScoringMode::Standard);
        talon.load(spades(6));
        talon.draw_next();
        talon.draw_next();
        assert_eq!(ranks(&talon.exposed_run()), vec![3, 2, 1]);

        talon.take_top();
        talon.take_top();
        assert_eq!(ranks(&talon.exposed_run()), vec![3]);

        talon.take_top();
        assert_eq!(ranks(&talon.exposed_run()), vec![6, 5, 4]);
    }

    #[test]
    fn test_take_top_requires_exposed() {
        let mut talon = TalonEngine::new(DrawOption::One, ScoringMode::Standard);
        talon.load(spades(2));
        assert!(talon.take_top().is_none());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut talon = TalonEngine::new(DrawOption::One, ScoringMode::Standard);
        talon.load(spades(4));
        let snapshot = talon.snapshot();

        talon.draw_next();
        talon.draw_next();
        talon.restore(&snapshot);

        assert_eq!(talon.stock().count(), 4);
        assert!(talon.waste().is_empty());
        assert_eq!(snapshot.pass_count(), 0);
        assert_eq!(snapshot.cycle_state(), CycleState::Mid);
    }

    #[test]
    fn test_undo_last_draw_without_checkpoint() {
        let mut talon = TalonEngine::new(DrawOption::One, ScoringMode::Standard);
        talon.load(spades(4));
        talon.draw_next();
        let before = talon.clone();

        assert!(!talon.undo_last_draw(None));
        assert_eq!(talon, before);
    }

    #[test]
    fn test_with_piles() {
        let talon = TalonEngine::with_piles(
            DrawOption::Three,
            ScoringMode::Standard,
            spades(2),
            [Card::new(Rank::King, Suit::Hearts), Card::new(Rank::Queen, Suit::Hearts)],
        );
        assert_eq!(talon.exposed_run().len(), 2);
        assert!(talon.waste().cards().iter().all(Card::is_face_up));
        assert!(talon.stock().cards().iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_scoring_mode_from_option() {
        assert_eq!(ScoringMode::from(ScoringOption::Vegas), ScoringMode::PassLimited);
        assert_eq!(ScoringMode::from(ScoringOption::Standard), ScoringMode::Standard);
    }
}
